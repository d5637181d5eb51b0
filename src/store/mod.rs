//! Per-entity collection state held by a page.
//!
//! The store never talks to the backend itself: callers open a request
//! (`begin_*`), await the gateway and hand the outcome back (`finish_*`).
//! [`crate::services::records`] wires both halves together.

use std::collections::HashMap;

use crate::domain::Entity;
use crate::domain::types::DraftId;
use crate::repository::errors::RepositoryResult;

pub mod pending;
pub mod view;

pub use pending::PendingOperation;
pub use view::ListView;

/// Sequence number handed out for every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// What happened to a finished list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Items were replaced with `usize` records.
    Applied(usize),
    /// The request failed and the previous items were kept.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Superseded,
}

/// Result of applying a confirmed update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<E> {
    Replaced(E),
    /// The backend accepted the update but the record is not loaded locally.
    NotLoaded(E),
}

impl<E> UpdateOutcome<E> {
    pub fn into_record(self) -> E {
        match self {
            UpdateOutcome::Replaced(record) | UpdateOutcome::NotLoaded(record) => record,
        }
    }
}

/// Write confirmed while a list request was in flight.
#[derive(Debug, Clone)]
enum LocalWrite<E: Entity> {
    Created(E),
    Updated(E),
    Deleted(E::Id),
}

#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    items: Vec<E>,
    is_loading: bool,
    error: Option<String>,
    selected: Option<E::Id>,
    pending_delete: Option<E::Id>,
    drafts: HashMap<DraftId, PendingOperation<E>>,
    last_ticket: u64,
    /// Replayed over the response of the outstanding refresh.
    writes_in_flight: Vec<LocalWrite<E>>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            selected: None,
            pending_delete: None,
            drafts: HashMap::new(),
            last_ticket: 0,
            writes_in_flight: Vec::new(),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already loaded records.
    pub fn with_items(items: Vec<E>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Banner message of the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: E::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn begin_refresh(&mut self) -> RequestTicket {
        self.last_ticket += 1;
        self.is_loading = true;
        // The new request observes every write confirmed so far.
        self.writes_in_flight.clear();
        RequestTicket(self.last_ticket)
    }

    /// Applies a list response unless a newer request is outstanding.
    ///
    /// Creates, updates and deletes confirmed after the request was issued are
    /// replayed over the response. A failed refresh keeps the last known items
    /// and records the error.
    pub fn finish_refresh(
        &mut self,
        ticket: RequestTicket,
        result: RepositoryResult<Vec<E>>,
    ) -> RefreshOutcome {
        if ticket.0 != self.last_ticket {
            log::debug!(
                "Dropping superseded {} list response #{} (latest #{})",
                E::LABEL,
                ticket.0,
                self.last_ticket
            );
            return RefreshOutcome::Superseded;
        }

        self.is_loading = false;
        let writes = std::mem::take(&mut self.writes_in_flight);

        match result {
            Ok(items) => {
                self.items = items;
                for write in writes {
                    self.replay(write);
                }
                let count = self.items.len();
                self.error = None;
                if let Some(selected) = self.selected
                    && !self.contains(selected)
                {
                    self.selected = None;
                }
                RefreshOutcome::Applied(count)
            }
            Err(err) => {
                log::error!("Failed to load {} records: {err}", E::LABEL);
                self.error = Some(format!("Failed to load {}: {err}", E::PLURAL));
                RefreshOutcome::Failed
            }
        }
    }

    fn replay(&mut self, write: LocalWrite<E>) {
        match write {
            LocalWrite::Created(record) => self.upsert(record),
            LocalWrite::Updated(record) => {
                if let Some(existing) = self.items.iter_mut().find(|item| item.id() == record.id())
                {
                    *existing = record;
                }
            }
            LocalWrite::Deleted(id) => self.items.retain(|item| item.id() != id),
        }
    }

    fn upsert(&mut self, record: E) {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.items.push(record),
        }
    }

    fn track_write(&mut self, write: LocalWrite<E>) {
        if self.is_loading {
            self.writes_in_flight.push(write);
        }
    }

    /// Records a draft as sent. It is not visible in `items` until confirmed.
    pub fn begin_create(&mut self, draft: E::Draft) -> DraftId {
        let draft_id = DraftId::new();
        self.drafts
            .insert(draft_id, PendingOperation::Pending { draft });
        draft_id
    }

    /// Resolves a draft with the backend response.
    ///
    /// The confirmed record carries the authoritative id and replaces any
    /// loaded record with the same id instead of being merged into it.
    /// Returns `None` for a draft this store never issued or already resolved.
    pub fn finish_create(
        &mut self,
        draft_id: DraftId,
        result: RepositoryResult<E>,
    ) -> Option<PendingOperation<E>> {
        let draft = match self.drafts.remove(&draft_id) {
            Some(PendingOperation::Pending { draft }) => draft,
            Some(resolved) => {
                log::warn!("{} draft {draft_id} was already resolved", E::LABEL);
                self.drafts.insert(draft_id, resolved);
                return None;
            }
            None => {
                log::warn!("{} draft {draft_id} is not tracked", E::LABEL);
                return None;
            }
        };

        let operation = match result {
            Ok(record) => {
                self.upsert(record.clone());
                self.track_write(LocalWrite::Created(record.clone()));
                PendingOperation::Confirmed { record }
            }
            Err(err) => {
                log::error!("Failed to create {}: {err}", E::LABEL);
                let failed = PendingOperation::Failed {
                    draft,
                    error: err.to_string(),
                };
                self.drafts.insert(draft_id, failed.clone());
                failed
            }
        };

        Some(operation)
    }

    /// Drafts that are still in flight or failed.
    pub fn drafts(&self) -> impl Iterator<Item = (&DraftId, &PendingOperation<E>)> {
        self.drafts.iter()
    }

    /// Forgets a failed draft once the user dismissed it.
    pub fn discard_draft(&mut self, draft_id: DraftId) -> Option<PendingOperation<E>> {
        self.drafts.remove(&draft_id)
    }

    /// Replaces the loaded record with the backend's version.
    ///
    /// An id that is not loaded is never inserted; the list converges on the
    /// next refresh.
    pub fn apply_update(&mut self, id: E::Id, record: E) -> UpdateOutcome<E> {
        self.track_write(LocalWrite::Updated(record.clone()));
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(existing) => {
                *existing = record.clone();
                UpdateOutcome::Replaced(record)
            }
            None => {
                log::warn!(
                    "Updated {} {id} is not loaded locally; list is stale until the next refresh",
                    E::LABEL
                );
                UpdateOutcome::NotLoaded(record)
            }
        }
    }

    /// Drops a deleted record together with any selection pointing at it.
    pub fn apply_delete(&mut self, id: E::Id) -> Option<E> {
        self.track_write(LocalWrite::Deleted(id));
        let position = self.items.iter().position(|item| item.id() == id);
        let removed = position.map(|index| self.items.remove(index));

        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }

        removed
    }

    /// Selects a loaded record. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: E::Id) -> Option<&E> {
        if self.contains(id) {
            self.selected = Some(id);
        }
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&E> {
        self.selected.and_then(|id| self.get(id))
    }

    /// First step of a delete: remembers the record awaiting confirmation.
    pub fn request_delete(&mut self, id: E::Id) -> Option<&E> {
        if self.contains(id) {
            self.pending_delete = Some(id);
        }
        self.pending_delete.and_then(|id| self.get(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&E> {
        self.pending_delete.and_then(|id| self.get(id))
    }

    /// Takes the id awaiting confirmation, if any.
    pub fn take_pending_delete(&mut self) -> Option<E::Id> {
        self.pending_delete.take()
    }
}
