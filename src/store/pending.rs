use crate::domain::Entity;

/// Lifecycle of a create request that has left the client.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingOperation<E: Entity> {
    /// Sent, no response yet.
    Pending { draft: E::Draft },
    /// The backend stored the record and assigned its id.
    Confirmed { record: E },
    /// The backend rejected the draft or could not be reached.
    Failed { draft: E::Draft, error: String },
}

impl<E: Entity> PendingOperation<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, PendingOperation::Pending { .. })
    }

    /// The draft as submitted, unless the record has been confirmed.
    pub fn draft(&self) -> Option<&E::Draft> {
        match self {
            PendingOperation::Pending { draft } | PendingOperation::Failed { draft, .. } => {
                Some(draft)
            }
            PendingOperation::Confirmed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PendingOperation::Failed { error, .. } => Some(error),
            PendingOperation::Pending { .. } | PendingOperation::Confirmed { .. } => None,
        }
    }
}
