//! Deals pipeline board.

use serde::Serialize;

use crate::domain::deal::{Deal, UpdateDeal};
use crate::domain::filter::DealFilter;
use crate::domain::types::{DealId, DealStage};
use crate::forms::deal::DealForm;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult, records};
use crate::store::{EntityStore, RefreshOutcome};

/// One column of the pipeline board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageColumn {
    pub stage: DealStage,
    pub label: &'static str,
    pub deals: Vec<Deal>,
    /// Sum of the parseable deal values in this column.
    pub total_value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DealStats {
    pub total: usize,
    pub active: usize,
    pub total_value: f64,
}

fn value_of<'a>(deals: impl Iterator<Item = &'a Deal>) -> f64 {
    deals.filter_map(Deal::amount).sum()
}

/// Groups `deals` by stage in pipeline order. Every stage gets a column.
pub fn board(deals: &[Deal]) -> Vec<StageColumn> {
    DealStage::ALL
        .iter()
        .map(|stage| {
            let deals: Vec<Deal> = deals
                .iter()
                .filter(|deal| deal.stage == *stage)
                .cloned()
                .collect();
            StageColumn {
                stage: *stage,
                label: stage.label(),
                total_value: value_of(deals.iter()),
                deals,
            }
        })
        .collect()
}

pub fn stats(deals: &[Deal]) -> DealStats {
    DealStats {
        total: deals.len(),
        active: deals.iter().filter(|deal| deal.stage.is_active()).count(),
        total_value: value_of(deals.iter()),
    }
}

pub async fn load_deals<R>(repo: &R, store: &mut EntityStore<Deal>) -> RefreshOutcome
where
    R: EntityReader<Deal> + ?Sized,
{
    records::refresh(repo, store, &DealFilter::default()).await
}

pub async fn create_deal<R>(
    repo: &R,
    store: &mut EntityStore<Deal>,
    form: &DealForm,
) -> ServiceResult<Deal>
where
    R: EntityWriter<Deal> + ?Sized,
{
    records::add(repo, store, form).await
}

pub async fn update_deal<R>(
    repo: &R,
    store: &mut EntityStore<Deal>,
    id: DealId,
    form: &DealForm,
) -> ServiceResult<Deal>
where
    R: EntityWriter<Deal> + ?Sized,
{
    records::apply_edit(repo, store, id, form).await
}

/// Moves a loaded deal to `stage`, sending nothing but the stage.
///
/// Returns `None` when the deal already is in `stage`.
pub async fn move_deal<R>(
    repo: &R,
    store: &mut EntityStore<Deal>,
    id: DealId,
    stage: DealStage,
) -> ServiceResult<Option<Deal>>
where
    R: EntityWriter<Deal> + ?Sized,
{
    let current = store.get(id).ok_or(ServiceError::NotFound)?;
    if current.stage == stage {
        return Ok(None);
    }
    let moved = records::update_fields(repo, store, id, &UpdateDeal::stage(stage)).await?;
    log::info!("Moved deal {id} to {}", stage.label());
    Ok(Some(moved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockDealRepository;

    fn deal(id: i32, stage: DealStage, value: &str) -> Deal {
        Deal {
            id: DealId::new(id).unwrap(),
            name: format!("Deal {id}"),
            company: "Acme".to_string(),
            value: value.to_string(),
            stage,
            contact: None,
            date: None,
        }
    }

    #[test]
    fn board_has_every_stage_in_order() {
        let deals = vec![
            deal(1, DealStage::Proposal, "$1,000"),
            deal(2, DealStage::Lead, "$500"),
            deal(3, DealStage::Proposal, "2,500.50"),
        ];

        let columns = board(&deals);

        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0].stage, DealStage::Lead);
        assert_eq!(columns[2].deals.len(), 2);
        assert_eq!(columns[2].total_value, 3500.5);
        assert_eq!(columns[4].label, "Closed Won");
        assert!(columns[4].deals.is_empty());
    }

    #[test]
    fn stats_skip_unparseable_values() {
        let deals = vec![
            deal(1, DealStage::Closed, "$1,000"),
            deal(2, DealStage::Lead, "TBD"),
            deal(3, DealStage::Negotiation, "$250"),
        ];

        let stats = stats(&deals);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.total_value, 1250.0);
    }

    #[tokio::test]
    async fn move_sends_only_the_stage() {
        let mut repo = MockDealRepository::new();
        repo.expect_update()
            .withf(|_, changes| *changes == UpdateDeal::stage(DealStage::Qualified))
            .times(1)
            .returning(|_, _| Ok(deal(1, DealStage::Qualified, "$100")));
        let mut store = EntityStore::with_items(vec![deal(1, DealStage::Lead, "$100")]);

        let id = DealId::new(1).unwrap();
        let moved = move_deal(&repo, &mut store, id, DealStage::Qualified)
            .await
            .unwrap();

        assert_eq!(moved.map(|d| d.stage), Some(DealStage::Qualified));
        assert_eq!(store.items()[0].stage, DealStage::Qualified);
    }

    #[tokio::test]
    async fn move_to_same_stage_is_a_no_op() {
        let mut repo = MockDealRepository::new();
        repo.expect_update().never();
        let mut store = EntityStore::with_items(vec![deal(1, DealStage::Lead, "$100")]);

        let moved = move_deal(&repo, &mut store, DealId::new(1).unwrap(), DealStage::Lead)
            .await
            .unwrap();

        assert_eq!(moved, None);
    }

    #[tokio::test]
    async fn moving_an_unknown_deal() {
        let repo = MockDealRepository::new();
        let mut store = EntityStore::with_items(vec![deal(1, DealStage::Lead, "$100")]);

        let id = DealId::new(7).unwrap();
        let err = move_deal(&repo, &mut store, id, DealStage::Closed)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
    }
}
