//! Dashboard overview computed from the live collections.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::activity::Activity;
use crate::domain::contact::Contact;
use crate::domain::deal::Deal;
use crate::domain::filter::{ContactFilter, DealFilter, TaskFilter};
use crate::domain::task::Task;
use crate::domain::types::{DealStage, TaskStatus};
use crate::repository::{ActivityReader, EntityReader};
use crate::services::ServiceResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_contacts: usize,
    /// Deals that are not closed.
    pub active_deals: usize,
    /// Open tasks due today or earlier.
    pub tasks_due: usize,
    pub pipeline_value: f64,
    /// Value of closed deals.
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub activity: Activity,
    /// `3 hours ago`, `Yesterday`, ...
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent: Vec<RecentActivity>,
}

pub fn summarize(
    contacts: &[Contact],
    deals: &[Deal],
    tasks: &[Task],
    activities: Vec<Activity>,
    now: NaiveDateTime,
) -> DashboardData {
    let today = now.date();
    let amount = |stage_filter: fn(DealStage) -> bool| -> f64 {
        deals
            .iter()
            .filter(|deal| stage_filter(deal.stage))
            .filter_map(Deal::amount)
            .sum()
    };

    let stats = DashboardStats {
        total_contacts: contacts.len(),
        active_deals: deals.iter().filter(|deal| deal.stage.is_active()).count(),
        tasks_due: tasks
            .iter()
            .filter(|task| task.status != TaskStatus::Completed && task.due_date <= today)
            .count(),
        pipeline_value: amount(DealStage::is_active),
        revenue: amount(|stage| !stage.is_active()),
    };

    let recent = activities
        .into_iter()
        .map(|activity| RecentActivity {
            when: activity.relative_time(now),
            activity,
        })
        .collect();

    DashboardData { stats, recent }
}

/// Loads every collection the dashboard needs.
pub async fn load_dashboard<R>(
    repo: &R,
    recent_limit: usize,
    now: NaiveDateTime,
) -> ServiceResult<DashboardData>
where
    R: EntityReader<Contact> + EntityReader<Deal> + EntityReader<Task> + ActivityReader + ?Sized,
{
    let contacts = EntityReader::<Contact>::list(repo, &ContactFilter::default()).await?;
    let deals = EntityReader::<Deal>::list(repo, &DealFilter::default()).await?;
    let tasks = EntityReader::<Task>::list(repo, &TaskFilter::default()).await?;
    let activities = repo.recent(recent_limit).await.map_err(|err| {
        log::error!("Failed to load recent activities: {err}");
        err
    })?;

    Ok(summarize(&contacts, &deals, &tasks, activities, now))
}
