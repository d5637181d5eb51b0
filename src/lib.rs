#[cfg(feature = "client")]
use std::sync::Arc;

#[cfg(feature = "client")]
use crate::models::config::AppConfig;
#[cfg(feature = "client")]
use crate::services::ServiceResult;

pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod references;
pub mod repository;
pub mod search;
pub mod services;
pub mod store;

/// Signs in against the hosted backend, loads every collection and prints the
/// dashboard overview.
#[cfg(feature = "client")]
pub async fn run(config: AppConfig) -> ServiceResult<()> {
    use crate::repository::RemoteRepository;
    use crate::repository::http::HttpBackend;
    use crate::services::auth::Session;
    use crate::services::{activities, companies, contacts, dashboard, deals, tasks};
    use crate::store::{EntityStore, ListView};

    let backend = Arc::new(HttpBackend::new(&config)?);

    let session = Session::restore(backend.as_ref()).await?;
    let Some(user) = session.user() else {
        log::warn!(
            "No active session; sign in through the identity provider first"
        );
        return Err(services::ServiceError::Unauthorized);
    };

    let repo = RemoteRepository::new(backend.clone());

    let mut contact_store = EntityStore::new();
    let mut company_store = EntityStore::new();
    let mut deal_store = EntityStore::new();
    let mut task_store = EntityStore::new();

    contacts::load_contacts(&repo, &mut contact_store).await;
    companies::load_companies(&repo, &mut company_store).await;
    deals::load_deals(&repo, &mut deal_store).await;
    tasks::load_tasks(&repo, &mut task_store).await;

    for error in [
        contact_store.error(),
        company_store.error(),
        deal_store.error(),
        task_store.error(),
    ]
    .into_iter()
    .flatten()
    {
        log::warn!("{error}");
    }

    let recent = activities::recent_activities(&repo, config.recent_activity_limit)
        .await
        .unwrap_or_else(|err| {
            log::warn!("Recent activities unavailable: {}", err.notice());
            Vec::new()
        });

    let now = chrono::Local::now().naive_local();
    let overview = dashboard::summarize(
        contact_store.items(),
        deal_store.items(),
        task_store.items(),
        recent,
        now,
    );
    let options = companies::filter_options(company_store.items());
    let pipeline = deals::stats(deal_store.items());
    let overdue = tasks::overdue(task_store.items(), now.date());
    let first_page = contacts::page_data(&contact_store, &ListView::new(config.page_size));

    println!("Signed in as {}", user.display_name());
    println!("Total contacts: {}", overview.stats.total_contacts);
    println!("{}", first_page.summary());
    for contact in &first_page.contacts.items {
        println!("  {} <{}>", contact.full_name(), contact.email);
    }
    println!(
        "Companies: {} ({} industries)",
        company_store.items().len(),
        options.industries.len()
    );
    println!(
        "Active deals: {} of {} (pipeline ${:.2})",
        overview.stats.active_deals, pipeline.total, overview.stats.pipeline_value
    );
    println!("Revenue: ${:.2}", overview.stats.revenue);
    println!(
        "Tasks due: {} ({} overdue)",
        overview.stats.tasks_due,
        overdue.len()
    );
    for item in &overview.recent {
        println!("  {} - {}", item.activity.title, item.when);
    }

    Ok(())
}
