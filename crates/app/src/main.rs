mod seed;

use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Local};

use facturo_accounting::Record;
use facturo_clients::Client;
use facturo_core::Entity;
use facturo_events::{CollectionChange, InMemoryEventBus};
use facturo_infra::{Bookkeeping, InMemoryProfileStore, InMemoryRepository, PublishingRepository};
use facturo_invoicing::Document;
use facturo_observability::LogFormat;

use crate::seed::Seed;

type Store<E> = Arc<PublishingRepository<InMemoryRepository<E>, Arc<InMemoryEventBus<CollectionChange<E>>>>>;

fn store<E: Entity>(entities: Vec<E>) -> Store<E> {
    Arc::new(PublishingRepository::new(
        InMemoryRepository::with_entities(entities),
        Arc::new(InMemoryEventBus::new()),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = facturo_infra::load_config().context("failed to load configuration")?;
    facturo_observability::init(&config.log.level, LogFormat::from_json_flag(config.log.json));

    let seed = match &config.data.seed_path {
        Some(path) => Seed::load(path)?,
        None => Seed::default(),
    };
    tracing::info!(
        clients = seed.clients.len(),
        documents = seed.documents.len(),
        records = seed.records.len(),
        "stores seeded"
    );

    let profile = Arc::new(match seed.profile {
        Some(profile) => InMemoryProfileStore::with_profile(profile),
        None => InMemoryProfileStore::new(),
    });
    let clients: Store<Client> = store(seed.clients);
    let documents: Store<Document> = store(seed.documents);
    let records: Store<Record> = store(seed.records);

    let service = Bookkeeping::new(profile, clients.clone(), documents.clone(), records.clone());

    let year = Local::now().year();
    let dashboard = service.dashboard(year).await?;
    tracing::info!(
        year,
        revenue = %dashboard.revenue,
        level = ?dashboard.level,
        low_vat = dashboard.thresholds.low_vat,
        high_vat = dashboard.thresholds.high_vat,
        cap = dashboard.thresholds.micro_entrepreneur_cap,
        "threshold summary"
    );

    let page = service.document_list(config.list.pagination()).await?;
    tracing::info!("documents {}-{} of {}", page.offset, page.offset + page.items.len(), page.total);
    for row in &page.items {
        tracing::info!(
            label = %row.label,
            client = %row.client,
            status = row.status.map(|s| s.as_str()).unwrap_or("draft"),
            total_ht = %row.total_ht,
            "document"
        );
    }

    match service.new_quotation().await {
        Ok(draft) => tracing::info!(document_id = %draft.id, "ready to draft a quotation"),
        Err(err) => tracing::warn!(kind = err.kind(), "cannot draft a quotation: {err}"),
    }

    Ok(())
}
