//! Document lifecycle service.
//!
//! Orchestrates the pure domain functions against the collaborator stores:
//! read what a decision needs, decide, persist. Every mutating operation holds an
//! in-flight flag for its collection so a second submission made while the first
//! is pending is refused with [`ServiceError::Busy`].
//!
//! ## Error Semantics
//!
//! - Domain failures (`invalid-profile`, `empty-clients`, validation) are returned
//!   before anything is written.
//! - Collaborator failures surface as `persistence-failure`; nothing is retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use facturo_accounting::{Record, revenue_for_year};
use facturo_clients::Client;
use facturo_core::{ClientId, DocumentId, DomainError, RecordId, Timestamp};
use facturo_invoicing::{Document, create_invoice_import_skeleton, create_quotation};
use facturo_profile::{Profile, ThresholdLevel, Thresholds, ensure_profile_valid, thresholds};

use crate::query::{
    ClientSort, DocumentRow, DocumentSort, Page, Pagination, RecordSort, SortDirection,
    default_document_order, document_rows, paginate, sort_by,
};
use crate::store::{IdGenerator, ProfileRepository, Repository, StoreError};
use crate::template::RenderContext;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("profile is missing mandatory fields")]
    InvalidProfile,

    #[error("no client available")]
    EmptyClients,

    #[error("not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A collaborator call failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// The same kind of operation is already in flight.
    #[error("an operation is already in progress")]
    Busy,
}

impl ServiceError {
    /// Stable, kebab-case error kind (used as notification key by callers).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidProfile => "invalid-profile",
            Self::EmptyClients => "empty-clients",
            Self::NotFound => "not-found",
            Self::Validation(_) => "validation",
            Self::InvariantViolation(_) => "invariant-violation",
            Self::Persistence(_) => "persistence-failure",
            Self::Busy => "busy",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidProfile => ServiceError::InvalidProfile,
            DomainError::EmptyClients => ServiceError::EmptyClients,
            DomainError::NotFound => ServiceError::NotFound,
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::InvariantViolation(msg) => ServiceError::InvariantViolation(msg),
            DomainError::InvalidId(msg) => ServiceError::Validation(msg),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Submission flag of one form.
#[derive(Debug, Default)]
struct InFlight(AtomicBool);

impl InFlight {
    fn acquire(&self) -> ServiceResult<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ServiceError::Busy)?;
        Ok(InFlightGuard(&self.0))
    }

    #[cfg(test)]
    fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the flag on drop, whichever way the operation ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
struct Submissions {
    profile: InFlight,
    clients: InFlight,
    documents: InFlight,
    records: InFlight,
}

/// Revenue of a year against the thresholds of the user's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub year: i32,
    pub thresholds: Thresholds,
    pub revenue: Decimal,
    pub level: ThresholdLevel,
}

type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

fn local_now() -> Timestamp {
    Local::now().fixed_offset()
}

/// Bookkeeping facade over the profile, client, document and record stores.
pub struct Bookkeeping<P, C, D, R> {
    profile: P,
    clients: C,
    documents: D,
    records: R,
    clock: Clock,
    submissions: Submissions,
}

impl<P, C, D, R> Bookkeeping<P, C, D, R>
where
    P: ProfileRepository,
    C: Repository<Client>,
    D: Repository<Document> + IdGenerator<DocumentId>,
    R: Repository<Record>,
{
    pub fn new(profile: P, clients: C, documents: D, records: R) -> Self {
        Self {
            profile,
            clients,
            documents,
            records,
            clock: Arc::new(local_now),
            submissions: Submissions::default(),
        }
    }

    /// Replace the local clock (tests).
    pub fn with_clock(mut self, clock: impl Fn() -> Timestamp + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Draft quotation for the edit form. Nothing is stored until it is saved.
    pub async fn new_quotation(&self) -> ServiceResult<Document> {
        let profile = self.profile.get().await?;
        let clients = self.clients.list().await?;

        let document = create_quotation(
            profile.as_ref(),
            &clients,
            self.documents.generate_id(),
            self.now(),
        )
        .inspect_err(|err| tracing::warn!(kind = err.kind(), "quotation refused"))?;

        tracing::info!(document_id = %document.id, "quotation drafted");
        Ok(document)
    }

    /// Draft of an invoice issued outside the app.
    pub async fn new_imported_invoice(&self) -> ServiceResult<Document> {
        let profile = self.profile.get().await?;
        let clients = self.clients.list().await?;

        let document = create_invoice_import_skeleton(
            profile.as_ref(),
            &clients,
            self.documents.generate_id(),
            self.now(),
        )
        .inspect_err(|err| tracing::warn!(kind = err.kind(), "invoice import refused"))?;

        tracing::info!(document_id = %document.id, "invoice import drafted");
        Ok(document)
    }

    /// Upsert a document. Totals of non-imported documents are recomputed from
    /// their lines; imported invoices keep the totals printed on them.
    pub async fn save_document(&self, mut document: Document) -> ServiceResult<Document> {
        let _guard = self.submissions.documents.acquire()?;

        if let Some(previous) = self.documents.get(&document.id).await? {
            document.ensure_replaces(&previous)?;
        }
        if !document.imported {
            document.refresh_amounts();
        }
        document.updated_at = Some(self.now());

        let saved = self.documents.set(document).await.inspect_err(|err| {
            tracing::warn!("failed to save document: {err:?}");
        })?;

        tracing::info!(document_id = %saved.id, kind = saved.kind().as_str(), "document saved");
        Ok(saved)
    }

    pub async fn delete_document(&self, id: DocumentId) -> ServiceResult<()> {
        let _guard = self.submissions.documents.acquire()?;

        let document = self.documents.get(&id).await?.ok_or(ServiceError::NotFound)?;
        self.documents.delete(&document).await?;

        tracing::info!(document_id = %id, "document deleted");
        Ok(())
    }

    pub async fn save_client(&self, client: Client) -> ServiceResult<Client> {
        let _guard = self.submissions.clients.acquire()?;

        client.validate()?;
        let saved = self.clients.set(client).await.inspect_err(|err| {
            tracing::warn!("failed to save client: {err:?}");
        })?;

        tracing::info!(client_id = %saved.id, "client saved");
        Ok(saved)
    }

    /// Documents and records pointing at the client are left untouched.
    pub async fn delete_client(&self, id: ClientId) -> ServiceResult<()> {
        let _guard = self.submissions.clients.acquire()?;

        let client = self.clients.get(&id).await?.ok_or(ServiceError::NotFound)?;
        self.clients.delete(&client).await?;

        tracing::info!(client_id = %id, "client deleted");
        Ok(())
    }

    pub async fn save_record(&self, record: Record) -> ServiceResult<Record> {
        let _guard = self.submissions.records.acquire()?;

        record.validate()?;
        let saved = self.records.set(record).await.inspect_err(|err| {
            tracing::warn!("failed to save record: {err:?}");
        })?;

        tracing::info!(record_id = %saved.id, "record saved");
        Ok(saved)
    }

    pub async fn delete_record(&self, id: RecordId) -> ServiceResult<()> {
        let _guard = self.submissions.records.acquire()?;

        let record = self.records.get(&id).await?.ok_or(ServiceError::NotFound)?;
        self.records.delete(&record).await?;

        tracing::info!(record_id = %id, "record deleted");
        Ok(())
    }

    /// The profile may be saved incomplete; completeness only gates documents.
    pub async fn save_profile(&self, profile: Profile) -> ServiceResult<Profile> {
        let _guard = self.submissions.profile.acquire()?;

        let saved = self.profile.set(profile).await?;
        if !saved.is_complete() {
            tracing::info!(missing = ?saved.missing_fields(), "profile saved incomplete");
        } else {
            tracing::info!("profile saved");
        }
        Ok(saved)
    }

    /// Documents list in its default order (most recently updated first).
    pub async fn document_list(&self, pagination: Pagination) -> ServiceResult<Page<DocumentRow>> {
        let documents = self.documents.list().await?;
        let clients = self.clients.list().await?;

        let ordered = default_document_order(&documents);
        Ok(paginate(&document_rows(&ordered, &clients), pagination))
    }

    pub async fn sorted_document_list(
        &self,
        sort: DocumentSort,
        direction: SortDirection,
        pagination: Pagination,
    ) -> ServiceResult<Page<DocumentRow>> {
        let documents = self.documents.list().await?;
        let clients = self.clients.list().await?;

        let ordered = sort_by(&documents, sort.comparator(&clients), direction);
        Ok(paginate(&document_rows(&ordered, &clients), pagination))
    }

    pub async fn record_list(
        &self,
        sort: RecordSort,
        direction: SortDirection,
        pagination: Pagination,
    ) -> ServiceResult<Page<Record>> {
        let records = self.records.list().await?;
        let clients = self.clients.list().await?;

        let ordered = sort_by(&records, sort.comparator(&clients), direction);
        Ok(paginate(&ordered, pagination))
    }

    pub async fn client_list(
        &self,
        sort: ClientSort,
        direction: SortDirection,
        pagination: Pagination,
    ) -> ServiceResult<Page<Client>> {
        let clients = self.clients.list().await?;
        Ok(paginate(&sort_by(&clients, sort.comparator(), direction), pagination))
    }

    /// Threshold warning for `year`.
    pub async fn dashboard(&self, year: i32) -> ServiceResult<Dashboard> {
        let profile = self.profile.get().await?;
        let records = self.records.list().await?;

        let thresholds = thresholds(profile.as_ref());
        let revenue = revenue_for_year(&records, year);
        let level = thresholds.assess(revenue);

        if level > ThresholdLevel::Below {
            tracing::warn!(year, %revenue, ?level, "revenue above threshold");
        }

        Ok(Dashboard {
            year,
            thresholds,
            revenue,
            level,
        })
    }

    /// Payload for rendering a document. Requires a complete profile.
    pub async fn render_context(&self, id: DocumentId) -> ServiceResult<RenderContext> {
        let document = self.documents.get(&id).await?.ok_or(ServiceError::NotFound)?;
        let profile = self.profile.get().await?;
        let profile = ensure_profile_valid(profile.as_ref())?.clone();

        let client = match document.client_id() {
            Some(client_id) => self.clients.get(&client_id).await?,
            None => None,
        };

        Ok(RenderContext::new(profile, client, document))
    }
}
