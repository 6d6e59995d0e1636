//! Infrastructure layer: collaborator stores, list queries, the lifecycle
//! service and configuration.

pub mod config;
pub mod query;
pub mod service;
pub mod store;
pub mod template;

pub use config::{AppConfig, AppConfigError, load_config};
pub use query::{
    ClientSort, DocumentRow, DocumentSort, Page, Pagination, RecordSort, SortDirection,
    client_label, default_document_order, document_rows, paginate, sort_by,
};
pub use service::{Bookkeeping, Dashboard, ServiceError, ServiceResult};
pub use store::{
    IdGenerator, InMemoryProfileStore, InMemoryRepository, Observable, ProfileRepository,
    PublishingRepository, Repository, StoreError,
};
pub use template::RenderContext;
