//! Sorting and pagination of the document, record and client lists.
//!
//! Everything here is pure: inputs are borrowed and a new, sorted collection is
//! returned. Sorting is stable so equal keys keep their collection order.

use std::cmp::Ordering;

use icu::collator::{Collator, CollatorOptions, Strength};
use icu::locid::locale;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facturo_accounting::Record;
use facturo_clients::Client;
use facturo_core::{DocumentId, Timestamp};
use facturo_invoicing::{Document, Status, TagColor, resolve_status};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound on a page, whatever the caller asks for.
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

thread_local! {
    /// French collation at secondary strength: accents matter, case does not.
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Collator::try_new(&locale!("fr").into(), options).ok()
    };
}

/// Locale-aware, case-insensitive comparison ("Étienne" sorts with the E's).
/// Strings that collate equal fall back to their raw order so the result stays
/// total.
pub fn compare_alphabetic(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

/// Chronological comparison of instants, whatever offset they were recorded in.
pub fn compare_dates(a: &Timestamp, b: &Timestamp) -> Ordering {
    a.cmp(b)
}

/// A missing date sorts before any date.
pub fn compare_optional_dates(a: Option<&Timestamp>, b: Option<&Timestamp>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_dates(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_numeric(a: &Decimal, b: &Decimal) -> Ordering {
    a.cmp(b)
}

/// Stable, non-mutating sort.
pub fn sort_by<T, F>(items: &[T], compare: F, direction: SortDirection) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare(a, b)));
    sorted
}

/// Name shown in the client column of a document list.
///
/// Imported invoices carry the client as text; regular documents resolve their
/// client id, and a deleted client gives an empty label.
pub fn client_label(document: &Document, clients: &[Client]) -> String {
    document
        .client
        .as_ref()
        .map(|client| client.display_name(clients))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentSort {
    Number,
    Client,
    CreatedAt,
    UpdatedAt,
    TotalHt,
}

impl DocumentSort {
    /// Comparator for this column. `clients` resolves the client column.
    pub fn comparator<'a>(self, clients: &'a [Client]) -> impl Fn(&Document, &Document) -> Ordering + 'a {
        move |a, b| match self {
            DocumentSort::Number => compare_alphabetic(
                a.number.as_deref().unwrap_or_default(),
                b.number.as_deref().unwrap_or_default(),
            ),
            DocumentSort::Client => {
                compare_alphabetic(&client_label(a, clients), &client_label(b, clients))
            }
            DocumentSort::CreatedAt => compare_dates(&a.created_at, &b.created_at),
            DocumentSort::UpdatedAt => {
                compare_optional_dates(a.updated_at.as_ref(), b.updated_at.as_ref())
            }
            DocumentSort::TotalHt => compare_numeric(&a.total_ht, &b.total_ht),
        }
    }
}

/// Documents list order: most recently updated first, never-saved documents last.
pub fn default_document_order(documents: &[Document]) -> Vec<Document> {
    sort_by(
        documents,
        DocumentSort::UpdatedAt.comparator(&[]),
        SortDirection::Descending,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSort {
    Reference,
    Client,
    Nature,
    CreatedAt,
    TotalHt,
}

impl RecordSort {
    pub fn comparator<'a>(self, clients: &'a [Client]) -> impl Fn(&Record, &Record) -> Ordering + 'a {
        move |a, b| match self {
            RecordSort::Reference => compare_alphabetic(&a.reference, &b.reference),
            RecordSort::Client => compare_alphabetic(
                &a.client.display_name(clients),
                &b.client.display_name(clients),
            ),
            RecordSort::Nature => compare_alphabetic(&a.nature, &b.nature),
            RecordSort::CreatedAt => compare_dates(&a.created_at, &b.created_at),
            RecordSort::TotalHt => compare_numeric(&a.total_ht, &b.total_ht),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientSort {
    Name,
    City,
}

impl ClientSort {
    pub fn comparator(self) -> impl Fn(&Client, &Client) -> Ordering {
        move |a, b| match self {
            ClientSort::Name => compare_alphabetic(&a.name, &b.name),
            ClientSort::City => compare_alphabetic(&a.city, &b.city),
        }
    }
}

/// Window into a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Pagination {
    /// `limit` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(0, limit)
    }

    /// Window `index` (zero based) of pages holding `limit` items.
    pub fn page(index: usize, limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        Self::new(index.saturating_mul(limit), limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a list. `total` counts the whole list, not the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Cut a page out of `items`. An offset past the end yields an empty page.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Page<T> {
    let start = pagination.offset.min(items.len());
    let end = start.saturating_add(pagination.limit).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        total: items.len(),
        offset: pagination.offset,
        limit: pagination.limit,
    }
}

/// A document as shown in the documents list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    pub id: DocumentId,
    pub label: String,
    pub client: String,
    pub status: Option<Status>,
    pub color: Option<TagColor>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
}

impl DocumentRow {
    pub fn new(document: &Document, clients: &[Client]) -> Self {
        let status = resolve_status(document);
        Self {
            id: document.id,
            label: document.label().to_string(),
            client: client_label(document, clients),
            status,
            color: status.map(Status::color),
            created_at: document.created_at,
            updated_at: document.updated_at,
            total_ht: document.total_ht,
        }
    }
}

pub fn document_rows(documents: &[Document], clients: &[Client]) -> Vec<DocumentRow> {
    documents
        .iter()
        .map(|document| DocumentRow::new(document, clients))
        .collect()
}
