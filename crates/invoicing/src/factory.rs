//! Construction of new documents with their derived defaults.
//!
//! Both constructors refuse to build anything unless the profile can legally issue
//! documents and at least one client exists.

use chrono::TimeDelta;

use facturo_clients::Client;
use facturo_core::{DocumentId, DomainError, DomainResult, Timestamp};
use facturo_profile::{Profile, ensure_profile_valid};

use crate::document::{Document, DocumentType};

/// Validity of a new quotation, in days.
pub const QUOTATION_VALIDITY_DAYS: u32 = 60;

/// Payment deadline of a new quotation, in days from creation.
pub const PAYMENT_DEADLINE_DAYS: i64 = 30;

fn ensure_can_create<'a>(profile: Option<&'a Profile>, clients: &[Client]) -> DomainResult<&'a Profile> {
    let profile = ensure_profile_valid(profile)?;
    if clients.is_empty() {
        return Err(DomainError::EmptyClients);
    }
    Ok(profile)
}

/// New quotation seeded from the profile defaults.
///
/// Lines and totals stay empty until the user edits the document.
pub fn create_quotation(
    profile: Option<&Profile>,
    clients: &[Client],
    id: DocumentId,
    now: Timestamp,
) -> DomainResult<Document> {
    let profile = ensure_can_create(profile, clients)?;

    let mut document = Document::new(id, DocumentType::Quotation, now);
    document.tax_rate = profile.tax_rate;
    document.conditions = profile.quotation_conditions.clone();
    document.expires_in = Some(QUOTATION_VALIDITY_DAYS);
    document.payment_deadline_at = Some(now + TimeDelta::days(PAYMENT_DEADLINE_DAYS));

    Ok(document)
}

/// Skeleton for an invoice issued elsewhere; it brings its own tax data.
pub fn create_invoice_import_skeleton(
    profile: Option<&Profile>,
    clients: &[Client],
    id: DocumentId,
    now: Timestamp,
) -> DomainResult<Document> {
    ensure_can_create(profile, clients)?;

    let mut document = Document::new(id, DocumentType::Invoice, now);
    document.imported = true;

    Ok(document)
}
