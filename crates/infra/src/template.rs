//! Data handed to the document template.
//!
//! Rendering itself happens elsewhere; this only fixes the shape of the payload.

use serde::Serialize;

use facturo_clients::Client;
use facturo_invoicing::Document;
use facturo_profile::Profile;

/// `{profile, client, document}` as the template reads it.
///
/// `client` is absent for imported invoices and for clients deleted since the
/// document was written; the document still carries its own reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub profile: Profile,
    pub client: Option<Client>,
    pub document: Document,
}

impl RenderContext {
    pub fn new(profile: Profile, client: Option<Client>, document: Document) -> Self {
        Self {
            profile,
            client,
            document,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
