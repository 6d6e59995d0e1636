use serde::{Deserialize, Serialize};
use validator::validate_email;

use facturo_core::{ClientId, DomainError, DomainResult, Entity};

/// A customer the user issues documents to.
///
/// Deleting a client never touches the documents or records pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub address: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub siret: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        address: impl Into<String>,
        zip: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            zip: zip.into(),
            city: city.into(),
            country: country.into(),
            siret: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Form validation: company name and full postal address are required, the
    /// email must look like an address when given.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("name", &self.name),
            ("address", &self.address),
            ("zip", &self.zip),
            ("city", &self.city),
            ("country", &self.country),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }

        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !validate_email(email.trim()) {
                return Err(DomainError::validation("email is invalid"));
            }
        }

        Ok(())
    }
}

/// Weak reference to a client, held by documents and accounting records.
///
/// Regular entries point at a client by id. Imported invoices carry the client as
/// free text since it may not exist in the client collection. A deleted client
/// leaves its id behind; nothing cascades.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientRef {
    Id(ClientId),
    Name(String),
}

impl ClientRef {
    /// Name to display: the free text, or the referenced client's name. A stale
    /// id resolves to an empty string.
    pub fn display_name(&self, clients: &[Client]) -> String {
        match self {
            ClientRef::Name(name) => name.clone(),
            ClientRef::Id(id) => clients
                .iter()
                .find(|c| c.id == *id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

impl From<ClientId> for ClientRef {
    fn from(id: ClientId) -> Self {
        ClientRef::Id(id)
    }
}

impl Entity for Client {
    type Id = ClientId;
    const COLLECTION: &'static str = "clients";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
