//! Initial data for the in-memory stores.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use facturo_accounting::Record;
use facturo_clients::Client;
use facturo_invoicing::Document;
use facturo_profile::Profile;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub profile: Option<Profile>,
    pub clients: Vec<Client>,
    pub documents: Vec<Document>,
    pub records: Vec<Record>,
}

impl Seed {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid seed data")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facturo_clients::ClientRef;

    #[test]
    fn parses_app_shaped_json() {
        let seed = Seed::from_json(
            r#"{
                "profile": {"activity": "service", "firstName": "Patrick", "taxRate": 20},
                "clients": [{
                    "id": "0190a5c4-8b1e-7cc1-9f3a-2b5d1e4f6a70",
                    "name": "Paul Soubota",
                    "address": "13 rue du port",
                    "zip": "67890",
                    "city": "Mangelle",
                    "country": "France"
                }],
                "documents": [{
                    "id": "0190a5c4-8b1e-7cc1-9f3a-2b5d1e4f6a71",
                    "type": "invoice",
                    "client": "Bistrot du port",
                    "createdAt": "2024-01-31T18:45:00+01:00",
                    "imported": true,
                    "totalHT": 150.4
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(seed.profile.unwrap().first_name.as_deref(), Some("Patrick"));
        assert_eq!(seed.clients[0].name, "Paul Soubota");
        assert_eq!(
            seed.documents[0].client,
            Some(ClientRef::Name("Bistrot du port".to_string()))
        );
        assert!(seed.records.is_empty());
    }

    #[test]
    fn empty_object_is_an_empty_seed() {
        let seed = Seed::from_json("{}").unwrap();
        assert!(seed.profile.is_none());
        assert!(seed.clients.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Seed::from_json("{\"clients\": 3}").is_err());
    }
}
