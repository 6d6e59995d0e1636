use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facturo_core::{DomainError, DomainResult};

/// Kind of activity declared by the business; drives the applicable thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Sale of goods (and lodging).
    Trade,
    /// Provision of services.
    Service,
    /// Anything else, including an activity that was never filled in.
    #[default]
    #[serde(other)]
    Other,
}

/// Business profile, edited once by the user and read by every document flow.
///
/// Field names serialize in camelCase so the profile can be handed to the PDF
/// template unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub activity: Activity,
    pub trading_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    /// Legal business identifier (SIRET), printed on every document.
    pub siret: Option<String>,
    pub ape_code: Option<String>,
    /// Intra-community VAT number, only for VAT-liable businesses.
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rib: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// Default VAT rate in percent (e.g. `20`).
    pub tax_rate: Option<Decimal>,
    /// Default conditions printed on new quotations.
    pub quotation_conditions: Option<String>,
}

impl Profile {
    fn mandatory_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("firstName", self.first_name.as_deref()),
            ("lastName", self.last_name.as_deref()),
            ("address", self.address.as_deref()),
            ("zip", self.zip.as_deref()),
            ("city", self.city.as_deref()),
            ("siret", self.siret.as_deref()),
        ]
    }

    /// Names of the mandatory fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.mandatory_fields()
            .into_iter()
            .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether every mandatory legal field is present and non-blank.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Precondition gate for document creation. An absent profile is invalid.
pub fn is_profile_valid(profile: Option<&Profile>) -> bool {
    profile.is_some_and(Profile::is_complete)
}

/// Like [`is_profile_valid`], but fails with `invalid-profile`.
pub fn ensure_profile_valid(profile: Option<&Profile>) -> DomainResult<&Profile> {
    match profile {
        Some(p) if p.is_complete() => Ok(p),
        _ => Err(DomainError::InvalidProfile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complete_profile() -> Profile {
        Profile {
            activity: Activity::Service,
            trading_name: Some("My Company".to_string()),
            first_name: Some("Patrick".to_string()),
            last_name: Some("Poté".to_string()),
            address: Some("3 rue du roseau".to_string()),
            zip: Some("12345".to_string()),
            city: Some("Corneville".to_string()),
            siret: Some("123 456 789 00012".to_string()),
            tax_rate: Some(dec!(20)),
            quotation_conditions: Some("Condition A".to_string()),
            ..Profile::default()
        }
    }

    #[test]
    fn absent_profile_is_invalid() {
        assert!(!is_profile_valid(None));
        assert_eq!(ensure_profile_valid(None), Err(DomainError::InvalidProfile));
    }

    #[test]
    fn complete_profile_is_valid() {
        let profile = complete_profile();
        assert!(is_profile_valid(Some(&profile)));
        assert!(ensure_profile_valid(Some(&profile)).is_ok());
    }

    #[test]
    fn missing_any_single_mandatory_field_invalidates() {
        let clears: [fn(&mut Profile); 6] = [
            |p| p.first_name = None,
            |p| p.last_name = None,
            |p| p.address = None,
            |p| p.zip = None,
            |p| p.city = None,
            |p| p.siret = None,
        ];

        for clear in clears {
            let mut profile = complete_profile();
            clear(&mut profile);
            assert!(!is_profile_valid(Some(&profile)), "{profile:?}");
            assert_eq!(profile.missing_fields().len(), 1);
        }
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut profile = complete_profile();
        profile.city = Some("   ".to_string());
        assert_eq!(profile.missing_fields(), vec!["city"]);
        assert!(!is_profile_valid(Some(&profile)));
    }

    #[test]
    fn optional_fields_do_not_matter() {
        let mut profile = complete_profile();
        profile.trading_name = None;
        profile.tax_rate = None;
        profile.iban = None;
        assert!(is_profile_valid(Some(&profile)));
    }

    #[test]
    fn unknown_activity_deserializes_as_other() {
        let profile: Profile = serde_json::from_str(r#"{"activity":"farming"}"#).unwrap();
        assert_eq!(profile.activity, Activity::Other);

        let profile: Profile = serde_json::from_str(r#"{"activity":"trade","taxRate":20}"#).unwrap();
        assert_eq!(profile.activity, Activity::Trade);
        assert_eq!(profile.tax_rate, Some(dec!(20)));
    }
}
