use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facturo_clients::ClientRef;
use facturo_core::{DomainError, DomainResult, Entity, RecordId, Timestamp};

/// Side of the book a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Revenue,
    Purchase,
}

/// One entry of the accounting book.
///
/// Totals are entered by the user as printed on the source document; only the
/// amount excluding taxes is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub created_at: Timestamp,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub client: ClientRef,
    /// Number of the invoice or credit note the entry comes from.
    pub reference: String,
    pub nature: String,
    pub payment_method: String,
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
    #[serde(rename = "totalTVA", default, skip_serializing_if = "Option::is_none")]
    pub total_tva: Option<Decimal>,
    #[serde(rename = "totalTTC", default, skip_serializing_if = "Option::is_none")]
    pub total_ttc: Option<Decimal>,
}

impl Record {
    /// Form validation: every descriptive field is required.
    pub fn validate(&self) -> DomainResult<()> {
        if let ClientRef::Name(name) = &self.client {
            if name.trim().is_empty() {
                return Err(DomainError::validation("client is required"));
            }
        }

        let required = [
            ("reference", &self.reference),
            ("nature", &self.nature),
            ("paymentMethod", &self.payment_method),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }

        Ok(())
    }

    pub fn is_revenue(&self) -> bool {
        self.kind == RecordType::Revenue
    }
}

impl Entity for Record {
    type Id = RecordId;
    const COLLECTION: &'static str = "records";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Revenue excluding taxes booked during a calendar year.
///
/// This is the figure compared against the VAT and micro-entrepreneur thresholds.
pub fn revenue_for_year(records: &[Record], year: i32) -> Decimal {
    records
        .iter()
        .filter(|r| r.is_revenue() && r.created_at.year() == year)
        .map(|r| r.total_ht)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use facturo_core::ClientId;
    use rust_decimal_macros::dec;

    fn at(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn record(kind: RecordType, created_at: &str, total_ht: Decimal) -> Record {
        Record {
            id: RecordId::new(),
            created_at: at(created_at),
            kind,
            client: ClientRef::Id(ClientId::new()),
            reference: "F-2024-001".to_string(),
            nature: "consulting".to_string(),
            payment_method: "transfer".to_string(),
            total_ht,
            total_tva: None,
            total_ttc: None,
        }
    }

    #[test]
    fn complete_record_is_valid() {
        let r = record(RecordType::Revenue, "2024-02-01T12:00:00+01:00", dec!(1200));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn blank_reference_is_rejected() {
        let mut r = record(RecordType::Purchase, "2024-02-01T12:00:00+01:00", dec!(80));
        r.reference = String::new();
        assert_eq!(r.validate(), Err(DomainError::validation("reference is required")));
    }

    #[test]
    fn blank_free_text_client_is_rejected() {
        let mut r = record(RecordType::Revenue, "2024-02-01T12:00:00+01:00", dec!(80));
        r.client = ClientRef::Name(" ".to_string());
        assert_eq!(r.validate(), Err(DomainError::validation("client is required")));
    }

    #[test]
    fn revenue_for_year_ignores_purchases_and_other_years() {
        let records = vec![
            record(RecordType::Revenue, "2024-01-15T09:00:00+01:00", dec!(1000)),
            record(RecordType::Revenue, "2024-12-31T23:00:00+01:00", dec!(250.50)),
            record(RecordType::Purchase, "2024-06-01T09:00:00+02:00", dec!(400)),
            record(RecordType::Revenue, "2023-12-31T10:00:00+01:00", dec!(9999)),
        ];

        assert_eq!(revenue_for_year(&records, 2024), dec!(1250.50));
        assert_eq!(revenue_for_year(&records, 2022), Decimal::ZERO);
    }

    #[test]
    fn optional_totals_are_omitted_from_json() {
        let r = record(RecordType::Revenue, "2024-02-01T12:00:00+01:00", dec!(10));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "revenue");
        assert!(json.get("totalHT").is_some());
        assert!(json.get("totalTVA").is_none());
        assert_eq!(json["paymentMethod"], "transfer");
    }
}
