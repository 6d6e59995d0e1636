use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facturo_clients::ClientRef;
use facturo_core::{ClientId, DocumentId, DomainError, DomainResult, Entity, Timestamp, ValueObject};

/// Document kind. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Quotation,
    Invoice,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Quotation => "quotation",
            DocumentType::Invoice => "invoice",
        }
    }
}

/// One line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub designation: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// `quantity * unit_price`; stale until [`Item::recompute_amount`] runs.
    pub amount: Decimal,
}

impl ValueObject for Item {}

impl Item {
    pub fn new(designation: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            designation: designation.into(),
            quantity,
            unit_price,
            amount: quantity * unit_price,
        }
    }

    pub fn recompute_amount(&mut self) {
        self.amount = self.quantity * self.unit_price;
    }
}

/// Tax totals of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub ht: Decimal,
    pub tva: Decimal,
    pub ttc: Decimal,
}

impl ValueObject for Totals {}

impl Totals {
    /// Sum of line amounts, VAT at `tax_rate` percent rounded to the cent.
    pub fn from_items(items: &[Item], tax_rate: Option<Decimal>) -> Self {
        let ht: Decimal = items.iter().map(|item| item.amount).sum();
        let rate = tax_rate.unwrap_or(Decimal::ZERO);
        let tva = (ht * rate / Decimal::ONE_HUNDRED).round_dp(2);
        Self {
            ht,
            tva,
            ttc: ht + tva,
        }
    }
}

/// A quotation or an invoice.
///
/// Field names serialize the way the PDF template and the stored JSON expect
/// (`type`, `totalHT`, camelCase timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    #[serde(rename = "type")]
    kind: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(rename = "totalHT", default)]
    pub total_ht: Decimal,
    #[serde(rename = "totalTVA", default)]
    pub total_tva: Decimal,
    #[serde(rename = "totalTTC", default)]
    pub total_ttc: Decimal,
    /// Validity of a quotation, in days from creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_deadline_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_vat_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_urssaf_at: Option<Timestamp>,
    #[serde(default)]
    pub imported: bool,
}

impl Document {
    /// Bare document of the given kind: no client, no lines, zero totals.
    pub fn new(id: DocumentId, kind: DocumentType, created_at: Timestamp) -> Self {
        Self {
            id,
            kind,
            number: None,
            client: None,
            created_at,
            updated_at: None,
            tax_rate: None,
            conditions: None,
            items: Vec::new(),
            total_ht: Decimal::ZERO,
            total_tva: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            expires_in: None,
            payment_deadline_at: None,
            sent_at: None,
            signed_at: None,
            paid_at: None,
            refunded_at: None,
            declared_vat_at: None,
            declared_urssaf_at: None,
            imported: false,
        }
    }

    pub fn kind(&self) -> DocumentType {
        self.kind
    }

    pub fn totals(&self) -> Totals {
        Totals {
            ht: self.total_ht,
            tva: self.total_tva,
            ttc: self.total_ttc,
        }
    }

    pub fn client_id(&self) -> Option<ClientId> {
        match self.client {
            Some(ClientRef::Id(id)) => Some(id),
            _ => None,
        }
    }

    /// Number if assigned, the document kind otherwise.
    pub fn label(&self) -> &str {
        self.number
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(self.kind.as_str())
    }

    /// Recompute every line amount, then the totals from the lines.
    pub fn refresh_amounts(&mut self) {
        for item in &mut self.items {
            item.recompute_amount();
        }
        let totals = Totals::from_items(&self.items, self.tax_rate);
        self.total_ht = totals.ht;
        self.total_tva = totals.tva;
        self.total_ttc = totals.ttc;
    }

    /// Invariant check before overwriting `previous` with `self`.
    pub fn ensure_replaces(&self, previous: &Document) -> DomainResult<()> {
        if self.id != previous.id {
            return Err(DomainError::invariant("document id mismatch"));
        }
        if self.kind != previous.kind {
            return Err(DomainError::invariant("document type cannot change"));
        }
        Ok(())
    }
}

impl Entity for Document {
    type Id = DocumentId;
    const COLLECTION: &'static str = "documents";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn test_time() -> Timestamp {
        DateTime::parse_from_rfc3339("2024-03-01T10:00:00+01:00").unwrap()
    }

    #[test]
    fn item_amount_is_quantity_times_unit_price() {
        let item = Item::new("item b", dec!(2), dec!(150.4));
        assert_eq!(item.amount, dec!(300.8));
    }

    #[test]
    fn stale_item_amount_is_fixed_by_recompute() {
        let mut item = Item::new("dev", dec!(1), dec!(500));
        item.quantity = dec!(3);
        assert_eq!(item.amount, dec!(500));
        item.recompute_amount();
        assert_eq!(item.amount, dec!(1500));
    }

    #[test]
    fn totals_apply_tax_rate() {
        let items = vec![
            Item::new("item a", dec!(1), dec!(200)),
            Item::new("item b", dec!(2), dec!(150.4)),
        ];
        let totals = Totals::from_items(&items, Some(dec!(20)));
        assert_eq!(totals.ht, dec!(500.8));
        assert_eq!(totals.tva, dec!(100.16));
        assert_eq!(totals.ttc, dec!(600.96));
    }

    #[test]
    fn totals_without_tax_rate_have_no_vat() {
        let items = vec![Item::new("a", dec!(3), dec!(33.33))];
        let totals = Totals::from_items(&items, None);
        assert_eq!(totals.tva, Decimal::ZERO);
        assert_eq!(totals.ttc, dec!(99.99));
    }

    #[test]
    fn refresh_amounts_updates_lines_and_totals() {
        let mut doc = Document::new(DocumentId::new(), DocumentType::Quotation, test_time());
        doc.tax_rate = Some(dec!(10));
        doc.items = vec![Item {
            designation: "stale".to_string(),
            quantity: dec!(4),
            unit_price: dec!(25),
            amount: Decimal::ZERO,
        }];

        doc.refresh_amounts();

        assert_eq!(doc.items[0].amount, dec!(100));
        assert_eq!(doc.totals(), Totals { ht: dec!(100), tva: dec!(10), ttc: dec!(110) });
    }

    #[test]
    fn type_cannot_change_on_replace() {
        let id = DocumentId::new();
        let previous = Document::new(id, DocumentType::Quotation, test_time());
        let next = Document::new(id, DocumentType::Invoice, test_time());
        assert_eq!(
            next.ensure_replaces(&previous),
            Err(DomainError::invariant("document type cannot change"))
        );
        assert!(previous.clone().ensure_replaces(&previous).is_ok());
    }

    #[test]
    fn label_falls_back_to_kind() {
        let mut doc = Document::new(DocumentId::new(), DocumentType::Invoice, test_time());
        assert_eq!(doc.label(), "invoice");
        doc.number = Some("F-2024-001".to_string());
        assert_eq!(doc.label(), "F-2024-001");
    }

    #[test]
    fn serializes_with_template_field_names() {
        let mut doc = Document::new(DocumentId::new(), DocumentType::Quotation, test_time());
        doc.items = vec![Item::new("item a", dec!(1), dec!(200))];
        doc.tax_rate = Some(dec!(20));
        doc.refresh_amounts();

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "quotation");
        assert!(json.get("totalHT").is_some());
        assert!(json.get("totalTVA").is_some());
        assert!(json.get("totalTTC").is_some());
        assert_eq!(json["items"][0]["designation"], "item a");
        assert!(json.get("sentAt").is_none());

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
