//! Display status of a document, derived from its milestone timestamps.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Single status shown for a document. A document with no milestone is a draft
/// and has no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Declared,
    Signed,
    Paid,
    Refunded,
    Sent,
}

/// Colour of the status tag in document lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Red,
    Green,
    Blue,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Declared => "declared",
            Status::Signed => "signed",
            Status::Paid => "paid",
            Status::Refunded => "refunded",
            Status::Sent => "sent",
        }
    }

    pub fn color(self) -> TagColor {
        match self {
            Status::Declared => TagColor::Red,
            Status::Signed | Status::Paid | Status::Refunded => TagColor::Green,
            Status::Sent => TagColor::Blue,
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_declared(doc: &Document) -> bool {
    doc.declared_urssaf_at.is_some() || doc.declared_vat_at.is_some()
}

fn is_signed(doc: &Document) -> bool {
    doc.signed_at.is_some()
}

fn is_paid(doc: &Document) -> bool {
    doc.paid_at.is_some()
}

fn is_refunded(doc: &Document) -> bool {
    doc.refunded_at.is_some()
}

fn is_sent(doc: &Document) -> bool {
    doc.sent_at.is_some()
}

/// Status rules in precedence order; the first matching predicate wins.
///
/// A declared document outranks everything else, then signed, paid, refunded
/// and sent.
pub const STATUS_RULES: [(fn(&Document) -> bool, Status); 5] = [
    (is_declared, Status::Declared),
    (is_signed, Status::Signed),
    (is_paid, Status::Paid),
    (is_refunded, Status::Refunded),
    (is_sent, Status::Sent),
];

/// Resolve the display status of a document (`None` for drafts).
pub fn resolve_status(document: &Document) -> Option<Status> {
    STATUS_RULES
        .iter()
        .find(|(applies, _)| applies(document))
        .map(|(_, status)| *status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;
    use chrono::DateTime;
    use facturo_core::{DocumentId, Timestamp};
    use proptest::prelude::*;

    fn test_time() -> Timestamp {
        DateTime::parse_from_rfc3339("2024-05-10T09:30:00+02:00").unwrap()
    }

    fn draft() -> Document {
        Document::new(DocumentId::new(), DocumentType::Invoice, test_time())
    }

    #[test]
    fn draft_has_no_status() {
        assert_eq!(resolve_status(&draft()), None);
    }

    #[test]
    fn paid_outranks_refunded_and_sent() {
        let mut doc = draft();
        doc.sent_at = Some(test_time());
        doc.refunded_at = Some(test_time());
        doc.paid_at = Some(test_time());
        assert_eq!(resolve_status(&doc), Some(Status::Paid));
    }

    #[test]
    fn either_declaration_means_declared() {
        let mut doc = draft();
        doc.signed_at = Some(test_time());
        doc.declared_vat_at = Some(test_time());
        assert_eq!(resolve_status(&doc), Some(Status::Declared));

        let mut doc = draft();
        doc.declared_urssaf_at = Some(test_time());
        assert_eq!(resolve_status(&doc), Some(Status::Declared));
    }

    #[test]
    fn sent_only() {
        let mut doc = draft();
        doc.sent_at = Some(test_time());
        assert_eq!(resolve_status(&doc), Some(Status::Sent));
        assert_eq!(Status::Sent.color(), TagColor::Blue);
    }

    #[test]
    fn declared_tag_is_red() {
        assert_eq!(Status::Declared.color(), TagColor::Red);
        assert_eq!(Status::Refunded.color(), TagColor::Green);
        assert_eq!(Status::Signed.to_string(), "signed");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whatever combination of milestones is set, the resolved
        /// status is the highest-precedence one, and resolving twice agrees.
        #[test]
        fn status_follows_precedence(flags in prop::array::uniform6(any::<bool>())) {
            let [urssaf, vat, signed, paid, refunded, sent] = flags;
            let at = |set: bool| if set { Some(test_time()) } else { None };

            let mut doc = draft();
            doc.declared_urssaf_at = at(urssaf);
            doc.declared_vat_at = at(vat);
            doc.signed_at = at(signed);
            doc.paid_at = at(paid);
            doc.refunded_at = at(refunded);
            doc.sent_at = at(sent);

            let expected = if urssaf || vat {
                Some(Status::Declared)
            } else if signed {
                Some(Status::Signed)
            } else if paid {
                Some(Status::Paid)
            } else if refunded {
                Some(Status::Refunded)
            } else if sent {
                Some(Status::Sent)
            } else {
                None
            };

            prop_assert_eq!(resolve_status(&doc), expected);
            prop_assert_eq!(resolve_status(&doc), resolve_status(&doc));
        }
    }
}
