//! Regulatory revenue thresholds (France, micro-entrepreneur regime).
//!
//! Amounts are whole euros of yearly revenue excluding taxes. They change by
//! legislation, not by computation:
//! - VAT franchise thresholds (franchise en base de TVA), CGI art. 293 B:
//!   <https://www.service-public.fr/professionnels-entreprises/vosdroits/F32353>
//! - Micro-entrepreneur revenue caps, CGI art. 50-0 / 102 ter:
//!   <https://www.auto-entrepreneur.fr/statut-auto-entrepreneur/limites/plafonds.html>

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::profile::{Activity, Profile};

/// Thresholds applicable to one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Base VAT franchise threshold: above it, VAT is due from the next year.
    pub low_vat: u32,
    /// Increased VAT threshold: above it, VAT is due immediately.
    pub high_vat: u32,
    /// Yearly revenue cap of the micro-entrepreneur regime.
    pub micro_entrepreneur_cap: u32,
}

/// Sale of goods, catering and lodging.
pub const TRADE_THRESHOLDS: Thresholds = Thresholds {
    low_vat: 82_800,
    high_vat: 91_000,
    micro_entrepreneur_cap: 170_000,
};

/// Services and liberal professions.
pub const SERVICE_THRESHOLDS: Thresholds = Thresholds {
    low_vat: 33_200,
    high_vat: 35_200,
    micro_entrepreneur_cap: 70_000,
};

/// No known activity: nothing to compare against.
pub const NO_THRESHOLDS: Thresholds = Thresholds {
    low_vat: 0,
    high_vat: 0,
    micro_entrepreneur_cap: 0,
};

/// Where a yearly revenue stands relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdLevel {
    /// Thresholds are unknown (no profile or unrecognised activity).
    Unknown,
    Below,
    AboveLowVat,
    AboveHighVat,
    AboveMicroEntrepreneurCap,
}

impl Thresholds {
    pub fn for_activity(activity: Activity) -> Self {
        match activity {
            Activity::Trade => TRADE_THRESHOLDS,
            Activity::Service => SERVICE_THRESHOLDS,
            Activity::Other => NO_THRESHOLDS,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != NO_THRESHOLDS
    }

    /// `(low_vat, high_vat, micro_entrepreneur_cap)`.
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.low_vat, self.high_vat, self.micro_entrepreneur_cap)
    }

    /// Highest threshold strictly exceeded by `revenue`.
    pub fn assess(&self, revenue: Decimal) -> ThresholdLevel {
        if !self.is_known() {
            return ThresholdLevel::Unknown;
        }
        if revenue > Decimal::from(self.micro_entrepreneur_cap) {
            ThresholdLevel::AboveMicroEntrepreneurCap
        } else if revenue > Decimal::from(self.high_vat) {
            ThresholdLevel::AboveHighVat
        } else if revenue > Decimal::from(self.low_vat) {
            ThresholdLevel::AboveLowVat
        } else {
            ThresholdLevel::Below
        }
    }
}

/// Thresholds for a profile; all zero when there is no profile.
pub fn thresholds(profile: Option<&Profile>) -> Thresholds {
    profile
        .map(|p| Thresholds::for_activity(p.activity))
        .unwrap_or(NO_THRESHOLDS)
}
