//! Business profile of the user issuing documents.
//!
//! Pure domain logic: whether the profile is complete enough to legally issue
//! quotations/invoices, and which regulatory revenue thresholds apply to it.

pub mod profile;
pub mod thresholds;

pub use profile::{Activity, Profile, ensure_profile_valid, is_profile_valid};
pub use thresholds::{ThresholdLevel, Thresholds, thresholds};
