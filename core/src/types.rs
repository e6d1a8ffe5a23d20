//! Shared primitive types used across the dashboard core.

/// A stable, unique identifier for any record in the dataset.
pub type RecordId = String;

/// Whole currency units. Billing never deals in fractions.
pub type Amount = u64;
