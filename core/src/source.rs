//! Dataset source trait.
//!
//! RULE: DatasetStore never builds records itself. It asks a
//! DatasetSource exactly once per collection and keeps the answer.
//! Tests swap in their own source to bypass real synthesis.

use crate::{error::DashResult, lead::Lead, subscriber::Subscriber};

/// The contract every dataset source must fulfill.
pub trait DatasetSource: Send + Sync {
    /// Stable name, recorded in the audit log.
    fn name(&self) -> &'static str;

    /// The full subscriber collection, in id order.
    fn subscribers(&self) -> DashResult<Vec<Subscriber>>;

    /// The full lead collection, newest first.
    fn leads(&self) -> DashResult<Vec<Lead>>;
}
