//! Audit log of everything that changes the dataset snapshot.
//!
//! RULE: DatasetStore appends an event for every synthesis and every
//! status write. Events are never removed or rewritten.

use crate::lead::LeadStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every event the store records.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashEvent {
    DatasetSynthesized {
        collection: String,
        source:     String,
        count:      usize,
    },
    LeadStatusChanged {
        lead_id: String,
        from:    LeadStatus,
        to:      LeadStatus,
    },
    LeadStatusRejected {
        lead_id:   String,
        requested: LeadStatus,
        reason:    String,
    },
}

impl DashEvent {
    /// Stable string name for the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            DashEvent::DatasetSynthesized { .. } => "dataset_synthesized",
            DashEvent::LeadStatusChanged { .. }  => "lead_status_changed",
            DashEvent::LeadStatusRejected { .. } => "lead_status_rejected",
        }
    }
}

/// An event as stored in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:         u64,
    pub recorded_at: DateTime<Utc>,
    pub event_type:  String,
    pub payload:     String, // JSON-serialized DashEvent
}
