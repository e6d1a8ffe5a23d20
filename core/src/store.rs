//! Dataset cache: the one place the record collections live.
//!
//! RULE: Each collection is built once, on first access, and kept for
//! the life of the store. There is no invalidation path.
//! Readers get an `Arc` snapshot; a status write copies the lead
//! collection if any reader still holds the old snapshot.

use crate::{
    error::{DashError, DashResult},
    event::{DashEvent, EventLogEntry},
    lead::{Lead, LeadStatus, StatusPolicy},
    source::DatasetSource,
    subscriber::Subscriber,
};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct DatasetStore {
    source:      Box<dyn DatasetSource>,
    policy:      StatusPolicy,
    subscribers: Mutex<Option<Arc<Vec<Subscriber>>>>,
    leads:       Mutex<Option<Arc<Vec<Lead>>>>,
    events:      Mutex<Vec<EventLogEntry>>,
}

impl DatasetStore {
    pub fn new(source: Box<dyn DatasetSource>, policy: StatusPolicy) -> Self {
        Self {
            source,
            policy,
            subscribers: Mutex::new(None),
            leads:       Mutex::new(None),
            events:      Mutex::new(Vec::new()),
        }
    }

    // ── Subscribers ────────────────────────────────────────────

    /// The subscriber snapshot. Synthesizes on first call only.
    pub fn subscribers(&self) -> DashResult<Arc<Vec<Subscriber>>> {
        let mut slot = lock(&self.subscribers);
        if let Some(cached) = slot.as_ref() {
            log::debug!("store: subscribers cache hit ({} records)", cached.len());
            return Ok(Arc::clone(cached));
        }
        let built = Arc::new(self.source.subscribers()?);
        self.record(DashEvent::DatasetSynthesized {
            collection: "subscribers".into(),
            source:     self.source.name().into(),
            count:      built.len(),
        })?;
        *slot = Some(Arc::clone(&built));
        Ok(built)
    }

    // ── Leads ──────────────────────────────────────────────────

    /// The lead snapshot, newest first. Synthesizes on first call only.
    pub fn leads(&self) -> DashResult<Arc<Vec<Lead>>> {
        let mut slot = lock(&self.leads);
        let leads = self.ensure_leads(&mut slot)?;
        Ok(Arc::clone(leads))
    }

    /// Overwrite one lead's status. Nothing else about the lead or the
    /// collection changes, including order and `updated_at`.
    /// Concurrent writers are last-writer-wins.
    pub fn set_lead_status(&self, lead_id: &str, status: LeadStatus) -> DashResult<Lead> {
        let mut slot = lock(&self.leads);
        let leads = self.ensure_leads(&mut slot)?;

        let index = leads
            .iter()
            .position(|l| l.id == lead_id)
            .ok_or_else(|| DashError::LeadNotFound { lead_id: lead_id.to_string() })?;

        let from = leads[index].status;
        if let Err(e) = self.policy.check(lead_id, from, status) {
            log::warn!("store: rejected {lead_id} {from} -> {status}: {e}");
            self.record(DashEvent::LeadStatusRejected {
                lead_id:   lead_id.to_string(),
                requested: status,
                reason:    e.to_string(),
            })?;
            return Err(e);
        }
        if from == status {
            return Ok(leads[index].clone());
        }

        let lead = &mut Arc::make_mut(leads)[index];
        lead.status = status;
        let updated = lead.clone();

        log::debug!("store: lead {lead_id} {from} -> {status}");
        self.record(DashEvent::LeadStatusChanged {
            lead_id: lead_id.to_string(),
            from,
            to: status,
        })?;
        Ok(updated)
    }

    fn ensure_leads<'a>(
        &self,
        slot: &'a mut MutexGuard<'_, Option<Arc<Vec<Lead>>>>,
    ) -> DashResult<&'a mut Arc<Vec<Lead>>> {
        if slot.is_none() {
            let built = self.source.leads()?;
            self.record(DashEvent::DatasetSynthesized {
                collection: "leads".into(),
                source:     self.source.name().into(),
                count:      built.len(),
            })?;
            **slot = Some(Arc::new(built));
        } else {
            log::debug!("store: leads cache hit");
        }
        match (**slot).as_mut() {
            Some(leads) => Ok(leads),
            None => Err(anyhow::anyhow!("lead collection missing after load").into()),
        }
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn events(&self) -> Vec<EventLogEntry> {
        lock(&self.events).clone()
    }

    fn record(&self, event: DashEvent) -> DashResult<()> {
        let mut events = lock(&self.events);
        let entry = EventLogEntry {
            seq:         events.len() as u64 + 1,
            recorded_at: Utc::now(),
            event_type:  event.type_name().to_string(),
            payload:     serde_json::to_string(&event)?,
        };
        events.push(entry);
        Ok(())
    }
}

/// Poisoned locks are recovered; snapshots are only ever swapped whole.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
