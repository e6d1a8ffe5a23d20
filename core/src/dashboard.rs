//! The dashboard: composition root for one operator session.
//!
//! FLOW:
//!   1. A SessionGate accepts the operator's Session.
//!   2. The DatasetStore lazily synthesizes each collection on first read.
//!   3. Aggregations run over the cached snapshot on every request.
//!
//! RULES:
//!   - A Dashboard only exists for an authorized session.
//!   - The store is injected, never global. Several dashboards may share
//!     one store and therefore one snapshot.
//!   - Status strings are parsed before any lookup or write.

use crate::{
    aggregation::{self, DashboardOverview},
    catalog::SolutionFilter,
    clock::ReferenceClock,
    command::{CommandReply, OperatorCommand},
    config::DashConfig,
    error::DashResult,
    lead::{Lead, LeadStatus},
    session::{Operator, Session, SessionGate},
    store::DatasetStore,
    subscriber::Subscriber,
    synthesizer::Synthesizer,
};
use std::sync::Arc;

pub struct Dashboard {
    session: Session,
    store:   Arc<DatasetStore>,
    clock:   ReferenceClock,
}

impl Dashboard {
    /// Open a dashboard for `session`. Fails with `Unauthorized` if the
    /// gate refuses it; in that case nothing touches the store.
    pub fn open(
        session: Session,
        gate: &dyn SessionGate,
        store: Arc<DatasetStore>,
        clock: ReferenceClock,
    ) -> DashResult<Self> {
        gate.authorize(&session)?;
        log::info!(
            "dashboard opened: operator={} role={:?}",
            session.operator.id,
            session.operator.role
        );
        Ok(Self { session, store, clock })
    }

    /// Build the production store: synthesizer source, configured
    /// status policy.
    pub fn build_store(config: &DashConfig, clock: ReferenceClock) -> Arc<DatasetStore> {
        let source = Synthesizer::new(config, clock);
        Arc::new(DatasetStore::new(Box::new(source), config.status_policy))
    }

    pub fn operator(&self) -> &Operator {
        &self.session.operator
    }

    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    pub fn subscribers(&self) -> DashResult<Arc<Vec<Subscriber>>> {
        self.store.subscribers()
    }

    pub fn leads(&self) -> DashResult<Arc<Vec<Lead>>> {
        self.store.leads()
    }

    pub fn filtered_leads(&self, filter: SolutionFilter) -> DashResult<Vec<Lead>> {
        let leads = self.store.leads()?;
        Ok(aggregation::filter_leads(&leads, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn overview(&self) -> DashResult<DashboardOverview> {
        let subscribers = self.store.subscribers()?;
        let leads = self.store.leads()?;
        Ok(DashboardOverview::compute(&subscribers, &leads, &self.clock))
    }

    /// Set a lead's status from its wire label.
    pub fn set_lead_status(&self, lead_id: &str, status: &str) -> DashResult<Lead> {
        let status: LeadStatus = status.parse()?;
        self.store.set_lead_status(lead_id, status)
    }

    pub fn execute(&self, command: OperatorCommand) -> DashResult<CommandReply> {
        log::debug!("operator={} command={command:?}", self.session.operator.id);
        let reply = match command {
            OperatorCommand::GetOverview => CommandReply::Overview {
                overview: self.overview()?,
            },
            OperatorCommand::ListSubscribers => {
                let subscribers = self.subscribers()?.as_ref().clone();
                CommandReply::Subscribers {
                    count: subscribers.len(),
                    subscribers,
                }
            }
            OperatorCommand::ListLeads { solution } => {
                let filter: SolutionFilter = solution.parse()?;
                let leads = self.filtered_leads(filter)?;
                CommandReply::Leads {
                    solution,
                    count: leads.len(),
                    leads,
                }
            }
            OperatorCommand::SetLeadStatus { lead_id, status } => CommandReply::LeadUpdated {
                lead: self.set_lead_status(&lead_id, &status)?,
            },
            OperatorCommand::Quit => CommandReply::Bye,
        };
        Ok(reply)
    }
}
