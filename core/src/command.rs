use crate::{aggregation::DashboardOverview, lead::Lead, subscriber::Subscriber};
use serde::{Deserialize, Serialize};

/// All operator-issued commands.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum OperatorCommand {
    GetOverview,
    ListSubscribers,
    ListLeads {
        /// A solution label or `all`.
        #[serde(default = "all_solutions")]
        solution: String,
    },
    SetLeadStatus {
        lead_id: String,
        status:  String,
    },
    Quit,
}

fn all_solutions() -> String {
    "all".into()
}

/// What the dashboard sends back for each command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum CommandReply {
    Overview {
        overview: DashboardOverview,
    },
    Subscribers {
        count:       usize,
        subscribers: Vec<Subscriber>,
    },
    Leads {
        solution: String,
        count:    usize,
        leads:    Vec<Lead>,
    },
    LeadUpdated {
        lead: Lead,
    },
    Bye,
}
