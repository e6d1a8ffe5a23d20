use crate::{
    catalog::{email_domains, lead_sources, Solution},
    clock::ReferenceClock,
    error::{DashError, DashResult},
    name_generator::NameGenerator,
    rng::RandomSource,
    types::RecordId,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive range of days before "now" a lead may have been created.
pub const CREATED_DAYS_AGO: (u64, u64) = (0, 29);

/// Probability that a synthesized lead left a phone number.
pub const PHONE_PROBABILITY: f64 = 0.6;

/// Cumulative thresholds for the status roll.
const STATUS_THRESHOLDS: [(f64, LeadStatus); 5] = [
    (0.40, LeadStatus::New),
    (0.65, LeadStatus::Contacted),
    (0.80, LeadStatus::Qualified),
    (0.95, LeadStatus::Converted),
    (1.00, LeadStatus::Lost),
];

/// Pipeline position of a lead.
///
/// Forward path is `new -> contacted -> qualified -> converted`; `lost`
/// is reachable from any non-terminal state. `converted` and `lost`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::New       => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Converted => "converted",
            Self::Lost      => "lost",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converted | Self::Lost)
    }

    /// Whether the pipeline allows moving from `self` to `next`.
    /// Staying put is always allowed.
    pub fn can_transition_to(&self, next: LeadStatus) -> bool {
        use LeadStatus::*;
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        matches!(
            (*self, next),
            (New, Contacted)
                | (Contacted, Qualified)
                | (Qualified, Converted)
                | (New | Contacted | Qualified, Lost)
        )
    }

    /// Inverse-CDF over one uniform roll.
    pub fn from_roll(roll: f64) -> Self {
        STATUS_THRESHOLDS
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|(_, status)| *status)
            .unwrap_or(LeadStatus::Lost)
    }

    /// Canned operator notes for leads that have been worked.
    fn notes(&self) -> &'static [&'static str] {
        match self {
            Self::New => &[],
            Self::Contacted => &[
                "Interested, asked about pricing",
                "Left voicemail, awaiting callback",
                "Requested product brochure",
            ],
            Self::Qualified => &[
                "Ready to start, wants onboarding call",
                "Chronic issues, strong fit",
                "Used smile simulator, very interested",
            ],
            Self::Converted => &[
                "Converted to subscription",
                "Signed up after consult",
            ],
            Self::Lost => &[
                "No dentist in their area",
                "Chose another provider",
                "Unresponsive after follow-ups",
            ],
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadStatus {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| DashError::InvalidStatus { value: s.to_string() })
    }
}

/// How status writes are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Any status may be set from any other.
    #[default]
    Permissive,
    /// Only pipeline transitions are accepted.
    Strict,
}

impl StatusPolicy {
    pub fn check(&self, lead_id: &str, from: LeadStatus, to: LeadStatus) -> DashResult<()> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict if from.can_transition_to(to) => Ok(()),
            Self::Strict => Err(DashError::IllegalTransition {
                lead_id: lead_id.to_string(),
                from:    from.to_string(),
                to:      to.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: RecordId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub solution: Solution,
    pub status: LeadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Builds the lead population.
///
/// Draw order per record (fixed; reordering changes every dataset):
///   1. first name
///   2. last name
///   3. email domain
///   4. solution
///   5. status roll
///   6. days since creation
///   7. phone presence
///   8. phone line number (phone present only)
///   9. acquisition source
///  10. note (status other than `new` only)
///
/// Creation time is `now` minus a whole number of days, so a lead drawn
/// with offset 0 always falls on today. Ids follow generation order. The
/// finished collection is then sorted newest first; the sort is stable so
/// equal timestamps keep id order.
pub struct LeadSynthesizer {
    clock: ReferenceClock,
}

impl LeadSynthesizer {
    pub fn new(clock: ReferenceClock) -> Self {
        Self { clock }
    }

    pub fn synthesize<R: RandomSource>(&self, rng: &mut R, count: usize) -> Vec<Lead> {
        let mut leads = Vec::with_capacity(count);
        for i in 0..count {
            leads.push(self.build_one(rng, i));
        }
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }

    fn build_one<R: RandomSource>(&self, rng: &mut R, index: usize) -> Lead {
        let first = NameGenerator::generate_first_name(rng);
        let last = NameGenerator::generate_last_name(rng);
        let domain = *rng.pick(email_domains());
        let solution = *rng.pick(&Solution::ALL);
        let status = LeadStatus::from_roll(rng.next_f64());
        let days_ago = rng.uniform_int(CREATED_DAYS_AGO.0, CREATED_DAYS_AGO.1);

        let phone = if rng.chance(PHONE_PROBABILITY) {
            Some(format!("555-{:04}", rng.uniform_int(0, 9999)))
        } else {
            None
        };
        let source = (*rng.pick(lead_sources())).to_string();
        let notes = match status.notes() {
            [] => None,
            table => Some((*rng.pick(table)).to_string()),
        };

        let created_at = self.clock.now() - Duration::days(days_ago as i64);

        Lead {
            id: format!("lead-{:04}", index + 1),
            email: NameGenerator::short_email(first, last, domain),
            name: Some(format!("{first} {last}")),
            phone,
            solution,
            status,
            source: Some(source),
            notes,
            created_at,
            updated_at: created_at,
        }
    }
}
