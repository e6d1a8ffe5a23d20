use crate::{
    clock::ReferenceClock,
    lead::StatusPolicy,
    rng::{GeneratorKind, RngBank},
    session::Role,
    types::Amount,
};
use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A login the operator directory accepts. Demo-grade: passwords are
/// compared in plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorAccount {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub subscriber_seed: u64,
    pub lead_seed: u64,
    pub subscriber_count: usize,
    pub lead_count: usize,
    /// Upper bound on any single requested collection size.
    pub max_records: usize,
    pub monthly_amount: Amount,
    pub generator: GeneratorKind,
    pub status_policy: StatusPolicy,
    /// Pinned "now" for synthesis and day metrics. `None` captures the
    /// system time when the dataset is opened.
    pub reference_time: Option<DateTime<Utc>>,
    pub operators: Vec<OperatorAccount>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            subscriber_seed:  12345,
            lead_seed:        67890,
            subscriber_count: 30_000,
            lead_count:       500,
            max_records:      100_000,
            monthly_amount:   crate::subscriber::DEFAULT_MONTHLY_AMOUNT,
            generator:        GeneratorKind::Lcg,
            status_policy:    StatusPolicy::Permissive,
            reference_time:   None,
            operators:        demo_operators(),
        }
    }
}

impl DashConfig {
    /// Load from `{data_dir}/dashboard.json`. Missing keys take their
    /// defaults.
    /// In tests, use DashConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard.json");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {path}"))?;
        let config: DashConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse {path}"))?;
        if config.max_records == 0 {
            anyhow::bail!("{path}: max_records must be > 0");
        }
        Ok(config)
    }

    /// Small, fully pinned config for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            subscriber_count: 200,
            lead_count:       500,
            reference_time:   Utc.with_ymd_and_hms(2026, 2, 8, 18, 0, 0).single(),
            ..Self::default()
        }
    }

    pub fn clock(&self) -> ReferenceClock {
        match self.reference_time {
            Some(now) => ReferenceClock::fixed(now),
            None => ReferenceClock::system(),
        }
    }

    pub fn rng_bank(&self) -> RngBank {
        RngBank::new(self.generator, self.subscriber_seed, self.lead_seed)
    }
}

fn demo_operators() -> Vec<OperatorAccount> {
    vec![
        OperatorAccount {
            id:       "admin-001".into(),
            email:    "admin@1oral.com".into(),
            password: "admin123".into(),
            name:     "Admin User".into(),
            role:     Role::Admin,
        },
        OperatorAccount {
            id:       "dr-001".into(),
            email:    "dr.smith@1oral.com".into(),
            password: "doctor123".into(),
            name:     "Dr. John Smith".into(),
            role:     Role::Doctor,
        },
    ]
}
