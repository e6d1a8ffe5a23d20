//! Static reference tables shared by both synthesizers.
//!
//! Table ORDER is part of the deterministic output: a draw selects by
//! index, so reordering or inserting entries changes every generated
//! dataset. Append only.

use crate::error::{DashError, DashResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six service offerings a subscriber or lead belongs to.
/// Declaration order is the display and grouping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Solution {
    Cavities,
    Whitening,
    Breath,
    DrillFree,
    Telehealth,
    Biotest,
}

impl Solution {
    pub const ALL: [Solution; 6] = [
        Solution::Cavities,
        Solution::Whitening,
        Solution::Breath,
        Solution::DrillFree,
        Solution::Telehealth,
        Solution::Biotest,
    ];

    /// Wire label, e.g. `drill-free`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cavities   => "cavities",
            Self::Whitening  => "whitening",
            Self::Breath     => "breath",
            Self::DrillFree  => "drill-free",
            Self::Telehealth => "telehealth",
            Self::Biotest    => "biotest",
        }
    }

    /// Subscription plan sold under this solution.
    pub fn plan_name(&self) -> &'static str {
        match self {
            Self::Cavities   => "Cavity Prevention",
            Self::Whitening  => "Whitening System",
            Self::Breath     => "Fresh Breath Protocol",
            Self::DrillFree  => "Drill-Free Care",
            Self::Telehealth => "Telehealth Membership",
            Self::Biotest    => "BioTest Kit",
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Solution {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        Solution::ALL
            .into_iter()
            .find(|sol| sol.label() == s)
            .ok_or_else(|| DashError::InvalidSolution { value: s.to_string() })
    }
}

/// Lead filter as selected in the leads view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolutionFilter {
    #[default]
    All,
    Only(Solution),
}

impl SolutionFilter {
    pub fn matches(&self, solution: Solution) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == solution,
        }
    }
}

impl FromStr for SolutionFilter {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

pub fn email_domains() -> &'static [&'static str] {
    &[
        "gmail.com", "yahoo.com", "outlook.com", "icloud.com", "hotmail.com",
        "aol.com", "proton.me", "live.com", "msn.com", "comcast.net",
    ]
}

/// Where a lead came in from.
pub fn lead_sources() -> &'static [&'static str] {
    &["Quiz", "Smile Simulator", "Telehealth Consult", "Direct", "Referral"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_labels_round_trip_through_from_str() {
        for sol in Solution::ALL {
            assert_eq!(sol.label().parse::<Solution>().unwrap(), sol);
        }
        assert!("flossing".parse::<Solution>().is_err());
    }

    #[test]
    fn serde_uses_wire_labels() {
        let json = serde_json::to_string(&Solution::DrillFree).unwrap();
        assert_eq!(json, "\"drill-free\"");
    }

    #[test]
    fn filter_parses_all_sentinel() {
        assert_eq!("all".parse::<SolutionFilter>().unwrap(), SolutionFilter::All);
        assert_eq!(
            "breath".parse::<SolutionFilter>().unwrap(),
            SolutionFilter::Only(Solution::Breath)
        );
        assert!(SolutionFilter::All.matches(Solution::Biotest));
        assert!(!SolutionFilter::Only(Solution::Breath).matches(Solution::Biotest));
    }
}
