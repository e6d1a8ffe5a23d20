use crate::{
    catalog::{email_domains, Solution},
    clock::ReferenceClock,
    name_generator::NameGenerator,
    rng::RandomSource,
    types::{Amount, RecordId},
};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat monthly price. Every plan bills the same amount.
pub const DEFAULT_MONTHLY_AMOUNT: Amount = 49;

/// Inclusive range of months a synthesized subscription has been running.
pub const START_MONTHS_AGO: (u64, u64) = (1, 18);

/// Inclusive range of billed months for a cancelled subscription.
pub const CANCELLED_BILLED_MONTHS: (u64, u64) = (1, 6);

/// Cumulative thresholds for the status roll: 85% active, 10% paused,
/// 5% cancelled.
const STATUS_THRESHOLDS: [(f64, SubscriberStatus); 3] = [
    (0.85, SubscriberStatus::Active),
    (0.95, SubscriberStatus::Paused),
    (1.00, SubscriberStatus::Cancelled),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active    => "active",
            Self::Paused    => "paused",
            Self::Cancelled => "cancelled",
        }
    }

    /// Inverse-CDF over one uniform roll.
    pub fn from_roll(roll: f64) -> Self {
        STATUS_THRESHOLDS
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|(_, status)| *status)
            .unwrap_or(SubscriberStatus::Cancelled)
    }
}

impl fmt::Display for SubscriberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: RecordId,
    pub email: String,
    pub name: String,
    pub plan: String,
    pub status: SubscriberStatus,
    pub solution: Solution,
    pub start_date: NaiveDate,
    /// `None` means "not applicable" and is only used for cancelled
    /// subscriptions.
    pub next_billing_date: Option<NaiveDate>,
    pub monthly_amount: Amount,
    pub total_spent: Amount,
}

impl Subscriber {
    pub fn is_active(&self) -> bool {
        self.status == SubscriberStatus::Active
    }

    pub fn next_billing_label(&self) -> String {
        self.next_billing_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".into())
    }
}

/// Builds the subscriber population.
///
/// Draw order per record (fixed; reordering changes every dataset):
///   1. first name
///   2. last name
///   3. email domain
///   4. solution
///   5. status roll
///   6. months since start
///   7. billed months (cancelled only)
pub struct SubscriberSynthesizer {
    monthly_amount: Amount,
    clock:          ReferenceClock,
}

impl SubscriberSynthesizer {
    pub fn new(monthly_amount: Amount, clock: ReferenceClock) -> Self {
        Self { monthly_amount, clock }
    }

    pub fn synthesize<R: RandomSource>(&self, rng: &mut R, count: usize) -> Vec<Subscriber> {
        let mut subscribers = Vec::with_capacity(count);
        for i in 0..count {
            subscribers.push(self.build_one(rng, i));
        }
        subscribers
    }

    fn build_one<R: RandomSource>(&self, rng: &mut R, index: usize) -> Subscriber {
        let first = NameGenerator::generate_first_name(rng);
        let last = NameGenerator::generate_last_name(rng);
        let domain = *rng.pick(email_domains());
        let solution = *rng.pick(&Solution::ALL);
        let status = SubscriberStatus::from_roll(rng.next_f64());
        let months_running = rng.uniform_int(START_MONTHS_AGO.0, START_MONTHS_AGO.1);

        let today = self.clock.today();
        let start_date = shift_months(today, months_running, Direction::Back);

        let (next_billing_date, total_spent) = match status {
            SubscriberStatus::Cancelled => {
                let billed = rng.uniform_int(CANCELLED_BILLED_MONTHS.0, CANCELLED_BILLED_MONTHS.1);
                (None, self.monthly_amount * billed)
            }
            SubscriberStatus::Active | SubscriberStatus::Paused => (
                Some(shift_months(start_date, months_running + 1, Direction::Forward)),
                self.monthly_amount * months_running,
            ),
        };

        Subscriber {
            id: format!("sub-{:05}", index + 1),
            email: NameGenerator::full_email(first, last, domain),
            name: format!("{first} {last}"),
            plan: solution.plan_name().to_string(),
            status,
            solution,
            start_date,
            next_billing_date,
            monthly_amount: self.monthly_amount,
            total_spent,
        }
    }
}

enum Direction {
    Back,
    Forward,
}

/// Calendar-month shift, clamping to the last day of shorter months.
fn shift_months(date: NaiveDate, months: u64, direction: Direction) -> NaiveDate {
    let months = Months::new(months as u32);
    let shifted = match direction {
        Direction::Back    => date.checked_sub_months(months),
        Direction::Forward => date.checked_add_months(months),
    };
    // Only fails at the edges of chrono's representable range.
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roll_follows_cumulative_thresholds() {
        assert_eq!(SubscriberStatus::from_roll(0.0), SubscriberStatus::Active);
        assert_eq!(SubscriberStatus::from_roll(0.8499), SubscriberStatus::Active);
        assert_eq!(SubscriberStatus::from_roll(0.85), SubscriberStatus::Paused);
        assert_eq!(SubscriberStatus::from_roll(0.9499), SubscriberStatus::Paused);
        assert_eq!(SubscriberStatus::from_roll(0.95), SubscriberStatus::Cancelled);
        assert_eq!(SubscriberStatus::from_roll(0.9999), SubscriberStatus::Cancelled);
    }

    #[test]
    fn month_shift_clamps_to_month_end() {
        let may_31 = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
        assert_eq!(
            shift_months(may_31, 3, Direction::Back),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }
}
