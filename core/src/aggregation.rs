//! Dashboard metrics over the cached collections.
//!
//! Everything here is a pure function of its inputs and is recomputed
//! on every call. Collections are bounded (tens of thousands of
//! records), so each metric is a single linear scan.

use crate::{
    catalog::{Solution, SolutionFilter},
    clock::ReferenceClock,
    lead::{Lead, LeadStatus},
    subscriber::Subscriber,
    types::Amount,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of leads shown in the overview's recent list.
pub const RECENT_LEADS: usize = 5;

/// Sum of `monthly_amount` over active subscribers.
pub fn monthly_recurring_revenue(subscribers: &[Subscriber]) -> Amount {
    subscribers
        .iter()
        .filter(|s| s.is_active())
        .map(|s| s.monthly_amount)
        .sum()
}

pub fn active_subscriber_count(subscribers: &[Subscriber]) -> usize {
    subscribers.iter().filter(|s| s.is_active()).count()
}

/// Leads whose creation falls on `day` (UTC calendar day).
pub fn leads_created_on(leads: &[Lead], day: NaiveDate) -> usize {
    leads
        .iter()
        .filter(|l| l.created_at.date_naive() == day)
        .count()
}

pub fn leads_created_today(leads: &[Lead], clock: &ReferenceClock) -> usize {
    leads_created_on(leads, clock.today())
}

/// "New this week" as the dashboard has always shown it: the number of
/// leads still in `new`, regardless of age.
pub fn new_leads_this_week(leads: &[Lead]) -> usize {
    leads.iter().filter(|l| l.status == LeadStatus::New).count()
}

/// Lead count per solution. Solutions with no leads are absent.
pub fn leads_by_solution(leads: &[Lead]) -> BTreeMap<Solution, usize> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(lead.solution).or_insert(0) += 1;
    }
    counts
}

/// Leads matching `filter`, in collection order.
pub fn filter_leads(leads: &[Lead], filter: SolutionFilter) -> Vec<&Lead> {
    leads.iter().filter(|l| filter.matches(l.solution)).collect()
}

/// The first `n` leads of a newest-first collection.
pub fn recent_leads(leads: &[Lead], n: usize) -> &[Lead] {
    &leads[..n.min(leads.len())]
}

/// Everything the overview tab renders, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub monthly_recurring_revenue: Amount,
    pub total_subscribers:         usize,
    pub active_subscribers:        usize,
    pub total_leads:               usize,
    pub new_leads_this_week:       usize,
    pub leads_today:               usize,
    pub leads_by_solution:         BTreeMap<Solution, usize>,
    pub recent_leads:              Vec<Lead>,
}

impl DashboardOverview {
    pub fn compute(subscribers: &[Subscriber], leads: &[Lead], clock: &ReferenceClock) -> Self {
        Self {
            monthly_recurring_revenue: monthly_recurring_revenue(subscribers),
            total_subscribers:         subscribers.len(),
            active_subscribers:        active_subscriber_count(subscribers),
            total_leads:               leads.len(),
            new_leads_this_week:       new_leads_this_week(leads),
            leads_today:               leads_created_today(leads, clock),
            leads_by_solution:         leads_by_solution(leads),
            recent_leads:              recent_leads(leads, RECENT_LEADS).to_vec(),
        }
    }
}
