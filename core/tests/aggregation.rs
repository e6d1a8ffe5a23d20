//! Dashboard metrics over hand-built and synthesized collections.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use opsdash_core::{
    aggregation::{self, DashboardOverview},
    catalog::{Solution, SolutionFilter},
    clock::ReferenceClock,
    config::DashConfig,
    lead::{Lead, LeadStatus},
    subscriber::{Subscriber, SubscriberStatus},
    synthesizer::Synthesizer,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn subscriber(id: &str, status: SubscriberStatus) -> Subscriber {
    Subscriber {
        id: id.into(),
        email: format!("{id}@example.com"),
        name: "Test Subscriber".into(),
        plan: Solution::Cavities.plan_name().into(),
        status,
        solution: Solution::Cavities,
        start_date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
        next_billing_date: match status {
            SubscriberStatus::Cancelled => None,
            _ => NaiveDate::from_ymd_opt(2026, 2, 15),
        },
        monthly_amount: 49,
        total_spent: 147,
    }
}

fn lead(id: &str, solution: Solution, status: LeadStatus, created_at: DateTime<Utc>) -> Lead {
    Lead {
        id: id.into(),
        email: format!("{id}@example.com"),
        name: None,
        phone: None,
        solution,
        status,
        source: Some("Quiz".into()),
        notes: None,
        created_at,
        updated_at: created_at,
    }
}

fn sample_leads() -> Vec<Lead> {
    vec![
        lead("lead-010", Solution::Cavities, LeadStatus::New, at(2026, 2, 8, 17, 30)),
        lead("lead-007", Solution::Cavities, LeadStatus::New, at(2026, 2, 8, 0, 0)),
        lead("lead-004", Solution::DrillFree, LeadStatus::New, at(2026, 2, 7, 23, 59)),
        lead("lead-002", Solution::Whitening, LeadStatus::Contacted, at(2026, 2, 7, 10, 15)),
        lead("lead-003", Solution::Breath, LeadStatus::Qualified, at(2026, 2, 6, 16, 45)),
        lead("lead-009", Solution::DrillFree, LeadStatus::Lost, at(2026, 2, 3, 11, 0)),
    ]
}

fn clock() -> ReferenceClock {
    ReferenceClock::fixed(at(2026, 2, 8, 18, 0))
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn mrr_counts_only_active_subscribers() {
    let subs = vec![
        subscriber("sub-001", SubscriberStatus::Active),
        subscriber("sub-002", SubscriberStatus::Active),
        subscriber("sub-003", SubscriberStatus::Paused),
        subscriber("sub-004", SubscriberStatus::Active),
        subscriber("sub-005", SubscriberStatus::Cancelled),
    ];
    assert_eq!(aggregation::monthly_recurring_revenue(&subs), 147);
    assert_eq!(aggregation::active_subscriber_count(&subs), 3);
}

#[test]
fn mrr_matches_active_sum_on_synthesized_data() {
    let config = DashConfig::default_test();
    let subs = Synthesizer::new(&config, config.clock())
        .synthesize_subscribers(3_000)
        .unwrap();
    let expected: u64 = subs
        .iter()
        .filter(|s| s.status == SubscriberStatus::Active)
        .map(|s| s.monthly_amount)
        .sum();
    assert_eq!(aggregation::monthly_recurring_revenue(&subs), expected);
    assert_eq!(
        aggregation::monthly_recurring_revenue(&subs),
        49 * aggregation::active_subscriber_count(&subs) as u64
    );
}

#[test]
fn leads_today_uses_utc_calendar_day() {
    let leads = sample_leads();
    // 00:00 counts as today, 23:59 the evening before does not.
    assert_eq!(aggregation::leads_created_today(&leads, &clock()), 2);
    assert_eq!(
        aggregation::leads_created_on(&leads, NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()),
        2
    );
}

#[test]
fn new_this_week_is_the_new_status_count() {
    let leads = sample_leads();
    assert_eq!(aggregation::new_leads_this_week(&leads), 3);
}

#[test]
fn grouping_omits_empty_solutions_and_sums_to_total() {
    let leads = sample_leads();
    let groups = aggregation::leads_by_solution(&leads);

    assert_eq!(groups.get(&Solution::Cavities), Some(&2));
    assert_eq!(groups.get(&Solution::DrillFree), Some(&2));
    assert_eq!(groups.get(&Solution::Whitening), Some(&1));
    assert_eq!(groups.get(&Solution::Breath), Some(&1));
    assert!(!groups.contains_key(&Solution::Telehealth), "empty solution must be absent");
    assert!(!groups.contains_key(&Solution::Biotest), "empty solution must be absent");
    assert_eq!(groups.values().sum::<usize>(), leads.len());
}

#[test]
fn grouping_sums_to_total_on_synthesized_data() {
    let config = DashConfig::default_test();
    let leads = Synthesizer::new(&config, config.clock())
        .synthesize_leads(500)
        .unwrap();
    let groups = aggregation::leads_by_solution(&leads);
    assert_eq!(groups.values().sum::<usize>(), 500);
    assert!(groups.values().all(|&n| n > 0));
}

#[test]
fn filter_by_solution_keeps_only_matches_in_order() {
    let leads = sample_leads();
    let drill_free = aggregation::filter_leads(&leads, SolutionFilter::Only(Solution::DrillFree));
    let ids: Vec<&str> = drill_free.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["lead-004", "lead-009"]);

    let none = aggregation::filter_leads(&leads, SolutionFilter::Only(Solution::Biotest));
    assert!(none.is_empty());
}

#[test]
fn filter_all_returns_everything_unchanged() {
    let leads = sample_leads();
    let all: Vec<Lead> = aggregation::filter_leads(&leads, SolutionFilter::All)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(all, leads);
}

#[test]
fn recent_leads_caps_at_collection_length() {
    let leads = sample_leads();
    assert_eq!(aggregation::recent_leads(&leads, 5).len(), 5);
    assert_eq!(aggregation::recent_leads(&leads, 50).len(), leads.len());
    assert_eq!(aggregation::recent_leads(&leads, 5)[0].id, "lead-010");
}

#[test]
fn overview_bundles_every_metric() {
    let subs = vec![
        subscriber("sub-001", SubscriberStatus::Active),
        subscriber("sub-002", SubscriberStatus::Active),
        subscriber("sub-003", SubscriberStatus::Active),
        subscriber("sub-004", SubscriberStatus::Paused),
        subscriber("sub-005", SubscriberStatus::Cancelled),
    ];
    let leads = sample_leads();
    let overview = DashboardOverview::compute(&subs, &leads, &clock());

    assert_eq!(overview.monthly_recurring_revenue, 147);
    assert_eq!(overview.total_subscribers, 5);
    assert_eq!(overview.active_subscribers, 3);
    assert_eq!(overview.total_leads, 6);
    assert_eq!(overview.new_leads_this_week, 3);
    assert_eq!(overview.leads_today, 2);
    assert_eq!(overview.recent_leads.len(), 5);

    let json = serde_json::to_value(&overview).unwrap();
    assert_eq!(json["monthlyRecurringRevenue"], 147);
    assert_eq!(json["leadsBySolution"]["drill-free"], 2);
}
