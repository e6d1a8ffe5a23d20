//! Session gate and the operator command surface.

use opsdash_core::{
    command::{CommandReply, OperatorCommand},
    config::DashConfig,
    dashboard::Dashboard,
    error::DashError,
    lead::LeadStatus,
    session::{Operator, OperatorDirectory, Role, RoleGate, Session},
};

fn open_as(email: &str, password: &str) -> Dashboard {
    let config = DashConfig::default_test();
    let clock = config.clock();
    let session = OperatorDirectory::new(config.operators.clone())
        .login(email, password)
        .unwrap();
    let store = Dashboard::build_store(&config, clock);
    Dashboard::open(session, &RoleGate::default(), store, clock).unwrap()
}

#[test]
fn valid_credentials_issue_distinct_sessions() {
    let directory = OperatorDirectory::new(DashConfig::default_test().operators);
    let a = directory.login("admin@1oral.com", "admin123").unwrap();
    let b = directory.login("admin@1oral.com", "admin123").unwrap();
    assert_eq!(a.operator.role, Role::Admin);
    assert_ne!(a.token, b.token, "each login gets its own token");
}

#[test]
fn bad_credentials_are_unauthorized() {
    let directory = OperatorDirectory::new(DashConfig::default_test().operators);
    let err = directory.login("admin@1oral.com", "wrong").unwrap_err();
    assert!(matches!(err, DashError::Unauthorized { .. }), "got {err}");
    assert!(directory.login("nobody@1oral.com", "admin123").is_err());
}

#[test]
fn patients_cannot_open_the_dashboard() {
    let config = DashConfig::default_test();
    let clock = config.clock();
    let store = Dashboard::build_store(&config, clock);
    let patient = Session::new(Operator {
        id: "pt-001".into(),
        email: "patient@example.com".into(),
        name: "Pat Ient".into(),
        role: Role::Patient,
    });

    let err = Dashboard::open(patient, &RoleGate::default(), store.clone(), clock)
        .err()
        .expect("patient must be refused");
    assert!(matches!(err, DashError::Unauthorized { .. }), "got {err}");
    assert!(store.events().is_empty(), "a refused session must not trigger synthesis");
}

#[test]
fn doctors_and_admins_are_admitted() {
    assert_eq!(open_as("admin@1oral.com", "admin123").operator().role, Role::Admin);
    assert_eq!(open_as("dr.smith@1oral.com", "doctor123").operator().role, Role::Doctor);
}

#[test]
fn commands_round_trip_through_json() {
    let dashboard = open_as("admin@1oral.com", "admin123");

    let cmd: OperatorCommand = serde_json::from_str(r#"{"cmd":"get_overview"}"#).unwrap();
    match dashboard.execute(cmd).unwrap() {
        CommandReply::Overview { overview } => {
            assert_eq!(overview.total_subscribers, 200);
            assert_eq!(overview.total_leads, 500);
            assert_eq!(
                overview.monthly_recurring_revenue,
                49 * overview.active_subscribers as u64
            );
        }
        other => panic!("unexpected reply {other:?}"),
    }

    let cmd: OperatorCommand = serde_json::from_str(r#"{"cmd":"list_leads"}"#).unwrap();
    assert_eq!(cmd, OperatorCommand::ListLeads { solution: "all".into() });
    match dashboard.execute(cmd).unwrap() {
        CommandReply::Leads { count, .. } => assert_eq!(count, 500),
        other => panic!("unexpected reply {other:?}"),
    }

    let cmd: OperatorCommand =
        serde_json::from_str(r#"{"cmd":"list_leads","solution":"telehealth"}"#).unwrap();
    match dashboard.execute(cmd).unwrap() {
        CommandReply::Leads { leads, count, .. } => {
            assert_eq!(leads.len(), count);
            assert!(leads.iter().all(|l| l.solution.label() == "telehealth"));
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[test]
fn set_lead_status_command_updates_the_shared_snapshot() {
    let dashboard = open_as("admin@1oral.com", "admin123");
    let target = dashboard.leads().unwrap()[0].clone();

    let reply = dashboard
        .execute(OperatorCommand::SetLeadStatus {
            lead_id: target.id.clone(),
            status:  "lost".into(),
        })
        .unwrap();
    assert!(matches!(reply, CommandReply::LeadUpdated { ref lead } if lead.status == LeadStatus::Lost));

    let refetched = dashboard.leads().unwrap();
    assert_eq!(refetched[0].id, target.id);
    assert_eq!(refetched[0].status, LeadStatus::Lost);

    let err = dashboard
        .execute(OperatorCommand::ListLeads { solution: "flossing".into() })
        .unwrap_err();
    assert!(matches!(err, DashError::InvalidSolution { .. }));
}
