//! Session gate: the boundary check in front of the dashboard.
//!
//! RULE: No dataset or aggregation call is reachable without a Session
//! that a SessionGate has accepted. Dashboard::open enforces this.

use crate::{
    config::OperatorAccount,
    error::{DashError, DashResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub operator: Operator,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(operator: Operator) -> Self {
        Self {
            token: Uuid::new_v4(),
            operator,
            issued_at: Utc::now(),
        }
    }
}

/// Decides whether a session may reach the dashboard core.
pub trait SessionGate: Send + Sync {
    fn authorize(&self, session: &Session) -> DashResult<()>;
}

/// Role allow-list. The default admits staff (admins and doctors).
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Vec<Role>,
}

impl RoleGate {
    pub fn new(allowed: Vec<Role>) -> Self {
        Self { allowed }
    }
}

impl Default for RoleGate {
    fn default() -> Self {
        Self::new(vec![Role::Admin, Role::Doctor])
    }
}

impl SessionGate for RoleGate {
    fn authorize(&self, session: &Session) -> DashResult<()> {
        if self.allowed.contains(&session.operator.role) {
            Ok(())
        } else {
            log::warn!(
                "session denied: operator={} role={:?}",
                session.operator.id,
                session.operator.role
            );
            Err(DashError::Unauthorized {
                reason: format!("role {:?} may not open the dashboard", session.operator.role),
            })
        }
    }
}

/// Known operator logins.
pub struct OperatorDirectory {
    accounts: Vec<OperatorAccount>,
}

impl OperatorDirectory {
    pub fn new(accounts: Vec<OperatorAccount>) -> Self {
        Self { accounts }
    }

    /// Exchange credentials for a fresh session.
    pub fn login(&self, email: &str, password: &str) -> DashResult<Session> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or_else(|| {
                log::warn!("login failed for {email}");
                DashError::Unauthorized { reason: "invalid email or password".into() }
            })?;

        let session = Session::new(Operator {
            id:    account.id.clone(),
            email: account.email.clone(),
            name:  account.name.clone(),
            role:  account.role,
        });
        log::info!("login: operator={} role={:?}", session.operator.id, session.operator.role);
        Ok(session)
    }
}
