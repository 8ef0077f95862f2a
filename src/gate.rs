// SPDX-License-Identifier: MIT

//! The authorization gate every protected screen consults.
//!
//! The gate is a read-only query layer over the session store plus the
//! static privilege map. Decisions are recomputed fresh on every call (the
//! token can expire between renders) and the gate itself never writes
//! session state.

use std::sync::Arc;

use chrono::Utc;

use crate::models::Role;
use crate::session::SessionStore;

/// Outcome of a guard check. There is no fourth outcome: every failure in
/// the session subsystem collapses into one of the two redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected screen.
    Render,
    /// Not authenticated (missing, malformed, or expired credential).
    RedirectToLogin,
    /// Authenticated but lacking the required role; the 403 view.
    RedirectToHome,
}

/// Read-only authorization queries over the current session.
#[derive(Clone)]
pub struct AuthorizationGate {
    session: Arc<SessionStore>,
}

impl AuthorizationGate {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Whether a Principal is published and its token has not expired at
    /// the moment of the call.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated_role().is_some()
    }

    /// Role of the current Principal, or `None` when unauthenticated
    /// (including an expired token still sitting in memory).
    pub fn role_of(&self) -> Option<Role> {
        self.authenticated_role()
    }

    /// Exact-match role check. Deliberately non-hierarchical: a screen that
    /// admits several roles must check each one.
    pub fn has_role(&self, role: Role) -> bool {
        self.authenticated_role() == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_staff(&self) -> bool {
        self.has_role(Role::Staff)
    }

    pub fn is_co_owner(&self) -> bool {
        self.has_role(Role::CoOwner)
    }

    pub fn is_technician(&self) -> bool {
        self.has_role(Role::Technician)
    }

    /// The decision every protected screen makes before rendering.
    pub fn guard(&self, required: impl Fn(Role) -> bool) -> GateDecision {
        match self.authenticated_role() {
            None => GateDecision::RedirectToLogin,
            Some(role) if required(role) => GateDecision::Render,
            Some(_) => GateDecision::RedirectToHome,
        }
    }

    /// Guard by route prefix through the static privilege map.
    pub fn guard_path(&self, path: &str) -> GateDecision {
        self.guard(|role| role.may_access(path))
    }

    fn authenticated_role(&self) -> Option<Role> {
        let principal = self.session.current_principal()?;
        if principal.is_expired_at(Utc::now().timestamp()) {
            return None;
        }
        Some(principal.role)
    }
}
