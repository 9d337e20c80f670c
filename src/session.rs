//! In-memory session: bearer token plus the cached user object.
//!
//! Nothing is persisted; a page reload (process restart) starts signed
//! out. The store is shared between the API client (token injection,
//! 401 invalidation) and the route guard.

use std::sync::RwLock;

use crate::models::enums::Role;
use crate::models::User;

/// What the route guard decides for a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Shared authentication state. Wrap in an `Arc` to share with the client.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh token and user after login.
    pub fn establish(&self, token: impl Into<String>, user: User) {
        let mut state = write_lock(&self.inner);
        state.token = Some(token.into());
        state.user = Some(user);
    }

    /// Drop the session. Called on logout and on any 401 response.
    pub fn clear(&self) {
        let mut state = write_lock(&self.inner);
        state.token = None;
        state.user = None;
    }

    pub fn token(&self) -> Option<String> {
        read_lock(&self.inner).token.clone()
    }

    pub fn user(&self) -> Option<User> {
        read_lock(&self.inner).user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        read_lock(&self.inner).token.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        read_lock(&self.inner)
            .user
            .as_ref()
            .is_some_and(|u| u.has_role(role))
    }

    /// Gate a route: unauthenticated users and users missing the required
    /// role are both sent back to login.
    pub fn guard(&self, required: Option<Role>) -> RouteDecision {
        if !self.is_authenticated() {
            return RouteDecision::RedirectToLogin;
        }
        match required {
            Some(role) if !self.has_role(role) => RouteDecision::RedirectToLogin,
            _ => RouteDecision::Allow,
        }
    }
}

/// Landing path for a role after login.
pub fn dashboard_route(role: Role) -> &'static str {
    match role {
        Role::Patient => "/patient",
        Role::Doctor => "/doctor",
        Role::Admin => "/admin",
    }
}

// The state is a plain token/user pair and stays valid even if a holder
// panicked, so a poisoned lock is recovered, not propagated.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_user() -> User {
        serde_json::from_str(
            r#"{"id": 1, "username": "asha", "roles": ["ROLE_PATIENT"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn starts_signed_out() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert_eq!(store.guard(None), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn establish_then_clear() {
        let store = SessionStore::new();
        store.establish("jwt-abc", patient_user());
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("jwt-abc"));
        assert_eq!(store.user().unwrap().username, "asha");

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn guard_checks_role() {
        let store = SessionStore::new();
        store.establish("jwt-abc", patient_user());

        assert_eq!(store.guard(None), RouteDecision::Allow);
        assert_eq!(store.guard(Some(Role::Patient)), RouteDecision::Allow);
        // Wrong role redirects rather than erroring.
        assert_eq!(
            store.guard(Some(Role::Admin)),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn dashboard_routes_per_role() {
        assert_eq!(dashboard_route(Role::Patient), "/patient");
        assert_eq!(dashboard_route(Role::Doctor), "/doctor");
        assert_eq!(dashboard_route(Role::Admin), "/admin");
    }
}
