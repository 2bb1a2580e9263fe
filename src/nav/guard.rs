//! Auth-driven navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps unauthenticated users out of protected screens and authenticated
//! users off the login/register screens, without any screen repeating the
//! policy. [`decide`] is the whole policy as a pure function; [`NavGuard`]
//! wires it to the auth session and the router.
//!
//! While the session is loading, the shell shows a placeholder and the
//! guard makes no decision, which prevents a flash of the wrong screen
//! between process start and session restore.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use crate::state::auth::{AuthSession, AuthSnapshot};

/// Where unauthenticated users are sent.
pub const LOGIN_ROUTE: &str = "/login";
/// Default landing for authenticated users.
pub const LANDING_ROUTE: &str = "/home";
/// Top-level segments reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["login", "register", "not-found"];

/// Outcome of one guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Leave the user where they are.
    Stay,
    /// Replace the current route with the target.
    Redirect(&'static str),
}

/// First path segment of `path`, `None` for the root.
#[must_use]
pub fn top_level_segment(path: &str) -> Option<&str> {
    path.trim_start_matches('/').split('/').next().filter(|s| !s.is_empty())
}

/// The redirect policy, evaluated against one snapshot and one route.
///
/// - Loading sessions never redirect; the decision waits.
/// - No session: any present, non-public top-level segment redirects to
///   login. The root itself does not (it renders the public entry screen).
/// - With a session: the root and the public segments redirect to the
///   landing route; anything else stays.
///
/// Already being on the redirect target falls out as [`GuardDecision::Stay`],
/// so re-evaluating with unchanged inputs is idempotent.
#[must_use]
pub fn decide(state: &AuthSnapshot, route: Option<&str>) -> GuardDecision {
    if state.loading {
        return GuardDecision::Stay;
    }

    let on_public = route.is_some_and(|segment| PUBLIC_ROUTES.contains(&segment));

    if state.is_authenticated() {
        if route.is_none() || on_public {
            return GuardDecision::Redirect(LANDING_ROUTE);
        }
        return GuardDecision::Stay;
    }

    if route.is_some() && !on_public {
        return GuardDecision::Redirect(LOGIN_ROUTE);
    }
    GuardDecision::Stay
}

struct GuardState {
    auth: AuthSnapshot,
    route: Option<String>,
}

/// Reactive wiring of [`decide`] to an [`AuthSession`] and a router.
///
/// The guard subscribes to the session, tracks the current top-level route
/// via [`NavGuard::set_route`], and calls the navigator callback whenever a
/// re-evaluation lands on a redirect.
pub struct NavGuard {
    state: Mutex<GuardState>,
    navigate: Box<dyn Fn(&str) + Send + Sync>,
}

impl NavGuard {
    /// Create the guard and subscribe it to `session`. The navigator
    /// callback performs the actual route replacement in the shell.
    pub fn install(
        session: &AuthSession,
        navigate: impl Fn(&str) + Send + Sync + 'static,
    ) -> Arc<Self> {
        let guard = Arc::new(Self {
            state: Mutex::new(GuardState { auth: session.snapshot(), route: None }),
            navigate: Box::new(navigate),
        });

        let hook = Arc::clone(&guard);
        session.subscribe(move |snapshot| hook.on_auth_change(snapshot));
        guard
    }

    /// Report a route change from the shell's router.
    pub fn set_route(&self, path: &str) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.route = top_level_segment(path).map(ToOwned::to_owned);
        }
        self.evaluate();
    }

    fn on_auth_change(&self, snapshot: &AuthSnapshot) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.auth = snapshot.clone();
        }
        self.evaluate();
    }

    fn evaluate(&self) {
        let decision = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            decide(&state.auth, state.route.as_deref())
        };

        if let GuardDecision::Redirect(target) = decision {
            // Record the target before invoking the navigator: the redirect
            // replaces the route, and tracking it keeps repeated auth
            // events from re-firing the same navigation.
            {
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                state.route = top_level_segment(target).map(ToOwned::to_owned);
            }
            (self.navigate)(target);
        }
    }
}
