//! Route table and session-based navigation guard.
//!
//! # Responsibility
//! - Map request paths to the three views (login, register, notes).
//! - Redirect signed-in users away from public views and anonymous users
//!   away from the notes view.
//!
//! # Invariants
//! - `/` and unknown paths resolve to the notes view before guarding.
//! - The guard initializes auth state before its first decision.
//! - Paths match case-insensitively and ignore one trailing slash.

use crate::state::auth_state::AuthState;
use crate::storage::KeyValueStore;
use log::debug;

/// Query key carrying the originally requested path on a login redirect.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Notes,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Notes => "/app",
        }
    }

    /// Stable label used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Notes => "app",
        }
    }

    /// Reachable without a session; signed-in users are sent to the notes view.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Notes)
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested route.
    Allow(Route),
    /// Go to `to` instead; `return_to` is the path to resume after login.
    Redirect {
        to: Route,
        return_to: Option<String>,
    },
}

impl Navigation {
    /// Route that ends up rendered.
    pub fn route(&self) -> Route {
        match self {
            Self::Allow(route) => *route,
            Self::Redirect { to, .. } => *to,
        }
    }

    fn status(&self) -> &'static str {
        match self {
            Self::Allow(_) => "allow",
            Self::Redirect { .. } => "redirect",
        }
    }

    /// Final location string, including the redirect query when present.
    pub fn location(&self) -> String {
        match self {
            Self::Allow(route) => route.path().to_string(),
            Self::Redirect {
                to,
                return_to: None,
            } => to.path().to_string(),
            Self::Redirect {
                to,
                return_to: Some(return_to),
            } => format!(
                "{}?{}={}",
                to.path(),
                REDIRECT_QUERY_KEY,
                urlencoding::encode(return_to)
            ),
        }
    }
}

/// Session-aware guard applied to every navigation.
pub struct RouteGuard;

impl RouteGuard {
    /// Resolves `full_path` (path plus optional query/fragment).
    pub fn resolve<S: KeyValueStore>(full_path: &str, auth: &mut AuthState<S>) -> Navigation {
        if !auth.is_initialized() {
            auth.init_from_storage();
        }

        let (route, requested, rewritten) = match match_path(full_path) {
            Some(route) => (route, full_path.to_string(), false),
            None => (Route::Notes, Route::Notes.path().to_string(), true),
        };
        let signed_in = auth.user().is_some();

        let navigation = if route.is_public() && signed_in {
            Navigation::Redirect {
                to: Route::Notes,
                return_to: None,
            }
        } else if route.requires_auth() && !signed_in {
            Navigation::Redirect {
                to: Route::Login,
                return_to: Some(requested),
            }
        } else if rewritten {
            Navigation::Redirect {
                to: route,
                return_to: None,
            }
        } else {
            Navigation::Allow(route)
        };

        debug!(
            "event=route_resolve module=router status={} requested={} route={}",
            navigation.status(),
            route.name(),
            navigation.route().name()
        );
        navigation
    }
}

fn match_path(full_path: &str) -> Option<Route> {
    let path = full_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let path = strip_suffix_slash(path).to_lowercase();
    [Route::Login, Route::Register, Route::Notes]
        .into_iter()
        .find(|route| route.path() == path)
}

fn strip_suffix_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
