use tracing::debug;

use crate::domain::Role;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/auth/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

const KNOWN_PATHS: [&str; 7] = [
    "/",
    "/dashboard",
    "/user",
    "/menu",
    "/confirm-order",
    UNAUTHORIZED_PATH,
    LOGIN_PATH,
];

const ROLE_PREFIXES: [(&str, Role); 3] = [
    ("/dashboard/admin", Role::Admin),
    ("/dashboard/client", Role::Client),
    ("/dashboard/delivery", Role::Delivery),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
    NotFound,
}

/// Whether `session` may visit `path`.
pub fn guard(path: &str, session: Option<&Session>) -> RouteDecision {
    let decision = decide(path, session);
    debug!(path, ?decision, "Route guard");
    decision
}

fn decide(path: &str, session: Option<&Session>) -> RouteDecision {
    let Some(session) = session else {
        return if path == LOGIN_PATH {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLogin
        };
    };

    for (prefix, role) in ROLE_PREFIXES {
        if path.starts_with(prefix) {
            return if session.role == role {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToUnauthorized
            };
        }
    }

    if path == "/" || KNOWN_PATHS.iter().any(|known| *known != "/" && has_segment_prefix(path, known)) {
        RouteDecision::Allow
    } else {
        RouteDecision::NotFound
    }
}

/// `/menu` matches itself and `/menu/...`, not `/menus`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
