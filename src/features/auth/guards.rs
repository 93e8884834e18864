//! Route guard policy. Both guards are pure functions of the current
//! authentication state, the `force` query flag and the attempted location;
//! the view layer re-evaluates them on every render and location change.
//!
//! These are UX guards only. Real access control lives on the API.

use url::form_urlencoded;

/// Where guest-only pages send signed-in users.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Where protected pages send anonymous users.
pub const LOGIN_PATH: &str = "/auth/login";
/// Query parameter that lets a signed-in user open guest-only pages anyway.
pub const FORCE_PARAM: &str = "force";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Home and the auth pages: login, register, forgot-password.
    GuestOnly,
    /// Pages that need a session: the dashboard.
    AuthRequired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Navigate to `to`, replacing the history entry, and carry the attempted
    /// location in navigation state so the target can send the user back.
    Redirect { to: &'static str, from: String },
}

impl GuardDecision {
    #[must_use]
    pub fn renders(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

/// Renders unless the user is signed in without asking to force access.
///
/// `force` is an intentional escape hatch so a signed-in user can look at the
/// login or register forms. It has no security weight: it never lets anyone
/// past [`auth_required`].
#[must_use]
pub fn guest_only(is_authenticated: bool, force: bool, location: &str) -> GuardDecision {
    if !is_authenticated || force {
        GuardDecision::Render
    } else {
        tracing::debug!(from = location, "signed-in user redirected away from guest page");
        GuardDecision::Redirect {
            to: DASHBOARD_PATH,
            from: location.to_string(),
        }
    }
}

#[must_use]
pub fn auth_required(is_authenticated: bool, location: &str) -> GuardDecision {
    if is_authenticated {
        GuardDecision::Render
    } else {
        tracing::debug!(from = location, "anonymous user redirected to login");
        GuardDecision::Redirect {
            to: LOGIN_PATH,
            from: location.to_string(),
        }
    }
}

/// Applies the guard of the given kind. `query` is the raw query string, with
/// or without its leading `?`.
#[must_use]
pub fn evaluate(kind: GuardKind, is_authenticated: bool, path: &str, query: &str) -> GuardDecision {
    let location = attempted_location(path, query);
    match kind {
        GuardKind::GuestOnly => guest_only(is_authenticated, force_flag(query), &location),
        GuardKind::AuthRequired => auth_required(is_authenticated, &location),
    }
}

/// True only when the `force` parameter is exactly `"true"`. Any other value,
/// including `TRUE`, `1` or a bare `force`, is false.
#[must_use]
pub fn force_flag(query: &str) -> bool {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(name, _)| name == FORCE_PARAM)
        .is_some_and(|(_, value)| value == "true")
}

fn attempted_location(path: &str, query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_only_truth_table() {
        for force in [false, true] {
            assert!(guest_only(false, force, "/auth/login").renders());
        }
        assert!(guest_only(true, true, "/auth/login").renders());
        assert_eq!(
            guest_only(true, false, "/auth/login"),
            GuardDecision::Redirect {
                to: DASHBOARD_PATH,
                from: "/auth/login".to_string()
            }
        );
    }

    #[test]
    fn auth_required_truth_table() {
        assert!(auth_required(true, "/dashboard").renders());
        assert_eq!(
            auth_required(false, "/dashboard/settings"),
            GuardDecision::Redirect {
                to: LOGIN_PATH,
                from: "/dashboard/settings".to_string()
            }
        );
    }

    #[test]
    fn force_never_opens_protected_pages() {
        assert_eq!(
            evaluate(GuardKind::AuthRequired, false, "/dashboard", "?force=true"),
            GuardDecision::Redirect {
                to: LOGIN_PATH,
                from: "/dashboard?force=true".to_string()
            }
        );
    }

    #[test]
    fn force_flag_requires_literal_true() {
        assert!(force_flag("force=true"));
        assert!(force_flag("?tab=1&force=true"));
        assert!(!force_flag(""));
        assert!(!force_flag("?force"));
        assert!(!force_flag("?force=TRUE"));
        assert!(!force_flag("?force=1"));
        assert!(!force_flag("?forced=true"));
    }

    #[test]
    fn evaluate_preserves_attempted_location() {
        assert_eq!(
            evaluate(GuardKind::GuestOnly, true, "/auth/register", "?ref=home"),
            GuardDecision::Redirect {
                to: DASHBOARD_PATH,
                from: "/auth/register?ref=home".to_string()
            }
        );
        assert!(evaluate(GuardKind::GuestOnly, true, "/auth/register", "?force=true").renders());
        assert!(evaluate(GuardKind::GuestOnly, false, "/auth/forgot-password", "").renders());
    }

    #[test]
    fn signed_in_home_visit_goes_to_dashboard() {
        assert_eq!(
            evaluate(GuardKind::GuestOnly, true, "/", ""),
            GuardDecision::Redirect {
                to: DASHBOARD_PATH,
                from: "/".to_string()
            }
        );
        assert!(evaluate(GuardKind::GuestOnly, true, "/", "?force=true").renders());
        assert!(evaluate(GuardKind::GuestOnly, false, "/", "").renders());
    }
}
