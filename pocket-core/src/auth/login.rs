use tracing::{info, warn};

/// The only username the login form accepts.
pub const SYSTEM_USERNAME: &str = "Bond";

/// The only password the login form accepts.
pub const SYSTEM_PASSWORD: &str = "007";

const ACCEPTED_COLOR: &str = "#00ff00";
const REJECTED_COLOR: &str = "#ff4c4c";

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected,
}

impl LoginOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Status line shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Correct. Logging you in...",
            Self::Rejected => "Username or password are incorrect",
        }
    }

    /// Hex colour of the status line (green on success, red otherwise).
    pub fn color(&self) -> &'static str {
        match self {
            Self::Accepted => ACCEPTED_COLOR,
            Self::Rejected => REJECTED_COLOR,
        }
    }
}

/// Checks a username/password pair against the fixed credentials.
///
/// Both inputs are trimmed; the comparison is otherwise exact and
/// case-sensitive.
///
/// ```
/// use pocket_core::auth::{LoginOutcome, check_credentials};
///
/// assert_eq!(check_credentials(" Bond ", "007"), LoginOutcome::Accepted);
/// assert_eq!(check_credentials("bond", "007"), LoginOutcome::Rejected);
/// ```
pub fn check_credentials(
    username: &str,
    password: &str,
) -> LoginOutcome {
    let username = username.trim();
    let password = password.trim();

    if username == SYSTEM_USERNAME && password == SYSTEM_PASSWORD {
        info!(username, "login accepted");
        LoginOutcome::Accepted
    } else {
        warn!(username, "login rejected");
        LoginOutcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_exact_credentials() {
        let outcome = check_credentials("Bond", "007");

        assert_eq!(outcome, LoginOutcome::Accepted);
        assert!(outcome.is_accepted());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let outcome = check_credentials("  Bond\t", " 007 \n");

        assert_eq!(outcome, LoginOutcome::Accepted);
    }

    #[test]
    fn username_is_case_sensitive() {
        let outcome = check_credentials("BOND", "007");

        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[test]
    fn rejects_wrong_password() {
        let outcome = check_credentials("Bond", "700");

        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[test]
    fn rejects_empty_input() {
        let outcome = check_credentials("", "");

        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[test]
    fn inner_whitespace_is_not_trimmed() {
        let outcome = check_credentials("Bo nd", "007");

        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[test]
    fn messages_and_colors() {
        assert_eq!(LoginOutcome::Accepted.message(), "Correct. Logging you in...");
        assert_eq!(LoginOutcome::Accepted.color(), "#00ff00");
        assert_eq!(
            LoginOutcome::Rejected.message(),
            "Username or password are incorrect"
        );
        assert_eq!(LoginOutcome::Rejected.color(), "#ff4c4c");
    }
}
