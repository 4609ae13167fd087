//! Application state and the pure reducer that evolves it.

use dreamtrue_domain::{AuthState, ChatMessage, Report, User};

/// The whole client-side state: the auth slice plus the display state
/// that depends on the session (reports, chat transcript).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Authentication slice.
    pub auth: AuthState,
    /// Report currently open in the viewer.
    pub current_report: Option<Report>,
    /// All reports for this session.
    pub reports: Vec<Report>,
    /// Dashboard chat transcript.
    pub chat_messages: Vec<ChatMessage>,
}

impl AppState {
    /// State at process start.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }
}

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Establish the session for a user.
    SetUser(User),
    /// Reset to the signed-out state, dropping session-scoped data.
    Logout,
    /// Flag that a password check succeeded but a code is still owed.
    SetMfaRequired(bool),
    /// Flag that the second factor was verified this session.
    SetMfaVerified(bool),
    /// Toggle the in-flight indicator.
    SetLoading(bool),
    /// Record (or clear) the last auth error.
    SetError(Option<String>),
    /// Open a report in the viewer.
    SetCurrentReport(Report),
    /// Append a report to the session list.
    AddReport(Report),
    /// Replace a report (matched by id) wherever it appears.
    UpdateReport(Report),
    /// Append a chat message.
    AddChatMessage(ChatMessage),
    /// Drop the chat transcript.
    ClearChatMessages,
}

/// Pure state transition: `(state, action) -> state`.
///
/// No side effects; flow rules (who may dispatch what, and when) are the
/// controller's job. `SetUser` establishes the session and clears any
/// stale error; `Logout` restores the signed-out state and drops
/// everything session-scoped.
#[must_use]
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetUser(user) => {
            state.auth.user = Some(user);
            state.auth.authenticated = true;
            state.auth.loading = false;
            state.auth.error = None;
        }
        Action::Logout => {
            state = AppState {
                auth: AuthState::signed_out(),
                ..AppState::default()
            };
        }
        Action::SetMfaRequired(required) => {
            state.auth.mfa_required = required;
        }
        Action::SetMfaVerified(verified) => {
            state.auth.mfa_verified = verified;
        }
        Action::SetLoading(loading) => {
            state.auth.loading = loading;
        }
        Action::SetError(error) => {
            state.auth.error = error;
        }
        Action::SetCurrentReport(report) => {
            state.current_report = Some(report);
        }
        Action::AddReport(report) => {
            state.reports.push(report);
        }
        Action::UpdateReport(report) => {
            if let Some(existing) = state.reports.iter_mut().find(|r| r.id == report.id) {
                *existing = report.clone();
            }
            if state
                .current_report
                .as_ref()
                .is_some_and(|current| current.id == report.id)
            {
                state.current_report = Some(report);
            }
        }
        Action::AddChatMessage(message) => {
            state.chat_messages.push(message);
        }
        Action::ClearChatMessages => {
            state.chat_messages.clear();
        }
    }
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dreamtrue_domain::{ChatRole, CompanyData};
    use pretty_assertions::assert_eq;

    fn demo_user() -> User {
        User::new("uid-1", "demo@dreamtrue.ai", "Demo User")
    }

    #[test]
    fn test_set_user_authenticates_and_clears_error() {
        let state = reduce(
            AppState::initial(),
            Action::SetError(Some("bad password".to_string())),
        );
        let state = reduce(state, Action::SetUser(demo_user()));

        assert!(state.auth.authenticated);
        assert!(!state.auth.loading);
        assert_eq!(state.auth.error, None);
        assert!(state.auth.is_consistent());
    }

    #[test]
    fn test_logout_resets_to_signed_out_state() {
        let mut state = reduce(AppState::initial(), Action::SetUser(demo_user()));
        state = reduce(
            state,
            Action::AddReport(Report::pending(
                "r-1",
                CompanyData::named("Acme"),
                Utc::now(),
            )),
        );
        state = reduce(
            state,
            Action::AddChatMessage(ChatMessage::new("m-1", ChatRole::User, "hi", Utc::now())),
        );

        let state = reduce(state, Action::Logout);

        assert_eq!(state.auth, AuthState::signed_out());
        assert!(state.reports.is_empty());
        assert!(state.chat_messages.is_empty());
        assert!(state.current_report.is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let signed_in = reduce(AppState::initial(), Action::SetUser(demo_user()));
        let once = reduce(signed_in, Action::Logout);
        let twice = reduce(once.clone(), Action::Logout);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_report_replaces_list_and_current() {
        let report = Report::pending("r-1", CompanyData::named("Acme"), Utc::now());
        let mut state = reduce(AppState::initial(), Action::AddReport(report.clone()));
        state = reduce(state, Action::SetCurrentReport(report.clone()));

        let done = report.completed("<h1>Acme</h1>", Utc::now());
        let state = reduce(state, Action::UpdateReport(done.clone()));

        assert_eq!(state.reports, vec![done.clone()]);
        assert_eq!(state.current_report, Some(done));
    }

    #[test]
    fn test_update_unknown_report_is_a_no_op() {
        let state = reduce(
            AppState::initial(),
            Action::UpdateReport(Report::pending(
                "ghost",
                CompanyData::named("Ghost"),
                Utc::now(),
            )),
        );
        assert!(state.reports.is_empty());
        assert!(state.current_report.is_none());
    }
}
