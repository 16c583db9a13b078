use crate::core::order::PledgeError;
use crate::core::session::{LoggedInUser, Profile};

/// What the "Pledge as" section shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginStatus {
    Loading,
    LoggedOut,
    LoggedIn,
}

/// View state of one pledge page instance
#[derive(Clone, Debug, PartialEq)]
pub struct PledgeViewState {
    error_message: Option<String>,
    loading_user_login: bool,
    logged_in_user: Option<LoggedInUser>,
    // set while the createOrder mutation is in flight
    submitting: bool,
}

impl PledgeViewState {
    pub fn new() -> Self {
        Self {
            error_message: None,
            loading_user_login: true,
            logged_in_user: None,
            submitting: false,
        }
    }

    pub fn finish_session_load(&mut self, user: Option<LoggedInUser>) {
        self.loading_user_login = false;
        self.logged_in_user = user;
    }

    pub fn logged_in_user(&self) -> Option<&LoggedInUser> {
        self.logged_in_user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in_user.is_some()
    }

    pub fn login_status(&self) -> LoginStatus {
        if self.logged_in_user.is_some() {
            LoginStatus::LoggedIn
        } else if self.loading_user_login {
            LoginStatus::Loading
        } else {
            LoginStatus::LoggedOut
        }
    }

    /// Selectable payer profiles, empty when logged out
    pub fn profiles(&self) -> Vec<Profile> {
        self.logged_in_user
            .as_ref()
            .map(LoggedInUser::profiles)
            .unwrap_or_default()
    }

    pub fn currency(&self) -> Option<String> {
        self.logged_in_user
            .as_ref()
            .and_then(|user| user.currency().map(str::to_string))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_logged_in() && !self.submitting
    }

    /// Mark a submission as started. Returns `false` when one is already in
    /// flight, in which case the caller must not send another order.
    pub fn begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish_submission<T>(&mut self, result: &Result<T, PledgeError>) {
        self.submitting = false;
        match result {
            Ok(_) => self.error_message = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphql::ApiError;
    use crate::core::session::CollectiveSummary;

    fn user() -> LoggedInUser {
        LoggedInUser {
            id: 1,
            collective_id: 10,
            collective: CollectiveSummary {
                id: 10,
                name: "Me".to_string(),
                currency: Some("USD".to_string()),
            },
            member_of: Vec::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = PledgeViewState::new();
        assert_eq!(state.login_status(), LoginStatus::Loading);
        assert!(!state.can_submit());
        assert!(state.profiles().is_empty());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_session_load() {
        let mut state = PledgeViewState::new();
        state.finish_session_load(Some(user()));

        assert_eq!(state.login_status(), LoginStatus::LoggedIn);
        assert_eq!(state.currency().as_deref(), Some("USD"));
        assert_eq!(state.profiles().len(), 1);
        assert!(state.can_submit());

        let mut anonymous = PledgeViewState::new();
        anonymous.finish_session_load(None);
        assert_eq!(anonymous.login_status(), LoginStatus::LoggedOut);
        assert!(!anonymous.can_submit());
    }

    #[test]
    fn test_second_submission_is_refused_while_in_flight() {
        let mut state = PledgeViewState::new();
        state.finish_session_load(Some(user()));

        assert!(state.begin_submission());
        assert!(!state.can_submit());
        assert!(!state.begin_submission());

        state.finish_submission::<()>(&Ok(()));
        assert!(state.can_submit());
        assert!(state.begin_submission());
    }

    #[test]
    fn test_error_message_is_replaced_by_success() {
        let mut state = PledgeViewState::new();
        state.finish_session_load(Some(user()));

        state.begin_submission();
        state.finish_submission::<()>(&Err(PledgeError::Api(ApiError::Other("Network down".to_string()))));
        assert_eq!(state.error_message(), Some("Error: Network down"));
        assert!(!state.is_submitting());

        state.begin_submission();
        state.finish_submission(&Ok(Some("/acme".to_string())));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_unreadable_form_is_not_reported_as_logged_out() {
        let mut state = PledgeViewState::new();
        state.finish_session_load(Some(user()));

        assert!(state.begin_submission());
        state.finish_submission::<()>(&Err(PledgeError::UnreadableForm("no form element".to_string())));

        assert_eq!(state.error_message(), Some("Could not read the pledge form: no form element"));
        assert_eq!(state.login_status(), LoginStatus::LoggedIn);
        assert!(state.can_submit());
    }
}
