use super::provider::AuthProvider;
use crate::system::navigation::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Authenticated,
    Redirected,
}

/// One-shot session gate run when the dashboard view activates.
/// Without a valid session it redirects to the login route and the caller
/// must stop initialization.
pub fn guard_session(
    auth: &dyn AuthProvider,
    navigator: &dyn Navigator,
    login_route: &str,
) -> GuardOutcome {
    if auth.is_authenticated() {
        GuardOutcome::Authenticated
    } else {
        log::info!("No session, redirecting to {}", login_route);
        navigator.navigate(login_route);
        GuardOutcome::Redirected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::provider::StaticAuth;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator(RefCell<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.0.borrow_mut().push(path.to_string());
        }
    }

    #[test]
    fn test_guard_passes_with_token() {
        let nav = RecordingNavigator::default();
        let outcome = guard_session(&StaticAuth::new(Some("t")), &nav, "/login");
        assert_eq!(outcome, GuardOutcome::Authenticated);
        assert!(nav.0.borrow().is_empty());
    }

    #[test]
    fn test_guard_redirects_without_token() {
        let nav = RecordingNavigator::default();
        let outcome = guard_session(&StaticAuth::new(None), &nav, "/login");
        assert_eq!(outcome, GuardOutcome::Redirected);
        assert_eq!(*nav.0.borrow(), vec!["/login".to_string()]);
    }
}
