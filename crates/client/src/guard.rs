//! Studio route guard.
//!
//! Gates studio pages behind the session's studio flag. This is advisory
//! UI gating in demo mode: the flag is client-writable and the password
//! that sets it ships with the client, so the guard must not be relied on
//! to protect anything. The backend enforces its own checks.

use std::sync::Arc;

use tofula_core::routes::Route;

use crate::navigation::Navigator;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Flag not read yet; nothing is rendered.
    Checking,
    Authorized,
    /// Flag absent; the redirect to studio login has been issued.
    Unauthorized,
}

pub struct StudioGuard {
    session: Session,
    navigator: Arc<dyn Navigator>,
    state: GuardState,
}

impl StudioGuard {
    pub fn new(session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Read the flag once and settle the guard.
    ///
    /// Only the first call reads the flag and may redirect; later calls
    /// return the settled state.
    pub fn check(&mut self) -> GuardState {
        if self.state != GuardState::Checking {
            return self.state;
        }
        if self.session.studio_granted() {
            self.state = GuardState::Authorized;
        } else {
            tracing::info!("Studio flag missing, redirecting to studio login");
            self.navigator.redirect(&Route::StudioLogin);
            self.state = GuardState::Unauthorized;
        }
        self.state
    }

    /// Render the guarded children only once authorized.
    pub fn render<T>(&self, children: impl FnOnce() -> T) -> Option<T> {
        match self.state {
            GuardState::Authorized => Some(children()),
            GuardState::Checking | GuardState::Unauthorized => None,
        }
    }

    /// Check, then render.
    pub fn mount<T>(&mut self, children: impl FnOnce() -> T) -> Option<T> {
        self.check();
        self.render(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use tofula_core::studio::DEMO_STUDIO_PASSWORD;

    fn guard(granted: bool) -> (StudioGuard, Arc<RecordingNavigator>) {
        let session = Session::in_memory();
        if granted {
            session.studio_login(DEMO_STUDIO_PASSWORD, DEMO_STUDIO_PASSWORD).unwrap();
        }
        let nav = Arc::new(RecordingNavigator::new());
        (StudioGuard::new(session, nav.clone()), nav)
    }

    #[test]
    fn renders_nothing_while_checking() {
        let (guard, nav) = guard(true);
        assert_eq!(guard.state(), GuardState::Checking);
        assert_eq!(guard.render(|| "dashboard"), None);
        assert_eq!(nav.count(), 0);
    }

    #[test]
    fn missing_flag_redirects_and_hides_children() {
        let (mut guard, nav) = guard(false);
        let mut rendered = false;
        let out = guard.mount(|| rendered = true);
        assert_eq!(out, None);
        assert!(!rendered);
        assert_eq!(guard.state(), GuardState::Unauthorized);
        assert_eq!(nav.visits(), vec![Route::StudioLogin]);
    }

    #[test]
    fn present_flag_renders_without_redirect() {
        let (mut guard, nav) = guard(true);
        assert_eq!(guard.mount(|| "dashboard"), Some("dashboard"));
        assert_eq!(guard.state(), GuardState::Authorized);
        assert_eq!(nav.count(), 0);
    }

    #[test]
    fn flag_is_read_once() {
        let (mut guard, nav) = guard(false);
        guard.check();
        guard.check();
        assert_eq!(nav.count(), 1);
    }
}
