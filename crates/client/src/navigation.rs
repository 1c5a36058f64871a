//! Navigation seam used by the API client and the studio guard.

use std::sync::Mutex;

use tofula_core::routes::Route;

/// Receives hard redirects. Implementations decide what "navigating"
/// means for their front end; the redirect discards page state.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &Route);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Route> {
        self.visits.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.visits.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &Route) {
        tracing::debug!(path = %route, "Redirect");
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let nav = RecordingNavigator::new();
        assert_eq!(nav.last(), None);
        nav.redirect(&Route::Login);
        nav.redirect(&Route::StudioLogin);
        assert_eq!(nav.visits(), vec![Route::Login, Route::StudioLogin]);
        assert_eq!(nav.last(), Some(Route::StudioLogin));
        assert_eq!(nav.count(), 2);
    }
}
