use tofula_client::{Navigator, RecordingNavigator};
use tofula_core::routes::Route;

/// Navigator for the terminal: announces each redirect on stderr, since
/// there is no browser to move, and remembers it for the caller.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    visits: RecordingNavigator,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        self.visits.last()
    }

    pub fn visits(&self) -> Vec<Route> {
        self.visits.visits()
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &Route) {
        eprintln!("-> {}", redirect_hint(route));
        self.visits.redirect(route);
    }
}

/// What the user should do next, phrased for the command line.
pub fn redirect_hint(route: &Route) -> String {
    match route {
        Route::Login => format!("{route}: sign in with `tofula login --token <TOKEN>`"),
        Route::StudioLogin => {
            format!("{route}: unlock the studio with `tofula studio login --password <PASSWORD>`")
        }
        Route::StudioDashboard => format!("{route}: see `tofula studio dashboard`"),
        Route::StudioNewStory => format!("{route}: see `tofula studio generate --help`"),
        Route::Library => format!("{route}: see `tofula library`"),
        Route::Catalog | Route::Home => format!("{route}: see `tofula catalog`"),
        Route::Story(id) => format!("{route}: see `tofula story {id}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_redirects() {
        let nav = TerminalNavigator::new();
        nav.redirect(&Route::StudioLogin);
        nav.redirect(&Route::Login);
        assert_eq!(nav.visits(), vec![Route::StudioLogin, Route::Login]);
        assert_eq!(nav.last(), Some(Route::Login));
    }

    #[test]
    fn hints_name_the_command() {
        assert!(redirect_hint(&Route::Login).contains("tofula login"));
        assert!(redirect_hint(&Route::Story("t1".into())).starts_with("/customer/story/t1"));
    }
}
