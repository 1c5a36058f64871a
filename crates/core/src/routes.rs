//! Front-end route table, one route per concern.

use std::fmt;

use crate::types::TemplateId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Catalog,
    Story(TemplateId),
    Library,
    /// Customer sign-in; target of the hard redirect on a 401.
    Login,
    StudioLogin,
    StudioDashboard,
    StudioNewStory,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Catalog => "/customer/catalog".to_string(),
            Route::Story(id) => format!("/customer/story/{id}"),
            Route::Library => "/customer/library".to_string(),
            Route::Login => "/app/login".to_string(),
            Route::StudioLogin => "/studio/login".to_string(),
            Route::StudioDashboard => "/studio/dashboard".to_string(),
            Route::StudioNewStory => "/studio/story/new".to_string(),
        }
    }

    /// Studio routes render behind the studio guard.
    pub fn is_guarded(&self) -> bool {
        matches!(self, Route::StudioDashboard | Route::StudioNewStory)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(Route::Login.path(), "/app/login");
        assert_eq!(Route::StudioLogin.path(), "/studio/login");
        assert_eq!(Route::Story("abc".into()).to_string(), "/customer/story/abc");
    }

    #[test]
    fn only_studio_pages_are_guarded() {
        assert!(Route::StudioDashboard.is_guarded());
        assert!(Route::StudioNewStory.is_guarded());
        assert!(!Route::StudioLogin.is_guarded());
        assert!(!Route::Catalog.is_guarded());
    }
}
