//! Terminal pages.
//!
//! Each page is built from the result of its fetch and renders to lines;
//! the fetching itself lives in [`crate::commands`].

pub mod catalog;
pub mod library;
pub mod story;
pub mod studio;

pub use catalog::CatalogPage;
pub use library::{LibraryItemView, LibraryPage};
pub use story::{PersonalizeOutcome, StoryPage};
pub use studio::{DashboardPage, NewStoryOutcome, StudioLoginPage, TemplateDetail};
