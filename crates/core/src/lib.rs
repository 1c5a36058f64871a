//! Domain types shared by the Tofula storybook front end.
//!
//! Records exchanged with the backend API (templates, personalization
//! requests, library items), the list filters applied to them, the route
//! table, and the studio demo-mode access constants.

pub mod error;
pub mod filter;
pub mod library;
pub mod personalization;
pub mod routes;
pub mod studio;
pub mod template;
pub mod types;
