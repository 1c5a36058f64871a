//! Tofula backend API access layer.
//!
//! Provides the typed HTTP client for the catalog, library and studio
//! endpoints, the injected [`Session`](session::Session) holding the
//! bearer token and studio flag, the [`Navigator`](navigation::Navigator)
//! seam used for hard redirects, and the studio route guard.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod session;

pub use api::TofulaApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use guard::{GuardState, StudioGuard};
pub use navigation::{Navigator, RecordingNavigator};
pub use session::{FileStore, MemoryStore, Session, SessionError, SessionStore, Slot};
