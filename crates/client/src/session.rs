//! Client-side session: the bearer token and the studio access flag.
//!
//! [`Session`] is created once and injected into the API client and the
//! studio guard. Its two slots live in a [`SessionStore`]:
//!
//! - [`Slot::Token`]: bearer token attached to every API request. Set at
//!   sign-in, removed at sign-out or when the backend answers 401.
//! - [`Slot::StudioFlag`]: demo-mode studio access flag (`"1"` when
//!   granted). Anyone who can write the store can set it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tofula_core::error::CoreError;
use tofula_core::studio::{check_studio_password, STUDIO_FLAG_GRANTED, STUDIO_FLAG_KEY};

/// Storage key of the bearer token slot.
pub const TOKEN_KEY: &str = "auth_token";

/// File name used by [`FileStore::in_dir`].
pub const SESSION_FILE_NAME: &str = "session.json";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Format(#[from] serde_json::Error),

    #[error(transparent)]
    Rejected(#[from] CoreError),
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Token,
    StudioFlag,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Token => TOKEN_KEY,
            Slot::StudioFlag => STUDIO_FLAG_KEY,
        }
    }
}

/// Key/value storage backing a [`Session`].
pub trait SessionStore: Send + Sync {
    fn get(&self, slot: Slot) -> Option<String>;
    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError>;
    fn remove(&self, slot: Slot) -> Result<(), SessionError>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<Slot, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, slot: Slot) -> Option<String> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.get(&slot).cloned()
    }

    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.remove(&slot);
        Ok(())
    }
}

/// JSON-file store, so a terminal session survives between invocations.
///
/// The file maps slot keys to values and is rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    slots: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let slots = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    /// Open `session.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::open(dir.as_ref().join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, slots: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(slots)?)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, slot: Slot) -> Option<String> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.get(slot.key()).cloned()
    }

    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(slot.key().to_string(), value.to_string());
        self.persist(&slots)
    }

    fn remove(&self, slot: Slot) -> Result<(), SessionError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        if slots.remove(slot.key()).is_some() {
            self.persist(&slots)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Shared handle to the session slots. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("signed_in", &self.is_signed_in())
            .field("studio_granted", &self.studio_granted())
            .finish()
    }
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A session over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(Slot::Token).filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CoreError::Validation("token must not be empty".to_string()).into());
        }
        self.store.set(Slot::Token, token)?;
        tracing::info!("Signed in");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.remove(Slot::Token)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// End the session after the backend rejected its token.
    ///
    /// Storage failures are logged rather than returned: the caller is
    /// already on an error path and is about to redirect.
    pub fn expire(&self) {
        if let Err(e) = self.store.remove(Slot::Token) {
            tracing::error!(error = %e, "Failed to clear expired session token");
        }
    }

    // ---- studio access ----

    pub fn studio_granted(&self) -> bool {
        self.store.get(Slot::StudioFlag).as_deref() == Some(STUDIO_FLAG_GRANTED)
    }

    /// Demo-mode studio login: compare the password and set the flag.
    pub fn studio_login(&self, submitted: &str, expected: &str) -> Result<(), SessionError> {
        check_studio_password(submitted, expected)?;
        self.store.set(Slot::StudioFlag, STUDIO_FLAG_GRANTED)?;
        tracing::info!("Studio access granted");
        Ok(())
    }

    pub fn studio_logout(&self) -> Result<(), SessionError> {
        self.store.remove(Slot::StudioFlag)?;
        tracing::info!("Studio access revoked");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
