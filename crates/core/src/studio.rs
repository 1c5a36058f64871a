//! Studio authoring constants, the generation request, and the demo-mode
//! access check.
//!
//! Studio access is a UI affordance only. The password below ships with
//! every client build and the flag it sets lives in client-writable
//! storage, so nothing here is a security boundary. The backend performs
//! its own `X-Studio-Password` check on generation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Access flag
// ---------------------------------------------------------------------------

/// Storage key of the studio access flag.
pub const STUDIO_FLAG_KEY: &str = "tofula_studio_auth";

/// The only flag value that counts as "granted".
pub const STUDIO_FLAG_GRANTED: &str = "1";

/// Demo-mode studio password. Overridable through configuration.
pub const DEMO_STUDIO_PASSWORD: &str = "Tofula@2025";

/// Header carrying the studio password on generation requests.
pub const STUDIO_PASSWORD_HEADER: &str = "X-Studio-Password";

/// Compare a submitted password against the configured one.
///
/// Plain string comparison: this is a demo placeholder, not
/// authentication.
pub fn check_studio_password(submitted: &str, expected: &str) -> Result<(), CoreError> {
    if submitted.is_empty() {
        return Err(CoreError::Validation("password is required".to_string()));
    }
    if submitted != expected {
        return Err(CoreError::Validation("Incorrect password".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// Age ranges offered by the new-story form.
pub const AGE_RANGES: &[&str] = &["3-5", "4-6", "6-8", "8-10", "10-12"];

/// Age range pre-selected in the new-story form.
pub const DEFAULT_AGE_RANGE: &str = "4-6";

/// Culture pre-filled in the new-story form.
pub const DEFAULT_CULTURE: &str = "universal";

/// Placeholder hero name used while authoring a template.
pub const DEFAULT_HERO_NAME: &str = "Hero";

/// Placeholder hero age used while authoring a template.
pub const DEFAULT_HERO_AGE: u8 = 6;

fn validate_age_range(value: &str) -> Result<(), ValidationError> {
    if AGE_RANGES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("age_range")
            .with_message(format!("must be one of: {}", AGE_RANGES.join(", ")).into()))
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("is required".into()))
    } else {
        Ok(())
    }
}

/// Body of `POST /studio/stories/generate`: ask the AI pipeline for a new
/// draft template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub themes: String,
    #[validate(custom(function = "validate_age_range"))]
    pub age_range: String,
    #[serde(default)]
    pub culture: String,
    #[serde(default)]
    pub moral: String,
    pub child_name: String,
    #[validate(range(min = 2, max = 12, message = "must be between 2 and 12"))]
    pub age: u8,
}

impl GenerationRequest {
    /// A new-story form with its defaults filled in.
    pub fn new(themes: impl Into<String>) -> Self {
        Self {
            themes: themes.into(),
            age_range: DEFAULT_AGE_RANGE.to_string(),
            culture: DEFAULT_CULTURE.to_string(),
            moral: String::new(),
            child_name: DEFAULT_HERO_NAME.to_string(),
            age: DEFAULT_HERO_AGE,
        }
    }

    pub fn checked(self) -> Result<Self, CoreError> {
        self.validate()?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn password_check() {
        assert!(check_studio_password(DEMO_STUDIO_PASSWORD, DEMO_STUDIO_PASSWORD).is_ok());
        assert_matches!(
            check_studio_password("guess", DEMO_STUDIO_PASSWORD),
            Err(CoreError::Validation(msg)) if msg == "Incorrect password"
        );
        assert_matches!(
            check_studio_password("", DEMO_STUDIO_PASSWORD),
            Err(CoreError::Validation(msg)) if msg.contains("required")
        );
    }

    #[test]
    fn generation_defaults_match_form() {
        let req = GenerationRequest::new("friendship");
        assert_eq!(req.age_range, "4-6");
        assert_eq!(req.culture, "universal");
        assert_eq!(req.child_name, "Hero");
        assert_eq!(req.age, 6);
        assert!(req.checked().is_ok());
    }

    #[test]
    fn generation_requires_themes() {
        let err = GenerationRequest::new("   ").checked().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("themes"));
    }

    #[test]
    fn generation_rejects_unknown_age_range() {
        let mut req = GenerationRequest::new("courage");
        req.age_range = "1-99".into();
        let err = req.checked().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("age_range"));
    }
}
