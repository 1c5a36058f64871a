/// Backend identifiers are opaque strings (UUIDs rendered as text).
pub type TemplateId = String;

/// Identifier of a generated story instance in a user's library.
pub type InstanceId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
