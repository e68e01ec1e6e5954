//! Common types used throughout cibuild-etl
//!
//! Build records are provider-shaped JSON, so they stay as `serde_json`
//! values rather than a fixed struct.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single CI build record as returned by the provider
pub type BuildRecord = JsonObject;

// ============================================================================
// Record Fields
// ============================================================================

/// Timestamp the build was queued at, e.g. `2019-01-10T08:36:22.224Z` (UTC)
pub const FIELD_QUEUED_AT: &str = "queued_at";

/// Organization or user owning the project
pub const FIELD_USERNAME: &str = "username";

/// Repository name
pub const FIELD_REPONAME: &str = "reponame";

/// Per-project build number
pub const FIELD_BUILD_NUM: &str = "build_num";

/// Returns the record's `queued_at` when present and non-empty.
///
/// Builds that never ran come back without one and are not persisted.
pub fn queued_at(record: &BuildRecord) -> Option<&str> {
    record
        .get(FIELD_QUEUED_AT)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
}
