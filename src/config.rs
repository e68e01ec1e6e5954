//! Job configuration
//!
//! Both jobs read their settings from the environment once at startup and
//! pass the resulting structs down by reference. Loading goes through a
//! lookup function so tests can supply values without touching the process
//! environment.

use crate::error::{Error, Result};
use chrono::format::{self, Parsed, StrftimeItems};
use chrono::FixedOffset;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Environment Variables
// ============================================================================

/// CircleCI API token
pub const ENV_CIRCLECI_TOKEN: &str = "CIRCLECI_TOKEN";
/// CircleCI base URL
pub const ENV_CIRCLECI_URL: &str = "CIRCLECI_URL";
/// Number of recent builds to request
pub const ENV_CIRCLECI_GET_BUILD_LIMIT: &str = "CIRCLECI_GET_BUILD_LIMIT";
/// Owner whose builds are exported
pub const ENV_GITHUB_ORGANIZATION_NAME: &str = "GITHUB_ORGANIZATION_NAME";
/// AWS region of the DynamoDB table
pub const ENV_DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";
/// DynamoDB table name
pub const ENV_DYNAMODB_TABLE_NAME: &str = "DYNAMODB_TABLE_NAME";
/// Destination bucket name or URL
pub const ENV_S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
/// Endpoint override for DynamoDB Local / LocalStack
pub const ENV_DYNAMODB_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";
/// Secondary index sorted by owner and `queued_at`
pub const ENV_DYNAMODB_INDEX_NAME: &str = "DYNAMODB_INDEX_NAME";
/// UTC offset used to name exported objects
///
/// A fixed offset such as `+09:00`. Zone names like `Asia/Tokyo` are not
/// accepted, so zones with daylight saving time need the offset updated
/// when it changes.
pub const ENV_EXPORT_UTC_OFFSET: &str = "EXPORT_UTC_OFFSET";
/// Directory for the scratch NDJSON file
pub const ENV_EXPORT_SCRATCH_DIR: &str = "EXPORT_SCRATCH_DIR";
/// Keep the scratch file after upload
pub const ENV_EXPORT_KEEP_LOCAL_FILE: &str = "EXPORT_KEEP_LOCAL_FILE";

// ============================================================================
// Defaults
// ============================================================================

/// Public CircleCI host; any other base URL is treated as self-hosted
pub const PUBLIC_CIRCLECI_URL: &str = "https://circleci.com";

/// Default secondary index name
pub const DEFAULT_INDEX_NAME: &str = "sort_queued_at";

/// Default offset for object naming (JST, which has no daylight saving time)
pub const DEFAULT_UTC_OFFSET: &str = "+09:00";

// ============================================================================
// Config Structs
// ============================================================================

/// CircleCI API settings
#[derive(Clone)]
pub struct CircleCiConfig {
    /// API token, sent as the Basic-auth username
    pub token: String,
    /// Base URL, e.g. `https://circleci.com`
    pub base_url: String,
    /// `limit` query parameter for recent builds
    pub build_limit: u32,
}

impl fmt::Debug for CircleCiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircleCiConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("build_limit", &self.build_limit)
            .finish()
    }
}

/// DynamoDB table settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Table name
    pub table_name: String,
    /// AWS region
    pub region: String,
    /// Optional endpoint override
    pub endpoint_url: Option<String>,
    /// Index queried by the export job
    pub index_name: String,
}

/// Settings for the ingest job
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// CI provider
    pub circleci: CircleCiConfig,
    /// Destination table
    pub store: StoreConfig,
}

/// Settings for the export job
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Owner value matched against the index partition key
    pub organization: String,
    /// Source table
    pub store: StoreConfig,
    /// Bucket name or destination URL
    pub destination: String,
    /// Offset used for object path naming only
    pub utc_offset: FixedOffset,
    /// Where the scratch file is written
    pub scratch_dir: PathBuf,
    /// Keep the scratch file instead of deleting it
    pub keep_local_file: bool,
}

impl IngestConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        Ok(Self {
            circleci: CircleCiConfig::load(&env)?,
            store: StoreConfig::load(&env)?,
        })
    }
}

impl ExportConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let utc_offset = match env.optional(ENV_EXPORT_UTC_OFFSET) {
            Some(raw) => parse_utc_offset(&raw)
                .map_err(|message| Error::invalid_value(ENV_EXPORT_UTC_OFFSET, message))?,
            None => parse_utc_offset(DEFAULT_UTC_OFFSET).map_err(Error::config)?,
        };
        let keep_local_file = match env.optional(ENV_EXPORT_KEEP_LOCAL_FILE) {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| Error::invalid_value(ENV_EXPORT_KEEP_LOCAL_FILE, raw))?,
            None => false,
        };

        Ok(Self {
            organization: env.required(ENV_GITHUB_ORGANIZATION_NAME)?,
            store: StoreConfig::load(&env)?,
            destination: env.required(ENV_S3_BUCKET_NAME)?,
            utc_offset,
            scratch_dir: env
                .optional(ENV_EXPORT_SCRATCH_DIR)
                .map_or_else(std::env::temp_dir, PathBuf::from),
            keep_local_file,
        })
    }
}

impl CircleCiConfig {
    fn load<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self> {
        let raw_limit = env.required(ENV_CIRCLECI_GET_BUILD_LIMIT)?;
        let build_limit = raw_limit
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::invalid_value(
                    ENV_CIRCLECI_GET_BUILD_LIMIT,
                    format!("expected a positive integer, got '{raw_limit}'"),
                )
            })?;

        Ok(Self {
            token: env.required(ENV_CIRCLECI_TOKEN)?,
            base_url: env.required(ENV_CIRCLECI_URL)?,
            build_limit,
        })
    }

    /// Whether this points at the public SaaS host
    pub fn is_public_host(&self) -> bool {
        self.base_url.trim_end_matches('/') == PUBLIC_CIRCLECI_URL
    }
}

impl StoreConfig {
    fn load<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self> {
        Ok(Self {
            table_name: env.required(ENV_DYNAMODB_TABLE_NAME)?,
            region: env.required(ENV_DYNAMODB_ENDPOINT)?,
            endpoint_url: env.optional(ENV_DYNAMODB_ENDPOINT_URL),
            index_name: env
                .optional(ENV_DYNAMODB_INDEX_NAME)
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Blank values count as unset
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key).ok_or_else(|| Error::missing_field(key))
    }
}

/// Parse `+09:00`, `-0530`, `+9`, `Z` or `UTC` into a fixed offset
pub fn parse_utc_offset(raw: &str) -> std::result::Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "zero offset rejected".to_string());
    }

    for pattern in ["%:z", "%z"] {
        let mut parsed = Parsed::new();
        if format::parse(&mut parsed, raw, StrftimeItems::new(pattern)).is_ok() {
            return parsed
                .to_fixed_offset()
                .map_err(|e| format!("invalid offset '{raw}': {e}"));
        }
    }

    // Hour-only shorthand, e.g. `+9`
    let (sign, hours) = if let Some(hours) = raw.strip_prefix('+') {
        (1, hours)
    } else if let Some(hours) = raw.strip_prefix('-') {
        (-1, hours)
    } else {
        return Err(format!("expected an offset like +09:00, got '{raw}'"));
    };
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected an offset like +09:00, got '{raw}'"));
    }
    let hours: i32 = hours
        .parse()
        .map_err(|_| format!("invalid hours in offset '{raw}'"))?;
    if hours > 23 {
        return Err(format!("offset out of range: '{raw}'"));
    }

    FixedOffset::east_opt(sign * hours * 3600)
        .ok_or_else(|| format!("offset out of range: '{raw}'"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
