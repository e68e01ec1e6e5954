//! CircleCI recent-builds source
//!
//! See <https://circleci.com/docs/api/v1-reference/#recent-builds>. The
//! public host serves `api/v1.1/recent-builds`; self-hosted installations
//! expose the same listing under `api/v1/admin/recent-builds`.

use crate::config::{CircleCiConfig, PUBLIC_CIRCLECI_URL};
use crate::error::{Error, Result};
use crate::http::{Credentials, HttpClient, HttpClientConfig, RequestConfig};
use crate::types::JsonValue;
use async_trait::async_trait;
use url::Url;

/// Recent-builds path on the public host
pub const PUBLIC_RECENT_BUILDS_PATH: &str = "api/v1.1/recent-builds";

/// Recent-builds path on self-hosted installations
pub const ADMIN_RECENT_BUILDS_PATH: &str = "api/v1/admin/recent-builds";

/// Something that yields the latest build records
#[async_trait]
pub trait BuildSource: Send + Sync {
    /// Fetch the most recent builds, newest first
    async fn recent_builds(&self) -> Result<Vec<JsonValue>>;
}

/// Resolve the recent-builds endpoint for a base URL
pub fn recent_builds_url(base_url: &str) -> Result<String> {
    let base = base_url.trim_end_matches('/');
    Url::parse(base)?;

    let path = if base == PUBLIC_CIRCLECI_URL {
        PUBLIC_RECENT_BUILDS_PATH
    } else {
        ADMIN_RECENT_BUILDS_PATH
    };
    Ok(format!("{base}/{path}"))
}

/// CircleCI API client for the recent-builds listing
#[derive(Debug)]
pub struct CircleCiSource {
    http: HttpClient,
    endpoint: String,
    limit: u32,
}

impl CircleCiSource {
    /// Build a source from config
    pub fn new(config: &CircleCiConfig) -> Result<Self> {
        let endpoint = recent_builds_url(&config.base_url)?;
        let http = HttpClient::with_config(
            HttpClientConfig::builder()
                .header("Accept", "application/json")
                .credentials(Credentials::token(config.token.clone()))
                .build(),
        )?;

        Ok(Self {
            http,
            endpoint,
            limit: config.build_limit,
        })
    }
}

#[async_trait]
impl BuildSource for CircleCiSource {
    async fn recent_builds(&self) -> Result<Vec<JsonValue>> {
        let request = RequestConfig::new()
            .query("limit", self.limit)
            .query("offset", 0);

        let body: JsonValue = self
            .http
            .get_json_with_config(&self.endpoint, request)
            .await?;

        match body {
            JsonValue::Array(builds) => Ok(builds),
            other => Err(Error::invalid_input(format!(
                "expected a JSON array of builds from {}, got {}",
                self.endpoint,
                if other.is_object() { "an object" } else { "a scalar" }
            ))),
        }
    }
}
