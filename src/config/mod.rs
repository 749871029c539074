//! Management API configuration
//!
//! Loaded from a JSON file of the form:
//!
//! ```json
//! {"api_endpoint": "http://localhost:18080", "username": "foo", "password": "bar"}
//! ```
//!
//! The loaded value is immutable and handed by reference to whatever talks to
//! the API.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::Result;
use crate::error::config::{invalid, not_found, parse_failed, read_failed};

#[derive(Deserialize)]
struct RawConfig {
    api_endpoint: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Validated connection settings for the management API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    endpoint: String,
    origin: String,
    username: Option<String>,
    password: Option<String>,
}

impl ApiConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(not_found(display));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| read_failed(&display, e.to_string()))?;

        Self::from_json(&display, &content)
    }

    /// Parse and validate configuration text; `source` names it in errors
    pub fn from_json(source: &str, content: &str) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_str(content).map_err(|e| parse_failed(source, e.to_string()))?;

        let endpoint = raw.api_endpoint.trim();
        if endpoint.is_empty() {
            return Err(invalid("api_endpoint must not be empty"));
        }

        let url = Url::parse(endpoint)
            .map_err(|e| invalid(format!("api_endpoint '{endpoint}' is not a URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "api_endpoint '{endpoint}' must use http or https"
            )));
        }
        if url.host_str().is_none() {
            return Err(invalid(format!("api_endpoint '{endpoint}' has no host")));
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            origin: url.origin().ascii_serialization(),
            username: raw.username.filter(|u| !u.is_empty()),
            password: raw.password,
        })
    }

    /// The endpoint as configured
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Scheme, host and port of the endpoint; request paths are appended to this
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Basic auth credentials, if a username is configured
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
