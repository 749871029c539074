//! Target management API client
//!
//! [`TargetApi`] is the seam between the deletion workflow and the network.
//! [`HttpTargetApi`] is the real implementation over a blocking `reqwest`
//! client; tests substitute their own.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::error::api::{connection_failed, migration_decode_failed, migration_lookup_failed};

/// Characters left unescaped in URL path and query components
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Result of one recursive delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 200
    Deleted,
    /// 404, nothing left to delete
    AlreadyAbsent,
    /// Any other status
    Failed { status: u16 },
}

impl DeleteOutcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => DeleteOutcome::Deleted,
            404 => DeleteOutcome::AlreadyAbsent,
            status => DeleteOutcome::Failed { status },
        }
    }
}

/// Migration record returned by `GET /migrations/{id}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Migration {
    /// Target filesystem name
    pub target: String,
    #[serde(default)]
    pub migration_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Serialize)]
struct DeleteRequest {
    recursive: &'static str,
}

/// Operations the deletion workflow needs from the management API
///
/// `Err` is reserved for failures to talk to the API at all; an HTTP error
/// status on a delete is an [`DeleteOutcome::Failed`] value.
pub trait TargetApi: Sync {
    /// Recursively delete `path` on the target filesystem
    fn delete_by_path(&self, filesystem: &str, path: &str) -> Result<DeleteOutcome>;

    /// Look up a migration by id
    fn migration(&self, id: &str) -> Result<Migration>;
}

/// [`TargetApi`] over HTTP
pub struct HttpTargetApi<'a> {
    config: &'a ApiConfig,
    client: Client,
}

impl<'a> HttpTargetApi<'a> {
    pub fn new(config: &'a ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| connection_failed(config.endpoint(), e.to_string()))?;
        Ok(Self { config, client })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.credentials() {
            Some((username, password)) => request.basic_auth(username, password),
            None => request,
        }
    }
}

impl TargetApi for HttpTargetApi<'_> {
    fn delete_by_path(&self, filesystem: &str, path: &str) -> Result<DeleteOutcome> {
        let url = delete_url(self.config.origin(), filesystem, path);
        debug!(%url, "POST");

        let response = self
            .authorize(self.client.post(&url))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&DeleteRequest { recursive: "true" })
            .send()
            .map_err(|e| connection_failed(self.config.endpoint(), e.to_string()))?;

        Ok(DeleteOutcome::from_status(response.status().as_u16()))
    }

    fn migration(&self, id: &str) -> Result<Migration> {
        let url = migration_url(self.config.origin(), id);
        debug!(%url, "GET");

        let response = self
            .authorize(self.client.get(&url))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|e| connection_failed(self.config.endpoint(), e.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(migration_lookup_failed(id, status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| connection_failed(self.config.endpoint(), e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| migration_decode_failed(id, e.to_string()))
    }
}

/// Percent-encode a path or name, leaving `/` intact
pub fn quote(value: &str) -> String {
    utf8_percent_encode(value, QUOTE_SAFE).to_string()
}

pub fn delete_url(origin: &str, filesystem: &str, path: &str) -> String {
    format!(
        "{origin}/fs/targets/{}/deleteByPath?path={}",
        quote(filesystem),
        quote(path)
    )
}

pub fn migration_url(origin: &str, id: &str) -> String {
    format!("{origin}/migrations/{}", quote(id))
}
