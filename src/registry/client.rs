//! Harbor repository tag-listing client

use crate::registry::auth::AuthChain;
use crate::registry::tags::{decode_listing, TagRecord};
use crate::{LookupError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

/// URL scheme used to reach the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP, for loopback or test registries only
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// How non-2xx responses are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Fail with [`LookupError::Status`] on any non-2xx response
    #[default]
    RequireSuccess,
    /// Decode the body whatever the status code
    Ignore,
}

/// Transport options for [`RegistryClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub scheme: Scheme,
    /// Overall request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    pub status_policy: StatusPolicy,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            timeout: None,
            status_policy: StatusPolicy::default(),
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
        }
    }
}

/// Registry client that lists a repository's tags
pub struct RegistryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RegistryClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with explicit settings
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// `{scheme}://{host}/api/repositories/{repository}/tags`
    pub fn tags_url(&self, host: &str, repository: &str) -> String {
        format!(
            "{}://{}/api/repositories/{}/tags",
            self.config.scheme.as_str(),
            host,
            repository
        )
    }

    /// Fetch the tag listing of `repository` on `host`.
    ///
    /// Issues exactly one GET request, with no retries.
    pub async fn fetch_tags(
        &self,
        host: &str,
        repository: &str,
        auth: &AuthChain,
    ) -> Result<Vec<TagRecord>> {
        if host.trim().is_empty() {
            return Err(LookupError::InvalidArgument(
                "registry host must not be empty".to_string(),
            ));
        }
        if repository.trim().is_empty() {
            return Err(LookupError::InvalidArgument(
                "repository must not be empty".to_string(),
            ));
        }

        let url = self.tags_url(host, repository);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        auth.apply(&mut headers)?;

        tracing::debug!(%url, auth_headers = auth.header_count(), "listing tags");

        let response = self.client.get(&url).headers(headers).send().await?;
        let status = response.status();

        if !status.is_success() {
            match self.config.status_policy {
                StatusPolicy::RequireSuccess => {
                    return Err(LookupError::Status {
                        status: status.as_u16(),
                        url,
                    });
                }
                StatusPolicy::Ignore => {
                    tracing::warn!(%url, %status, "registry returned an error status, decoding body anyway");
                }
            }
        }

        let body = response.bytes().await?;
        let records = decode_listing(&body)?;

        tracing::debug!(count = records.len(), "decoded tag listing");

        Ok(records)
    }
}
