//! Authentication layers for registry requests
//!
//! Every request carries the built-in service credential unless it is turned
//! off, and user credentials are stacked on top of it. Layers are cumulative:
//! each one appends its own `Authorization` header, so a request can end up
//! with two of them. Which one the registry honours is up to the registry.

use crate::{LookupError, Result};
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::fmt;

/// Built-in service credential sent with every request by default
pub const BUILTIN_AUTHORIZATION: &str = "Basic YWRtaW46SGFyYm9yMTIzNDU=";

/// Username/password pair for HTTP basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build credentials when either half is non-empty; the missing half is empty
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|s| !s.is_empty());
        let password = password.filter(|s| !s.is_empty());
        if username.is_none() && password.is_none() {
            return None;
        }
        Some(Self::new(
            username.unwrap_or_default(),
            password.unwrap_or_default(),
        ))
    }

    /// `Basic <base64(username:password)>`
    pub fn basic_header(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A single authentication strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthLayer {
    /// Adds nothing
    None,

    /// HTTP basic authentication with user credentials
    Basic(Credentials),

    /// A verbatim `Authorization` header value
    FixedHeader(String),
}

impl AuthLayer {
    /// The `Authorization` value this layer contributes, if any
    fn header_value(&self) -> Option<String> {
        match self {
            AuthLayer::None => None,
            AuthLayer::Basic(creds) => Some(creds.basic_header()),
            AuthLayer::FixedHeader(value) => Some(value.clone()),
        }
    }
}

/// Ordered, cumulative set of authentication layers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthChain {
    layers: Vec<AuthLayer>,
}

impl AuthChain {
    /// A chain that sends no `Authorization` header
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The default chain: built-in credential (if enabled), then user credentials
    pub fn standard(credentials: Option<Credentials>, builtin: bool) -> Self {
        let mut chain = Self::anonymous();
        if builtin {
            chain = chain.with(AuthLayer::FixedHeader(BUILTIN_AUTHORIZATION.to_string()));
        }
        if let Some(creds) = credentials {
            chain = chain.with(AuthLayer::Basic(creds));
        }
        chain
    }

    /// Append a layer
    pub fn with(mut self, layer: AuthLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(&self) -> &[AuthLayer] {
        &self.layers
    }

    /// Number of `Authorization` headers this chain produces
    pub fn header_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|layer| !matches!(layer, AuthLayer::None))
            .count()
    }

    /// Append every layer's `Authorization` header to `headers`, in order
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        for layer in &self.layers {
            if let Some(value) = layer.header_value() {
                let mut value = HeaderValue::from_str(&value).map_err(|_| {
                    LookupError::InvalidHeader("credentials are not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                headers.append(AUTHORIZATION, value);
            }
        }

        if self.header_count() > 1 {
            tracing::warn!(
                count = self.header_count(),
                "sending multiple Authorization headers; the registry decides which one applies"
            );
        }

        Ok(())
    }
}
