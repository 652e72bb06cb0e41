//! Initializer and defaults for URL builders.
//!
//! [`UrlOptions`] serves both as the structured initializer passed to
//! [`UrlBuilder::new`](crate::UrlBuilder::new) and as the defaults record it
//! is merged over. Every field is optional: a field left unset falls back to
//! the defaults, and a field unset in both renders as absent.
//!
//! Options deserialize from JSON with camelCase keys, so a static
//! `defaults.json` can be loaded with [`UrlOptions::from_path`]:
//!
//! ```json
//! {
//!   "prefix": "https://",
//!   "host": "thegreatsite.co",
//!   "port": 65132,
//!   "pathPrefix": "/accounts",
//!   "additions": ["users", ":userId", "cart"],
//!   "params": { "userId": 54298 },
//!   "queries": ["showAllPurchases", true]
//! }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Structured URL initializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlOptions {
    /// Literal placed before the host, e.g. `https://`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Host name; without it no base URL is assembled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port rendered as `:port` after the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    /// First path segment, placed right after host and port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,

    /// Path segments appended after the path prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<Vec<String>>,

    /// Placeholder values, as a mapping or an alternating list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Query pairs, as a mapping or an alternating list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Value>,

    /// How query keys and values are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_encoding: Option<QueryEncoding>,

    /// Whether every placeholder occurrence is substituted or only the first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<PlaceholderMode>,
}

impl UrlOptions {
    /// Create an empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: None,
            host: None,
            port: None,
            path_prefix: None,
            additions: None,
            params: None,
            queries: None,
            query_encoding: None,
            placeholders: None,
        }
    }

    /// Set the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the port.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<Port>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the path prefix.
    #[must_use]
    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(path_prefix.into());
        self
    }

    /// Set the path segments.
    #[must_use]
    pub fn with_additions<I, S>(mut self, additions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additions = Some(additions.into_iter().map(Into::into).collect());
        self
    }

    /// Set the placeholder values.
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the query pairs.
    #[must_use]
    pub fn with_queries(mut self, queries: Value) -> Self {
        self.queries = Some(queries);
        self
    }

    /// Set the query encoding.
    #[must_use]
    pub const fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = Some(encoding);
        self
    }

    /// Set the placeholder substitution mode.
    #[must_use]
    pub const fn with_placeholders(mut self, mode: PlaceholderMode) -> Self {
        self.placeholders = Some(mode);
        self
    }

    /// Fill every unset field from `defaults`.
    ///
    /// Fields are merged one by one; a set field is never combined with the
    /// default (e.g. `additions` replaces the default list, it does not extend it).
    #[must_use]
    pub fn merged_over(self, defaults: &Self) -> Self {
        Self {
            prefix: self.prefix.or_else(|| defaults.prefix.clone()),
            host: self.host.or_else(|| defaults.host.clone()),
            port: self.port.or_else(|| defaults.port.clone()),
            path_prefix: self.path_prefix.or_else(|| defaults.path_prefix.clone()),
            additions: self.additions.or_else(|| defaults.additions.clone()),
            params: self.params.or_else(|| defaults.params.clone()),
            queries: self.queries.or_else(|| defaults.queries.clone()),
            query_encoding: self.query_encoding.or(defaults.query_encoding),
            placeholders: self.placeholders.or(defaults.placeholders),
        }
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is not valid JSON or
    /// does not have the expected shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid URL options: {e}")))
    }

    /// Load options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }
}

/// Port number or service text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    /// Numeric port; `0` is treated as unset
    Number(u64),
    /// Textual port; an empty string is treated as unset
    Text(String),
}

impl Port {
    /// Returns true if the port should be rendered.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(u64::from(port))
    }
}

impl From<u32> for Port {
    fn from(port: u32) -> Self {
        Self::Number(u64::from(port))
    }
}

impl From<&str> for Port {
    fn from(port: &str) -> Self {
        Self::Text(port.to_string())
    }
}

impl From<String> for Port {
    fn from(port: String) -> Self {
        Self::Text(port)
    }
}

/// How query keys and values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryEncoding {
    /// Written verbatim
    #[default]
    Raw,
    /// Percent-encoded with `application/x-www-form-urlencoded` rules
    Form,
}

/// Which occurrences of a `:name` placeholder are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    /// Every qualifying occurrence
    #[default]
    All,
    /// Only the first qualifying occurrence
    First,
}

/// Scalar option addressed by [`UrlBuilder::set`](crate::UrlBuilder::set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `prefix`
    Prefix,
    /// `host`
    Host,
    /// `port`
    Port,
    /// `pathPrefix`
    PathPrefix,
}

impl Field {
    /// Option name as it appears in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Host => "host",
            Self::Port => "port",
            Self::PathPrefix => "pathPrefix",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefix" => Ok(Self::Prefix),
            "host" => Ok(Self::Host),
            "port" => Ok(Self::Port),
            "pathPrefix" | "path_prefix" => Ok(Self::PathPrefix),
            other => Err(Error::InvalidField(other.to_string())),
        }
    }
}
