//! Fluent URL builder with a render cache.
//!
//! A [`UrlBuilder`] owns one [`Descriptor`]. Mutators consume and return the
//! builder so calls chain; every one of them drops the cached string. The
//! string is rendered on the first call to [`UrlBuilder::as_str`] (or
//! `Display`) after a mutation and reused until the next one.

use serde_json::Value;
use std::cell::OnceCell;
use std::fmt::{self, Display};
use tracing::{debug, trace};
use url::Url;

use crate::canonical::accumulate;
use crate::config::{Field, PlaceholderMode, Port, QueryEncoding, UrlOptions};
use crate::descriptor::{sanitize, Descriptor};
use crate::error::{Error, Result};
use crate::render::{render, RenderPolicy};

/// Declarative URL builder.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use url_buildr_core::{UrlBuilder, UrlOptions};
///
/// let structured = UrlBuilder::new(
///     UrlOptions::new()
///         .with_prefix("https://")
///         .with_host("thegreatsite.co")
///         .with_port(65132u32)
///         .with_path_prefix("/accounts")
///         .with_additions(["users", ":userId", "cart"])
///         .with_params(json!({"userId": 54298}))
///         .with_queries(json!({"showAllPurchases": true})),
/// )?;
///
/// let fluent = UrlBuilder::from_literal("https://thegreatsite.co:65132")
///     .add(["accounts", "/users", "/:userId/", "cart"])
///     .query("showAllPurchases", true)
///     .param("userId", 54298);
///
/// assert_eq!(
///     structured.as_str(),
///     "https://thegreatsite.co:65132/accounts/users/54298/cart?showAllPurchases=true"
/// );
/// assert_eq!(structured.as_str(), fluent.as_str());
/// # Ok::<_, url_buildr_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    descriptor: Descriptor,
    policy: RenderPolicy,
    baseline: Descriptor,
    baseline_policy: RenderPolicy,
    cache: OnceCell<String>,
}

impl UrlBuilder {
    /// Builder whose host is the whole `literal`; no defaults are applied.
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        Self {
            descriptor: Descriptor::from_literal(literal),
            policy: RenderPolicy::default(),
            baseline: Descriptor::default(),
            baseline_policy: RenderPolicy::default(),
            cache: OnceCell::new(),
        }
    }

    /// Builder from a structured initializer over empty defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentShape`] if `params` or `queries` cannot
    /// be canonicalized.
    pub fn new(options: UrlOptions) -> Result<Self> {
        Self::with_defaults(options, &UrlOptions::default())
    }

    /// Builder from a structured initializer merged over `defaults`.
    ///
    /// Caller-supplied fields win; unset fields are cloned from `defaults`.
    /// [`clear`](Self::clear) returns to `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentShape`] if `params` or `queries` of
    /// either option set cannot be canonicalized.
    pub fn with_defaults(options: UrlOptions, defaults: &UrlOptions) -> Result<Self> {
        let baseline = Descriptor::from_options(defaults)?;
        let baseline_policy = policy_of(defaults);
        let merged = options.merged_over(defaults);
        let descriptor = Descriptor::from_options(&merged)?;

        Ok(Self {
            descriptor,
            policy: policy_of(&merged),
            baseline,
            baseline_policy,
            cache: OnceCell::new(),
        })
    }

    /// Set one scalar option.
    ///
    /// `Field::PathPrefix` values are sanitized like path segments.
    #[must_use]
    pub fn set(mut self, field: Field, value: impl Display) -> Self {
        let value = value.to_string();
        trace!(%field, %value, "set option");
        match field {
            Field::Prefix => self.descriptor.prefix = value,
            Field::Host => self.descriptor.host = value,
            Field::Port => self.descriptor.port = Some(Port::Text(value)),
            Field::PathPrefix => self.descriptor.path_prefix = sanitize(&value).to_string(),
        }
        self.invalidate();
        self
    }

    /// Replace prefix, host, port, path prefix and rendering policies.
    ///
    /// Unset fields become empty. Segments, params and queries are kept.
    #[must_use]
    pub fn set_options(mut self, options: &UrlOptions) -> Self {
        self.descriptor.apply_scalars(options);
        self.policy = policy_of(options);
        self.invalidate();
        self
    }

    /// Append path segments in order, each sanitized.
    #[must_use]
    pub fn add<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.descriptor.push_segments(segments);
        self.invalidate();
        self
    }

    /// Set one placeholder value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.descriptor.params.insert(name, value);
        self.invalidate();
        self
    }

    /// Merge placeholder values; incoming names overwrite existing ones.
    #[must_use]
    pub fn params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        self.descriptor.params.extend(pairs);
        self.invalidate();
        self
    }

    /// Canonicalize `args` and merge them as placeholder values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentShape`] if `args` cannot be classified.
    pub fn param_args(mut self, args: &[Value]) -> Result<Self> {
        let incoming = accumulate(args)?;
        self.descriptor.params.merge(incoming);
        self.invalidate();
        Ok(self)
    }

    /// Set one query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.descriptor.queries.insert(key, value);
        self.invalidate();
        self
    }

    /// Merge query pairs; incoming keys overwrite existing ones.
    #[must_use]
    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        self.descriptor.queries.extend(pairs);
        self.invalidate();
        self
    }

    /// Canonicalize `args` and merge them as query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentShape`] if `args` cannot be classified.
    pub fn query_args(mut self, args: &[Value]) -> Result<Self> {
        let incoming = accumulate(args)?;
        self.descriptor.queries.merge(incoming);
        self.invalidate();
        Ok(self)
    }

    /// Set the query encoding.
    #[must_use]
    pub fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.policy.query_encoding = encoding;
        self.invalidate();
        self
    }

    /// Set the placeholder substitution mode.
    #[must_use]
    pub fn with_placeholders(mut self, mode: PlaceholderMode) -> Self {
        self.policy.placeholders = mode;
        self.invalidate();
        self
    }

    /// Reset every field, including segments, params and queries, to the
    /// defaults this builder was created with.
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.descriptor = self.baseline.clone();
        self.policy = self.baseline_policy;
        self.invalidate();
        self
    }

    /// Rendered URL, rebuilt only after a mutation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.cache.get_or_init(|| {
            let url = render(&self.descriptor, self.policy);
            debug!(%url, "rendered URL");
            url
        })
    }

    /// Consume the builder and return the rendered URL.
    #[must_use]
    pub fn into_string(self) -> String {
        match self.cache.into_inner() {
            Some(url) => url,
            None => render(&self.descriptor, self.policy),
        }
    }

    /// Parse the rendered string as an absolute [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the rendered string is not absolute
    /// or otherwise rejected by the `url` crate.
    pub fn to_url(&self) -> Result<Url> {
        Url::parse(self.as_str()).map_err(Error::from)
    }

    /// Returns true if the cached string reflects the current state.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Current URL parts.
    #[must_use]
    pub const fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Current rendering policy.
    #[must_use]
    pub const fn policy(&self) -> RenderPolicy {
        self.policy
    }

    fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            trace!("render cache invalidated");
        }
    }
}

fn policy_of(options: &UrlOptions) -> RenderPolicy {
    RenderPolicy {
        query_encoding: options.query_encoding.unwrap_or_default(),
        placeholders: options.placeholders.unwrap_or_default(),
    }
}

impl Display for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UrlBuilder {
    fn from(literal: &str) -> Self {
        Self::from_literal(literal)
    }
}

impl From<String> for UrlBuilder {
    fn from(literal: String) -> Self {
        Self::from_literal(&literal)
    }
}

impl TryFrom<UrlOptions> for UrlBuilder {
    type Error = Error;

    fn try_from(options: UrlOptions) -> Result<Self> {
        Self::new(options)
    }
}
