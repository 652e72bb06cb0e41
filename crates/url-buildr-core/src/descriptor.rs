//! The in-memory record of every URL part before rendering.

use crate::canonical::accumulate;
use crate::config::{Port, UrlOptions};
use crate::error::Result;
use crate::query::ParamMap;
use serde_json::Value;

/// Strip at most one leading and one trailing `/`.
///
/// ```
/// use url_buildr_core::sanitize;
///
/// assert_eq!(sanitize("/users/"), "users");
/// assert_eq!(sanitize("//users"), "/users");
/// ```
#[must_use]
pub fn sanitize(s: &str) -> &str {
    let s = s.strip_suffix('/').unwrap_or(s);
    s.strip_prefix('/').unwrap_or(s)
}

/// URL parts, ready for rendering.
///
/// Path-bound strings (`path_prefix` and each segment) are stored sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub(crate) prefix: String,
    pub(crate) host: String,
    pub(crate) port: Option<Port>,
    pub(crate) path_prefix: String,
    pub(crate) segments: Vec<String>,
    pub(crate) params: ParamMap,
    pub(crate) queries: ParamMap,
}

impl Descriptor {
    /// Descriptor whose host is the whole literal and nothing else is set.
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        Self {
            host: sanitize(literal).to_string(),
            ..Self::default()
        }
    }

    /// Descriptor built from fully merged options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentShape`](crate::Error::InvalidArgumentShape)
    /// if `params` or `queries` cannot be canonicalized.
    pub fn from_options(options: &UrlOptions) -> Result<Self> {
        let mut descriptor = Self::default();
        descriptor.apply_scalars(options);
        descriptor.push_segments(options.additions.iter().flatten());
        descriptor.params = accumulate_field(options.params.as_ref())?;
        descriptor.queries = accumulate_field(options.queries.as_ref())?;
        Ok(descriptor)
    }

    pub(crate) fn apply_scalars(&mut self, options: &UrlOptions) {
        self.prefix = options.prefix.clone().unwrap_or_default();
        self.host = options.host.clone().unwrap_or_default();
        self.port = options.port.clone();
        self.path_prefix = options
            .path_prefix
            .as_deref()
            .map(sanitize)
            .unwrap_or_default()
            .to_string();
    }

    pub(crate) fn push_segments<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segments.extend(
            segments
                .into_iter()
                .map(|segment| sanitize(segment.as_ref()).to_string()),
        );
    }

    /// Literal placed before the host.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Host, or the whole literal for literal-constructed descriptors.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port, if any.
    #[must_use]
    pub const fn port(&self) -> Option<&Port> {
        self.port.as_ref()
    }

    /// Sanitized path prefix.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Sanitized path segments in insertion order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Placeholder values.
    #[must_use]
    pub const fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Query pairs.
    #[must_use]
    pub const fn queries(&self) -> &ParamMap {
        &self.queries
    }
}

fn accumulate_field(value: Option<&Value>) -> Result<ParamMap> {
    match value {
        None | Some(Value::Null) => Ok(ParamMap::new()),
        Some(value) => accumulate(std::slice::from_ref(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_single_slashes() {
        assert_eq!(sanitize("/accounts"), "accounts");
        assert_eq!(sanitize("accounts/"), "accounts");
        assert_eq!(sanitize("/:userId/"), ":userId");
        assert_eq!(sanitize("cart"), "cart");
    }

    #[test]
    fn test_sanitize_strips_only_one_slash() {
        assert_eq!(sanitize("//users"), "/users");
        assert_eq!(sanitize("users//"), "users/");
        assert_eq!(sanitize("//"), "");
        assert_eq!(sanitize("/"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_from_literal() {
        let descriptor = Descriptor::from_literal("https://thegreatsite.co:65132/");
        assert_eq!(descriptor.host(), "https://thegreatsite.co:65132");
        assert_eq!(descriptor.prefix(), "");
        assert!(descriptor.port().is_none());
        assert!(descriptor.segments().is_empty());
    }

    #[test]
    fn test_from_options() {
        let options = UrlOptions::new()
            .with_host("thegreatsite.co")
            .with_path_prefix("/accounts/")
            .with_additions(["/users", ":userId/"])
            .with_params(json!({"userId": 54298}))
            .with_queries(json!(["a", 1, "b", 2]));
        let descriptor = Descriptor::from_options(&options).unwrap();

        assert_eq!(descriptor.path_prefix(), "accounts");
        assert_eq!(descriptor.segments(), ["users", ":userId"]);
        assert_eq!(descriptor.params().get("userId"), Some("54298"));
        assert_eq!(
            descriptor.queries().iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "2")]
        );
    }

    #[test]
    fn test_from_options_null_collections_are_empty() {
        let options = UrlOptions::new()
            .with_params(Value::Null)
            .with_queries(json!({}));
        let descriptor = Descriptor::from_options(&options).unwrap();
        assert!(descriptor.params().is_empty());
        assert!(descriptor.queries().is_empty());
    }

    #[test]
    fn test_from_options_rejects_nested_values() {
        let options = UrlOptions::new().with_queries(json!({"filter": {"a": 1}}));
        assert!(Descriptor::from_options(&options).is_err());
    }
}
