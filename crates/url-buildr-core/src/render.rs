//! Rendering of a [`Descriptor`] into a URL string.
//!
//! Rendering runs in a fixed order: base URL, path text, placeholder
//! substitution (path text only), query string. It never fails; missing parts
//! are left out and unmatched placeholders stay in the output verbatim.

use tracing::trace;
use url::form_urlencoded::byte_serialize;

use crate::config::{PlaceholderMode, QueryEncoding};
use crate::descriptor::Descriptor;
use crate::query::ParamMap;

/// Knobs that change how a descriptor is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPolicy {
    /// Query key/value encoding
    pub query_encoding: QueryEncoding,
    /// Placeholder substitution mode
    pub placeholders: PlaceholderMode,
}

/// Render `descriptor` into a URL string.
#[must_use]
pub fn render(descriptor: &Descriptor, policy: RenderPolicy) -> String {
    let mut url = base_url(descriptor);

    let mut path = path_text(descriptor);
    for (name, value) in descriptor.params.iter() {
        path = substitute(&path, name, value, policy.placeholders);
    }
    url.push_str(&path);

    push_queries(&mut url, &descriptor.queries, policy.query_encoding);
    url
}

/// `prefix + host[:port]`, or nothing when there is no host.
fn base_url(descriptor: &Descriptor) -> String {
    if descriptor.host.is_empty() {
        return String::new();
    }

    let mut base = format!("{}{}", descriptor.prefix, descriptor.host);
    if let Some(port) = descriptor.port.as_ref().filter(|p| p.is_set()) {
        base.push(':');
        base.push_str(&port.to_string());
    }
    base
}

fn path_text(descriptor: &Descriptor) -> String {
    let mut path = String::new();
    if !descriptor.host.is_empty() && !descriptor.path_prefix.is_empty() {
        path.push('/');
        path.push_str(&descriptor.path_prefix);
    }
    for segment in &descriptor.segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Replace `:name` tokens followed by `/` or the end of `path`.
///
/// A longer placeholder such as `:userId` never satisfies `:user`, because the
/// character after the name must be a separator.
#[must_use]
pub fn substitute(path: &str, name: &str, value: &str, mode: PlaceholderMode) -> String {
    let token = format!(":{name}");
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    let mut replaced = 0usize;

    while let Some(idx) = rest.find(&token) {
        let end = idx + token.len();
        let after = &rest[end..];
        if after.is_empty() || after.starts_with('/') {
            out.push_str(&rest[..idx]);
            out.push_str(value);
            replaced += 1;
            rest = after;
            if mode == PlaceholderMode::First {
                break;
            }
        } else {
            out.push_str(&rest[..end]);
            rest = after;
        }
    }
    out.push_str(rest);

    trace!(name, replaced, "substituted placeholder");
    out
}

fn push_queries(url: &mut String, queries: &ParamMap, encoding: QueryEncoding) {
    for (i, (key, value)) in queries.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        match encoding {
            QueryEncoding::Raw => {
                url.push_str(key);
                url.push('=');
                url.push_str(value);
            }
            QueryEncoding::Form => {
                url.extend(byte_serialize(key.as_bytes()));
                url.push('=');
                url.extend(byte_serialize(value.as_bytes()));
            }
        }
    }
}
