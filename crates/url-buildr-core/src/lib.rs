//! # url-buildr-core
//!
//! Declarative URL assembly.
//!
//! A URL is described by its parts (prefix, host, port, path prefix, path
//! segments, `:name` placeholders and query pairs) and rendered into a single
//! string. Builders can be created from a literal base URL or from a
//! structured [`UrlOptions`] initializer, mutated fluently, and rendered on
//! demand; the rendered string is cached until the next mutation.
//!
//! ## Modules
//!
//! - [`error`] - Error type and error codes
//! - [`config`] - Initializer/defaults record and rendering policies
//! - [`query`] - Insertion-ordered name/value mapping
//! - [`canonical`] - Folding of heterogeneous arguments into a mapping
//! - [`descriptor`] - The URL parts record and path sanitization
//! - [`render`] - Rendering of a descriptor into a string
//! - [`builder`] - The fluent [`UrlBuilder`]

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod canonical;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod query;
pub mod render;

// Re-export commonly used types
pub use builder::UrlBuilder;
pub use canonical::accumulate;
pub use config::{Field, PlaceholderMode, Port, QueryEncoding, UrlOptions};
pub use descriptor::{sanitize, Descriptor};
pub use error::{Error, Result};
pub use query::ParamMap;
pub use render::{render, RenderPolicy};
