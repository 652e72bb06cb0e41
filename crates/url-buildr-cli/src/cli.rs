use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use url_buildr_core::{Field, PlaceholderMode, QueryEncoding, UrlBuilder, UrlOptions};

/// Assemble a URL from its parts and print it.
#[derive(Debug, Parser)]
#[command(name = "url-buildr", version)]
#[command(about = "Assemble a URL from a base, path segments, placeholders and queries", long_about = None)]
pub struct Cli {
    /// Literal base URL (e.g. https://example.com:8443). Defaults are not applied.
    #[arg(conflicts_with_all = ["init", "init_file"])]
    pub literal: Option<String>,

    /// Structured initializer as inline JSON.
    #[arg(long, value_name = "JSON", conflicts_with = "init_file")]
    pub init: Option<String>,

    /// Structured initializer read from a JSON file.
    #[arg(long, value_name = "PATH")]
    pub init_file: Option<PathBuf>,

    /// JSON file with defaults for fields the initializer leaves unset.
    #[arg(long, value_name = "PATH")]
    pub defaults: Option<PathBuf>,

    /// Append a path segment (repeatable).
    #[arg(long = "add", value_name = "SEGMENT")]
    pub additions: Vec<String>,

    /// Substitute a `:name` placeholder (repeatable).
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// Append a query pair (repeatable).
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub queries: Vec<(String, String)>,

    /// Override prefix, host, port or pathPrefix (repeatable).
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_setting)]
    pub settings: Vec<(Field, String)>,

    /// Percent-encode query keys and values.
    #[arg(long)]
    pub encode_queries: bool,

    /// Substitute only the first occurrence of each placeholder.
    #[arg(long)]
    pub first_placeholder_only: bool,
}

impl Cli {
    /// Turn the parsed arguments into a builder.
    pub fn build(self) -> Result<UrlBuilder> {
        let mut builder = match self.literal {
            Some(literal) => {
                if self.defaults.is_some() {
                    tracing::warn!("--defaults is ignored for a literal base URL");
                }
                UrlBuilder::from_literal(&literal)
            }
            None => {
                let defaults = match &self.defaults {
                    Some(path) => UrlOptions::from_path(path)
                        .with_context(|| format!("loading defaults from {}", path.display()))?,
                    None => UrlOptions::default(),
                };
                let options = match (self.init, &self.init_file) {
                    (Some(json), _) => {
                        UrlOptions::from_json_str(&json).context("parsing --init")?
                    }
                    (None, Some(path)) => UrlOptions::from_path(path)
                        .with_context(|| format!("loading initializer from {}", path.display()))?,
                    (None, None) => UrlOptions::new(),
                };
                tracing::debug!(?options, "initializer");
                UrlBuilder::with_defaults(options, &defaults).context("building initializer")?
            }
        };

        for (field, value) in self.settings {
            builder = builder.set(field, value);
        }
        builder = builder
            .add(&self.additions)
            .params(self.params)
            .queries(self.queries);

        if self.encode_queries {
            builder = builder.with_query_encoding(QueryEncoding::Form);
        }
        if self.first_placeholder_only {
            builder = builder.with_placeholders(PlaceholderMode::First);
        }
        Ok(builder)
    }
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))
}

fn parse_setting(s: &str) -> std::result::Result<(Field, String), String> {
    let (field, value) = parse_pair(s)?;
    let field = field.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn build(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(std::iter::once("url-buildr").chain(args.iter().copied()))
            .unwrap();
        cli.build().unwrap().into_string()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_literal_with_mutators() {
        let url = build(&[
            "https://thegreatsite.co:65132",
            "--add",
            "accounts",
            "--add",
            "/users",
            "--add",
            "/:userId/",
            "--add",
            "cart",
            "--query",
            "showAllPurchases=true",
            "--param",
            "userId=54298",
        ]);
        assert_eq!(
            url,
            "https://thegreatsite.co:65132/accounts/users/54298/cart?showAllPurchases=true"
        );
    }

    #[test]
    fn test_inline_init() {
        let url = build(&[
            "--init",
            r#"{"prefix": "https://", "host": "example.com", "additions": [":id"]}"#,
            "--param",
            "id=7",
            "--set",
            "port=8443",
        ]);
        assert_eq!(url, "https://example.com:8443/7");
    }

    #[test]
    fn test_defaults_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"prefix": "http://", "host": "localhost", "port": 8080}"#)
            .unwrap();

        let url = build(&[
            "--defaults",
            file.path().to_str().unwrap(),
            "--add",
            "health",
        ]);
        assert_eq!(url, "http://localhost:8080/health");
    }

    #[test]
    fn test_encode_and_first_placeholder() {
        let url = build(&[
            "h",
            "--add",
            ":x",
            "--add",
            ":x",
            "--param",
            "x=1",
            "--query",
            "q=a b",
            "--encode-queries",
            "--first-placeholder-only",
        ]);
        assert_eq!(url, "h/1/:x?q=a+b");
    }

    #[test]
    fn test_literal_conflicts_with_init() {
        let result = Cli::try_parse_from(["url-buildr", "h", "--init", "{}"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(
            parse_setting("pathPrefix=/v1").unwrap(),
            (Field::PathPrefix, "/v1".to_string())
        );
        assert!(parse_setting("scheme=https").is_err());
    }
}
