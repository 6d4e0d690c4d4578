//! Schema loading and dumping.
//!
//! Reads schema text from files or HTTP URLs, parses YAML (and therefore
//! JSON) into a tree, and serializes trees back to YAML.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where referenced schema files come from.
///
/// `reference` is the path written in the template; `base_dir` is the
/// directory of the file doing the referencing.
pub trait SchemaSource {
    fn read(&self, reference: &str, base_dir: &Path) -> Result<String, LoadError>;
}

/// Reads references relative to `base_dir` on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl SchemaSource for FileSource {
    fn read(&self, reference: &str, base_dir: &Path) -> Result<String, LoadError> {
        read_file(&base_dir.join(reference))
    }
}

/// Fetches `http://` and `https://` references, reading anything else
/// from the filesystem.
///
/// A relative reference under a URL base directory is fetched relative to
/// that URL.
#[cfg(feature = "remote")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteSource;

#[cfg(feature = "remote")]
impl SchemaSource for RemoteSource {
    fn read(&self, reference: &str, base_dir: &Path) -> Result<String, LoadError> {
        if is_url(reference) {
            return fetch_text(reference);
        }

        let base = base_dir.to_string_lossy();
        if is_url(&base) {
            let url = format!(
                "{}/{}",
                base.trim_end_matches('/'),
                reference.trim_start_matches("./")
            );
            return fetch_text(&url);
        }

        FileSource.read(reference, base_dir)
    }
}

/// Load and parse a schema file.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidYaml` if the file isn't valid YAML.
pub fn load_schema(path: &Path) -> Result<Value, LoadError> {
    let content = read_file(path)?;
    load_schema_str(&content)
}

/// Parse schema text. JSON input is accepted as YAML.
///
/// # Errors
///
/// Returns `LoadError::InvalidYaml` if the text doesn't parse.
pub fn load_schema_str(content: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml { source })
}

/// Serialize a tree as a YAML document.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

/// Indent every non-blank line of `text` by `width` spaces.
///
/// Used to nest a dumped fragment under a key in surrounding template text.
pub fn indent_block(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetch the body of an HTTP/HTTPS URL as text.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails or the server
/// answers with an error status.
#[cfg(feature = "remote")]
pub fn fetch_text(url: &str) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    // Check for HTTP errors before reading the body
    let response = response
        .error_for_status()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    response.text().map_err(|source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn load_schema_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "type: object\nproperties:\n  id:\n    type: string").unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["id"]["type"], "string");
    }

    #[test]
    fn load_schema_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type": "object"}}"#).unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn load_schema_file_not_found() {
        let result = load_schema(Path::new("/nonexistent/model.yml"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_schema_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "type: [unclosed").unwrap();

        let result = load_schema(file.path());
        assert!(matches!(result, Err(LoadError::InvalidYaml { .. })));
    }

    #[test]
    fn load_schema_str_keeps_key_order() {
        let schema = load_schema_str("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<_> = schema.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn to_yaml_dumps_in_order() {
        let value = json!({ "type": "object", "required": ["a"] });
        assert_eq!(to_yaml(&value).unwrap(), "type: object\nrequired:\n- a\n");
    }

    #[test]
    fn indent_block_pads_lines() {
        assert_eq!(indent_block("a:\n  b: 1\n", 2), "  a:\n    b: 1\n");
        assert_eq!(indent_block("a: 1\n\nb: 2", 4), "    a: 1\n\n    b: 2\n");
    }

    #[test]
    fn file_source_reads_relative_to_base() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/user.yml"), "type: object\n").unwrap();

        let text = FileSource.read("./models/user.yml", dir.path()).unwrap();
        assert_eq!(text, "type: object\n");
    }

    #[test]
    fn file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = FileSource.read("missing.yml", dir.path());
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn is_url_detects_schemes() {
        assert!(is_url("https://example.com/model.yml"));
        assert!(is_url("http://example.com/model.yml"));
        assert!(!is_url("./model.yml"));
        assert!(!is_url("/abs/model.yml"));
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn remote_source_fetches_url() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/schemas/model.yml")
                .with_status(200)
                .with_body("type: object\n")
                .create();

            let url = format!("{}/schemas/model.yml", server.url());
            let text = RemoteSource.read(&url, Path::new(".")).unwrap();

            assert_eq!(text, "type: object\n");
            mock.assert();
        }

        #[test]
        fn remote_source_resolves_against_url_base() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/schemas/meta.yml")
                .with_status(200)
                .with_body("type: string\n")
                .create();

            let base = format!("{}/schemas", server.url());
            let text = RemoteSource.read("./meta.yml", Path::new(&base)).unwrap();

            assert_eq!(text, "type: string\n");
            mock.assert();
        }

        #[test]
        fn remote_source_http_error() {
            let mut server = mockito::Server::new();
            let _mock = server.mock("GET", "/gone.yml").with_status(404).create();

            let url = format!("{}/gone.yml", server.url());
            let result = RemoteSource.read(&url, Path::new("."));
            assert!(matches!(result, Err(LoadError::NetworkError { .. })));
        }

        #[test]
        fn remote_source_falls_back_to_files() {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("local.yml"), "type: number\n").unwrap();

            let text = RemoteSource.read("local.yml", dir.path()).unwrap();
            assert_eq!(text, "type: number\n");
        }
    }
}
