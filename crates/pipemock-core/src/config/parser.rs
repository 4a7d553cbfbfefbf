//! Configuration file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use crate::types::collection::Collection;
use crate::types::route::Route;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments from JSONC content, leaving strings intact.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // Keep the newline so line numbers in errors stay right
                for next in chars.by_ref() {
                    if next == '\n' || next == '\r' {
                        result.push(next);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse_json(&strip_json_comments(content))
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// A config file holds either a single entry or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Expand a path or glob pattern into a sorted list of files.
fn resolve_paths(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| ConfigError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ConfigError::NoFilesMatched(pattern.to_string()));
    }
    paths.sort();
    Ok(paths)
}

/// Load every entry from all files matching `pattern`, in path order.
pub fn load_all<T: DeserializeOwned>(pattern: &str) -> Result<Vec<T>, ConfigError> {
    let mut items = Vec::new();
    for path in resolve_paths(pattern)? {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed: OneOrMany<T> = parse_config(&content, &path.to_string_lossy())?;
        let parsed: Vec<T> = parsed.into();
        tracing::debug!(path = %path.display(), entries = parsed.len(), "loaded config file");
        items.extend(parsed);
    }
    Ok(items)
}

/// Load routes from a path or glob pattern.
pub fn load_routes(pattern: &str) -> Result<Vec<Route>, ConfigError> {
    load_all(pattern)
}

/// Load collections from a path or glob pattern.
pub fn load_collections(pattern: &str) -> Result<Vec<Collection>, ConfigError> {
    load_all(pattern)
}
