use crate::table::MappingTable;
use serde::{de, Deserialize, Deserializer};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// One redirect rule, as written in the YAML file:
///
/// ```yaml
/// - path: /some-path
///   url: https://www.some-url.com/demo
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PathMapping {
    #[serde(deserialize_with = "non_empty")]
    pub path: String,
    #[serde(deserialize_with = "non_empty")]
    pub url: String,
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(de::Error::custom("expected a non-empty string")),
    }
}

impl PathMapping {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMapping {
    #[error("expected PATH=URL, got {0:?}")]
    MissingSeparator(String),
    #[error("path must start with '/', got {0:?}")]
    RelativePath(String),
    #[error("empty redirect url for {0:?}")]
    EmptyUrl(String),
}

impl FromStr for PathMapping {
    type Err = InvalidMapping;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let (path, url) = arg
            .split_once('=')
            .ok_or_else(|| InvalidMapping::MissingSeparator(arg.to_string()))?;
        if !path.starts_with('/') {
            return Err(InvalidMapping::RelativePath(path.to_string()));
        }
        if url.is_empty() {
            return Err(InvalidMapping::EmptyUrl(path.to_string()));
        }
        Ok(Self::new(path, url))
    }
}

#[derive(Debug, Error)]
#[error("invalid redirect config: {0}")]
pub struct ConfigParseError(#[from] serde_norway::Error);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Parse(#[from] ConfigParseError),
}

/// Parses a YAML sequence of `path`/`url` records into a table.
///
/// Records are inserted in order, so a repeated path keeps the last url.
/// An empty document is an empty table. Only a single document is accepted.
pub fn load(yml: &[u8]) -> Result<MappingTable, ConfigParseError> {
    if is_blank(yml) {
        return Ok(MappingTable::new());
    }

    let mappings: Option<Vec<PathMapping>> = serde_norway::from_slice(yml)?;

    Ok(mappings.into_iter().flatten().collect())
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<MappingTable, ConfigError> {
    let path = path.as_ref();
    let yml = tokio::fs::read(path).await.map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load(&yml)?;
    log::debug!("Loaded {} redirects from {}", table.len(), path.display());
    Ok(table)
}

fn is_blank(yml: &[u8]) -> bool {
    match std::str::from_utf8(yml) {
        Ok(text) => text.lines().map(str::trim).all(|line| {
            line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
        }),
        Err(_) => false,
    }
}
