use crate::config::schema::{Metadata, OutputOptions, QueryConfig, QueryDefinition, ValidationError};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read query file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("query file{} is not valid TOML: {source}", located(.path))]
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },

    #[error("query #{position}{} in query file{} is malformed: {source}", labelled(.query_id), located(.path))]
    Query {
        path: Option<PathBuf>,
        /// 1-based position in `[[queries]]`
        position: usize,
        query_id: Option<String>,
        source: serde_json::Error,
    },

    #[error("query file{} failed validation: {source}", located(.path))]
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn in_file(mut self, file: &Path) -> Self {
        if let Self::Toml { path, .. } | Self::Query { path, .. } | Self::Validation { path, .. } =
            &mut self
        {
            path.get_or_insert_with(|| file.to_path_buf());
        }
        self
    }
}

fn located(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

fn labelled(query_id: &Option<String>) -> String {
    query_id
        .as_ref()
        .map(|id| format!(" ('{id}')"))
        .unwrap_or_default()
}

/// Query entries stay untyped until the file as a whole parses, so a bad
/// entry can be reported by position and id.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    meta: Metadata,
    #[serde(default)]
    output: OutputOptions,
    #[serde(default)]
    queries: Vec<Value>,
}

fn parse_query(position: usize, raw: Value) -> Result<QueryDefinition, ConfigError> {
    let query_id = raw.get("id").and_then(Value::as_str).map(str::to_owned);
    serde_json::from_value(raw).map_err(|source| ConfigError::Query {
        path: None,
        position,
        query_id,
        source,
    })
}

pub fn load_from_str(input: &str) -> Result<QueryConfig, ConfigError> {
    let raw: RawConfig =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml { path: None, source })?;
    let queries = raw
        .queries
        .into_iter()
        .enumerate()
        .map(|(index, query)| parse_query(index + 1, query))
        .collect::<Result<Vec<_>, _>>()?;

    let config = QueryConfig {
        meta: raw.meta,
        output: raw.output,
        queries,
    };
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    debug!(name = %config.meta.name, queries = config.queries.len(), "loaded query config");
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<QueryConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.in_file(path))
}
