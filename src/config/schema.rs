use crate::offset::Offset;
use crate::query::{FilterSet, SearchOptions};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// A validated query file. Built by [`crate::config::load_from_str`].
#[derive(Debug, Default, Clone)]
pub struct QueryConfig {
    pub meta: Metadata,
    pub output: OutputOptions,
    pub queries: Vec<QueryDefinition>,
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.queries.is_empty() {
            issues.push(ValidationIssue::EmptyQueryList);
        }

        let mut seen = HashSet::new();
        for query in &self.queries {
            if query.id.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    query_id: None,
                    field: "id",
                });
            } else if !seen.insert(query.id.as_str()) {
                issues.push(ValidationIssue::DuplicateId {
                    query_id: query.id.clone(),
                });
            }

            for (field, value) in [
                ("required_offset", &query.required_offset),
                ("offset_limits", &query.offset_limits),
            ] {
                if let Some(src) = value {
                    if let Err(err) = Offset::parse(src) {
                        issues.push(ValidationIssue::InvalidOffset {
                            query_id: Some(query.id.clone()).filter(|id| !id.trim().is_empty()),
                            field,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// How matched code is rendered.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    #[serde(default = "default_true")]
    pub loc: bool,
    #[serde(default = "default_true")]
    pub tags: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            loc: true,
            tags: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryDefinition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub exclude: FilterSet,
    #[serde(default)]
    pub depth: Option<usize>,
    #[serde(default)]
    pub include_self: bool,
    #[serde(default = "default_true")]
    pub include_parents: bool,
    #[serde(default = "default_true")]
    pub include_children: bool,
    #[serde(default)]
    pub required_offset: Option<String>,
    #[serde(default)]
    pub offset_limits: Option<String>,
}

impl QueryDefinition {
    /// Search options for this query. Offsets must already be valid; call
    /// [`QueryConfig::validate`] first.
    pub fn search_options(&self) -> Result<SearchOptions, ValidationIssue> {
        let parse = |field: &'static str, value: &Option<String>| {
            value
                .as_deref()
                .map(Offset::parse)
                .transpose()
                .map_err(|err| ValidationIssue::InvalidOffset {
                    query_id: Some(self.id.clone()),
                    field,
                    message: err.to_string(),
                })
        };

        Ok(SearchOptions {
            depth: self.depth,
            include_self: self.include_self,
            include_parents: self.include_parents,
            include_children: self.include_children,
            required_offset: parse("required_offset", &self.required_offset)?,
            offset_limits: parse("offset_limits", &self.offset_limits)?,
            filters: self.filters.clone(),
            exclude: self.exclude.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyQueryList,
    MissingField {
        query_id: Option<String>,
        field: &'static str,
    },
    DuplicateId {
        query_id: String,
    },
    InvalidOffset {
        query_id: Option<String>,
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyQueryList => write!(f, "query config contains no queries"),
            ValidationIssue::MissingField { query_id, field } => match query_id {
                Some(id) => write!(f, "query '{id}' missing required field '{field}'"),
                None => write!(f, "query missing required field '{field}'"),
            },
            ValidationIssue::DuplicateId { query_id } => {
                write!(f, "query id '{query_id}' is used more than once")
            }
            ValidationIssue::InvalidOffset {
                query_id,
                field,
                message,
            } => match query_id {
                Some(id) => write!(f, "query '{id}' has invalid '{field}': {message}"),
                None => write!(f, "query has invalid '{field}': {message}"),
            },
        }
    }
}
