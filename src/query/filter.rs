//! Attribute filters.
//!
//! A [`Filter`] is an ordered list of `(path, expected)` conditions that must
//! all hold. A [`FilterSet`] holds alternatives, any of which may match.
//! Paths are dot-separated and resolve through node attributes and plain JSON
//! objects:
//!
//! ```text
//! expression.memberName   ->  node.expression (a node) -> .memberName
//! typeDescriptions.typeString  ->  plain object -> .typeString
//! ```

use crate::ast::{Field, Node, Resolved};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("filter must be an object or an array of objects, found {found}")]
    InvalidShape { found: String },
}

impl<'a> Node<'a> {
    fn resolve_attribute(&self, name: &str) -> Option<Resolved<'a>> {
        Some(match self.get(name)? {
            Field::Value(value) => Resolved::Value(value),
            Field::Node(id) => Resolved::Node(self.ast().node(*id)),
            Field::Nodes(ids) => Resolved::Nodes(ids),
        })
    }

    /// Resolve a dotted attribute path.
    ///
    /// Returns `None` when any segment is missing or when the walk reaches a
    /// scalar, array or node list before the path is exhausted.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'a>> {
        let mut segments = path.split('.');
        let mut current = self.resolve_attribute(segments.next()?)?;

        for segment in segments {
            current = match current {
                Resolved::Node(node) => node.resolve_attribute(segment)?,
                Resolved::Value(Value::Object(map)) => Resolved::Value(map.get(segment)?),
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Conjunction of attribute conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `{"nodeType": node_type}`.
    pub fn node_type(node_type: &str) -> Self {
        Self::new().with("nodeType", node_type)
    }

    pub fn with(mut self, path: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.conditions.push((path.into(), expected.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True when every condition resolves and compares equal.
    pub fn matches(&self, node: &Node<'_>) -> bool {
        self.conditions.iter().all(|(path, expected)| {
            node.resolve(path)
                .is_some_and(|resolved| resolved.matches(expected))
        })
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            conditions: map
                .iter()
                .map(|(path, expected)| (path.clone(), expected.clone()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Filter::from_map(&map))
    }
}

/// Disjunction of [`Filter`]s.
///
/// As an inclusion set, an empty set matches every node. As an exclusion
/// set, an empty set excludes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    alternatives: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            alternatives: filters.into_iter().collect(),
        }
    }

    pub fn or(mut self, filter: Filter) -> Self {
        self.alternatives.push(filter);
        self
    }

    pub fn alternatives(&self) -> &[Filter] {
        &self.alternatives
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Inclusion semantics.
    pub fn matches(&self, node: &Node<'_>) -> bool {
        self.is_empty() || self.alternatives.iter().any(|filter| filter.matches(node))
    }

    /// Exclusion semantics.
    pub fn excludes(&self, node: &Node<'_>) -> bool {
        self.alternatives.iter().any(|filter| filter.matches(node))
    }

    /// Accepts `{...}` or `[{...}, ...]`; `null` is the empty set.
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self::from(Filter::from_map(map))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(Filter::from_map(map)),
                    other => Err(FilterError::InvalidShape {
                        found: format!("array containing {other}"),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::any),
            other => Err(FilterError::InvalidShape {
                found: other.to_string(),
            }),
        }
    }
}

impl From<Filter> for FilterSet {
    fn from(filter: Filter) -> Self {
        Self {
            alternatives: vec![filter],
        }
    }
}

impl From<Vec<Filter>> for FilterSet {
    fn from(filters: Vec<Filter>) -> Self {
        Self::any(filters)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FilterShape {
    One(Filter),
    Many(Vec<Filter>),
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match FilterShape::deserialize(deserializer)? {
            FilterShape::One(filter) => FilterSet::from(filter),
            FilterShape::Many(filters) => FilterSet::any(filters),
        })
    }
}
