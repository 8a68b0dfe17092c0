use crate::ast::node::{Node, NodeId};
use serde_json::Value;

/// One attribute of a wrapped AST record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Scalars, plain (non-node) objects, and arrays that are not node lists
    Value(Value),
    /// A nested node record
    Node(NodeId),
    /// An array of node records (possibly empty)
    Nodes(Vec<NodeId>),
}

impl Field {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Field::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[NodeId]> {
        match self {
            Field::Nodes(ids) => Some(ids),
            _ => None,
        }
    }
}

/// Result of resolving an attribute path against a node.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Value(&'a Value),
    Node(Node<'a>),
    Nodes(&'a [NodeId]),
}

impl<'a> Resolved<'a> {
    /// Exact comparison against an expected filter value.
    ///
    /// Nodes never equal a JSON value; an empty node list equals `[]`.
    pub fn matches(&self, expected: &Value) -> bool {
        match self {
            Resolved::Value(value) => *value == expected,
            Resolved::Node(_) => false,
            Resolved::Nodes(ids) => ids.is_empty() && expected.as_array().is_some_and(Vec::is_empty),
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_node(&self) -> Option<Node<'a>> {
        match self {
            Resolved::Node(node) => Some(*node),
            _ => None,
        }
    }
}
