//! Wraps raw solc JSON records into arena nodes.
//!
//! Construction rules:
//! - any JSON object carrying a `nodeType` key is a node record
//! - `body` is exposed as `nodes`; a `Block`/`UncheckedBlock` record in an
//!   attribute is replaced by its `statements`, so function bodies, loop
//!   bodies and `if` branches become flat statement lists
//! - arrays of node records (nulls allowed and dropped) become node lists
//! - children are ordered by source start; children without an offset go last

use crate::ast::errors::AstError;
use crate::ast::kind::NodeKind;
use crate::ast::node::{Ast, NodeData, NodeId};
use crate::ast::value::Field;
use crate::offset::Offset;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

pub(crate) struct TreeBuilder<'a> {
    ast: &'a mut Ast,
}

fn is_node_record(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("nodeType"))
}

fn record_kind(record: &Map<String, Value>) -> NodeKind {
    record
        .get("nodeType")
        .and_then(Value::as_str)
        .map_or(NodeKind::Other, NodeKind::from_node_type)
}

fn is_block_record(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| record_kind(map).is_block())
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(ast: &'a mut Ast) -> Self {
        Self { ast }
    }

    /// Wrap one per-file AST and register it as a root.
    pub(crate) fn add_root(
        &mut self,
        record: &Value,
        source_id: Option<usize>,
    ) -> Result<NodeId, AstError> {
        let map = record.as_object().ok_or_else(|| AstError::InvalidRecord {
            reason: format!("expected an object, found {}", json_type(record)),
        })?;
        if !map.contains_key("nodeType") {
            return Err(AstError::InvalidRecord {
                reason: "root record has no 'nodeType'".to_string(),
            });
        }

        let id = self.wrap(map, None, 0);
        self.ast.nodes[id.index()].source_id = source_id;
        self.ast.roots.push(id);
        Ok(id)
    }

    fn wrap(&mut self, record: &Map<String, Value>, parent: Option<NodeId>, depth: usize) -> NodeId {
        let kind = record_kind(record);
        let node_type = match record.get("nodeType") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        if kind == NodeKind::Other {
            debug!(node_type = %node_type, "unrecognized node type");
        }

        let offset = match record.get("src") {
            Some(Value::String(src)) => match Offset::parse(src) {
                Ok(offset) => Some(offset),
                Err(err) => {
                    warn!(node_type = %node_type, error = %err, "ignoring malformed source offset");
                    None
                }
            },
            Some(other) => {
                warn!(node_type = %node_type, src = %other, "ignoring non-string source offset");
                None
            }
            None => None,
        };

        let ast_id = record.get("id").and_then(Value::as_i64);

        let id = NodeId(self.ast.nodes.len() as u32);
        self.ast.nodes.push(NodeData {
            kind,
            node_type,
            ast_id,
            offset,
            depth,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            source_id: None,
            dependencies: Vec::new(),
            libraries: Vec::new(),
        });

        if let Some(ast_id) = ast_id {
            match self.ast.symbols.entry(ast_id) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(_) => {
                    warn!(ast_id, "duplicate node id; keeping first occurrence");
                }
            }
        }

        let mut attributes = BTreeMap::new();
        let mut children = Vec::new();
        let has_body = record.contains_key("body");

        for (key, value) in record {
            if key == "nodes" && has_body {
                continue;
            }
            let name = if key == "body" { "nodes" } else { key.as_str() };
            let field = self.wrap_field(name, value, id, depth + 1, &mut children);
            attributes.insert(name.to_string(), field);
        }

        if let Some(base) = kind.base_type() {
            attributes.insert(
                "baseNodeType".to_string(),
                Field::Value(Value::String(base.as_str().to_string())),
            );
        }

        // stable: equal starts keep record order
        children.sort_by_key(|child: &NodeId| match self.ast.nodes[child.index()].offset {
            Some(offset) => (false, offset.start),
            None => (true, 0),
        });

        let data = &mut self.ast.nodes[id.index()];
        data.attributes = attributes;
        data.children = children;
        id
    }

    fn wrap_field(
        &mut self,
        name: &str,
        value: &Value,
        owner: NodeId,
        depth: usize,
        children: &mut Vec<NodeId>,
    ) -> Field {
        if is_block_record(value) {
            let statements = value.get("statements").unwrap_or(&Value::Null);
            return self.wrap_list(statements, owner, depth, children);
        }

        match value {
            Value::Object(map) if map.contains_key("nodeType") => {
                let child = self.wrap(map, Some(owner), depth);
                children.push(child);
                Field::Node(child)
            }
            Value::Null if name == "nodes" => Field::Nodes(Vec::new()),
            Value::Array(items) if name == "nodes" || is_node_list(items) => {
                self.wrap_list(value, owner, depth, children)
            }
            other => Field::Value(other.clone()),
        }
    }

    fn wrap_list(
        &mut self,
        value: &Value,
        owner: NodeId,
        depth: usize,
        children: &mut Vec<NodeId>,
    ) -> Field {
        let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            if let Value::Object(map) = item {
                if map.contains_key("nodeType") {
                    let child = self.wrap(map, Some(owner), depth);
                    children.push(child);
                    ids.push(child);
                }
            }
        }
        Field::Nodes(ids)
    }
}

/// A non-empty array whose entries are all node records or null.
fn is_node_list(items: &[Value]) -> bool {
    items.iter().any(is_node_record) && items.iter().all(|item| item.is_null() || is_node_record(item))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
