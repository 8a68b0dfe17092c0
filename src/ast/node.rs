use crate::ast::kind::NodeKind;
use crate::ast::value::Field;
use crate::offset::Offset;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Index of a node in its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena payload for one wrapped record.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) node_type: String,
    pub(crate) ast_id: Option<i64>,
    pub(crate) offset: Option<Offset>,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attributes: BTreeMap<String, Field>,
    /// Source id from the standard-JSON output; roots only
    pub(crate) source_id: Option<usize>,
    pub(crate) dependencies: Vec<NodeId>,
    pub(crate) libraries: Vec<NodeId>,
}

/// A compiled corpus: every node of every source file in one arena.
///
/// Each source file contributes one root (`SourceUnit`). Children are owned
/// through the arena; parent links and contract dependencies are plain
/// [`NodeId`]s, so the structure has no reference cycles and is `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) symbols: HashMap<i64, NodeId>,
}

impl Ast {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `id` must come from this arena.
    pub(crate) fn node(&self, id: NodeId) -> Node<'_> {
        Node { ast: self, id }
    }

    /// Checked lookup; `None` for ids that do not belong to this arena.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then(|| self.node(id))
    }

    /// Per-file root nodes, in source id order.
    pub fn roots(&self) -> NodeIter<'_> {
        NodeIter::new(self, &self.roots)
    }

    /// Root of the file whose `absolutePath` equals `path`.
    pub fn source_unit(&self, path: &str) -> Option<Node<'_>> {
        self.roots()
            .find(|root| root.get_str("absolutePath") == Some(path))
    }

    /// Look a node up by its compiler-assigned `id`.
    pub fn find_by_ast_id(&self, ast_id: i64) -> Option<Node<'_>> {
        self.symbols.get(&ast_id).map(|&id| self.node(id))
    }

    /// Every node in the arena, in construction (pre-order per file) order.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.nodes.len()).map(move |index| self.node(NodeId(index as u32)))
    }

    /// All contract, library and interface definitions across files.
    pub fn contracts(&self) -> Vec<Node<'_>> {
        self.iter()
            .filter(|node| node.kind() == NodeKind::ContractDefinition)
            .collect()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Borrowed handle to one node of an [`Ast`].
///
/// Handles are `Copy`; equality is identity within the same arena.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        self.ast.data(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// Raw `nodeType` tag, also for kinds this crate does not know.
    pub fn node_type(&self) -> &'a str {
        &self.data().node_type
    }

    /// Compiler-assigned `id`, unique within one compilation.
    pub fn ast_id(&self) -> Option<i64> {
        self.data().ast_id
    }

    pub fn depth(&self) -> usize {
        self.data().depth
    }

    pub fn offset(&self) -> Option<Offset> {
        self.data().offset
    }

    /// Raw `src` string as delivered by the compiler.
    pub fn src(&self) -> Option<&'a str> {
        self.get_str("src")
    }

    /// Source file index this node belongs to.
    pub fn contract_id(&self) -> Option<usize> {
        self.offset()
            .map(|offset| offset.file_index)
            .or_else(|| self.root().data().source_id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get_str("name")
    }

    /// Sorted attribute names, raw and derived.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.data().attributes.keys().map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.data().attributes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&'a Field> {
        self.data().attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        self.get(name)
            .and_then(Field::as_value)
            .and_then(serde_json::Value::as_str)
    }

    pub fn get_node(&self, name: &str) -> Option<Node<'a>> {
        self.get(name)
            .and_then(Field::as_node)
            .map(|id| self.ast.node(id))
    }

    pub fn parent_node(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.ast.node(id))
    }

    pub fn root(&self) -> Node<'a> {
        self.ancestors().last().unwrap_or(*self)
    }

    /// Owned children in source order.
    pub fn child_nodes(&self) -> NodeIter<'a> {
        NodeIter::new(self.ast, &self.data().children)
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent_node(),
        }
    }

    /// Pre-order walk of every descendant, excluding this node.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.data().children.clone();
        stack.reverse();
        Descendants {
            ast: self.ast,
            stack,
        }
    }

    /// True when the record carries a `nodes` list (directly or via a
    /// flattened `body`).
    pub fn is_iterable(&self) -> bool {
        matches!(self.get("nodes"), Some(Field::Nodes(_)))
    }

    fn member_ids(&self) -> &'a [NodeId] {
        match self.get("nodes") {
            Some(Field::Nodes(ids)) => ids,
            _ => &self.data().children,
        }
    }

    /// Members: the `nodes` list for iterable nodes, otherwise the children.
    pub fn iter(&self) -> NodeIter<'a> {
        NodeIter::new(self.ast, self.member_ids())
    }

    pub fn len(&self) -> usize {
        self.member_ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids().is_empty()
    }

    /// Member at `index`.
    pub fn at(&self, index: usize) -> Option<Node<'a>> {
        self.member_ids().get(index).map(|&id| self.ast.node(id))
    }

    /// First member whose `name` equals `key`.
    pub fn named(&self, key: &str) -> Option<Node<'a>> {
        self.iter().find(|member| member.name() == Some(key))
    }

    pub fn contains(&self, other: &Node<'_>) -> bool {
        self.member_ids().contains(&other.id) && std::ptr::eq(self.ast, other.ast)
    }

    /// Contracts this contract depends on (transitively), sorted by name.
    pub fn dependencies(&self) -> NodeIter<'a> {
        NodeIter::new(self.ast, &self.data().dependencies)
    }

    /// Libraries this contract links against, sorted by name.
    pub fn libraries(&self) -> NodeIter<'a> {
        NodeIter::new(self.ast, &self.data().libraries)
    }

    /// Short human-readable label, e.g. `FunctionDefinition 'mul'`.
    pub fn label(&self) -> String {
        let display = match (self.get("name"), self.get("value")) {
            (Some(Field::Value(name)), Some(Field::Value(value))) => {
                Some(format!("{} = {}", plain(name), plain(value)))
            }
            _ => ["name", "value", "absolutePath"]
                .iter()
                .find_map(|attr| self.get(attr).and_then(Field::as_value).map(plain)),
        };

        match display {
            Some(text) => format!("{} '{}'", self.node_type(), text),
            None => self.node_type().to_string(),
        }
    }
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.ast, other.ast)
    }
}

impl Eq for Node<'_> {}

impl std::hash::Hash for Node<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.label())?;
        if let Some(offset) = self.offset() {
            write!(f, " @{offset}")?;
        }
        write!(f, ">")
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl<'a> IntoIterator for Node<'a> {
    type Item = Node<'a>;
    type IntoIter = NodeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a list of node ids, yielding handles.
#[derive(Clone)]
pub struct NodeIter<'a> {
    ast: &'a Ast,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> NodeIter<'a> {
    fn new(ast: &'a Ast, ids: &'a [NodeId]) -> Self {
        Self {
            ast,
            ids: ids.iter(),
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| self.ast.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for NodeIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| self.ast.node(id))
    }
}

impl ExactSizeIterator for NodeIter<'_> {}

pub struct Ancestors<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent_node();
        Some(current)
    }
}

pub struct Descendants<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.ast.data(id).children;
        self.stack.extend(children.iter().rev());
        Some(self.ast.node(id))
    }
}
