//! Descendant and ancestor search.

use crate::ast::Node;
use crate::offset::Offset;
use crate::query::filter::FilterSet;

/// Options for [`Node::children`].
///
/// `depth` counts levels below the start node (`Some(1)` = direct children
/// only, `Some(0)` = nothing, or just the start node with `include_self`).
/// Offset predicates are checked before filters; a node without an offset
/// fails any offset predicate.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub depth: Option<usize>,
    pub include_self: bool,
    /// Keep a match that also has matching descendants
    pub include_parents: bool,
    /// Descend into a matched node
    pub include_children: bool,
    /// Node span must contain this offset
    pub required_offset: Option<Offset>,
    /// Node span must lie within this offset
    pub offset_limits: Option<Offset>,
    pub filters: FilterSet,
    pub exclude: FilterSet,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: None,
            include_self: false,
            include_parents: true,
            include_children: true,
            required_offset: None,
            offset_limits: None,
            filters: FilterSet::default(),
            exclude: FilterSet::default(),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: impl Into<FilterSet>) -> Self {
        self.filters = filters.into();
        self
    }

    pub fn with_exclude(mut self, exclude: impl Into<FilterSet>) -> Self {
        self.exclude = exclude.into();
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    pub fn with_parents(mut self, include_parents: bool) -> Self {
        self.include_parents = include_parents;
        self
    }

    pub fn with_children(mut self, include_children: bool) -> Self {
        self.include_children = include_children;
        self
    }

    pub fn with_required_offset(mut self, offset: Offset) -> Self {
        self.required_offset = Some(offset);
        self
    }

    pub fn with_offset_limits(mut self, limits: Offset) -> Self {
        self.offset_limits = Some(limits);
        self
    }

    /// Whether `node` is a candidate match, ignoring structure.
    pub fn accepts(&self, node: &Node<'_>) -> bool {
        if self.required_offset.is_some() || self.offset_limits.is_some() {
            let Some(offset) = node.offset() else {
                return false;
            };
            if let Some(required) = &self.required_offset {
                if !offset.contains(required) {
                    return false;
                }
            }
            if let Some(limits) = &self.offset_limits {
                if !limits.contains(&offset) {
                    return false;
                }
            }
        }
        !self.exclude.excludes(node) && self.filters.matches(node)
    }
}

fn collect<'a>(node: Node<'a>, remaining: Option<usize>, options: &SearchOptions, out: &mut Vec<Node<'a>>) {
    let matched = options.accepts(&node);
    if matched && (options.include_parents || !options.include_children) {
        out.push(node);
        if !options.include_children {
            return;
        }
    }

    let found_before = out.len();
    if remaining != Some(0) {
        let below = remaining.map(|levels| levels - 1);
        for child in node.child_nodes() {
            collect(child, below, options, out);
        }
    }

    // without include_parents a match only counts when nothing below matched
    if matched && !options.include_parents && out.len() == found_before {
        out.push(node);
    }
}

fn first<'a>(node: Node<'a>, remaining: Option<usize>, filters: &FilterSet) -> Option<Node<'a>> {
    if filters.matches(&node) {
        return Some(node);
    }
    if remaining == Some(0) {
        return None;
    }
    let below = remaining.map(|levels| levels - 1);
    node.child_nodes().find_map(|child| first(child, below, filters))
}

/// Translate an ancestor depth argument into an absolute depth limit.
///
/// `None` searches to the root; negative values are relative to `start`.
fn depth_limit(start: &Node<'_>, depth: Option<isize>) -> usize {
    match depth {
        None => 0,
        Some(relative) if relative < 0 => {
            (start.depth() as isize + relative).max(0) as usize
        }
        Some(absolute) => absolute as usize,
    }
}

impl<'a> Node<'a> {
    /// Descendants matching `options`, in pre-order.
    pub fn children(&self, options: &SearchOptions) -> Vec<Node<'a>> {
        let mut out = Vec::new();
        if options.include_self {
            collect(*self, options.depth, options, &mut out);
        } else if options.depth != Some(0) {
            let below = options.depth.map(|levels| levels - 1);
            for child in self.child_nodes() {
                collect(child, below, options, &mut out);
            }
        }
        out
    }

    /// First descendant (pre-order) matching `filters`, stopping at the
    /// first hit.
    pub(crate) fn first_child(&self, filters: &FilterSet, depth: Option<usize>) -> Option<Node<'a>> {
        if depth == Some(0) {
            return None;
        }
        let below = depth.map(|levels| levels - 1);
        self.child_nodes().find_map(|child| first(child, below, filters))
    }

    /// Ancestors matching `filters` down to the depth limit, nearest first.
    pub fn parents(&self, depth: Option<isize>, filters: &FilterSet) -> Vec<Node<'a>> {
        let limit = depth_limit(self, depth);
        self.ancestors()
            .take_while(|ancestor| ancestor.depth() >= limit)
            .filter(|ancestor| filters.matches(ancestor))
            .collect()
    }

    /// Nearest ancestor matching `filters` within the depth limit.
    pub fn parent(&self, depth: Option<isize>, filters: &FilterSet) -> Option<Node<'a>> {
        let limit = depth_limit(self, depth);
        self.ancestors()
            .take_while(|ancestor| ancestor.depth() >= limit)
            .find(|ancestor| filters.matches(ancestor))
    }

    /// Ancestor at exactly `depth` (absolute, or relative when negative).
    pub fn ancestor_at(&self, depth: isize) -> Option<Node<'a>> {
        let limit = depth_limit(self, Some(depth));
        if limit >= self.depth() {
            return None;
        }
        self.ancestors().find(|ancestor| ancestor.depth() == limit)
    }

    pub fn is_child_of(&self, other: &Node<'_>) -> bool {
        other.depth() < self.depth()
            && self
                .ancestor_at(other.depth() as isize)
                .is_some_and(|ancestor| ancestor == *other)
    }

    pub fn is_parent_of(&self, other: &Node<'_>) -> bool {
        other.is_child_of(self)
    }
}
