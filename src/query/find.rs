//! Attribute-presence checks and combined node/parent/child queries.

use crate::ast::Node;
use crate::query::filter::FilterSet;
use crate::query::search::SearchOptions;

/// Combined query: a node matching `node_filters` that has an ancestor
/// matching `parent_filters` and a descendant matching `child_filters`.
///
/// Empty filter sets match anything; all depths default to unlimited.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub node_filters: FilterSet,
    pub parent_filters: FilterSet,
    pub child_filters: FilterSet,
    pub node_depth: Option<usize>,
    pub parent_depth: Option<isize>,
    pub child_depth: Option<usize>,
}

impl FindQuery {
    pub fn new(node_filters: impl Into<FilterSet>) -> Self {
        Self {
            node_filters: node_filters.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, filters: impl Into<FilterSet>) -> Self {
        self.parent_filters = filters.into();
        self
    }

    pub fn with_child(mut self, filters: impl Into<FilterSet>) -> Self {
        self.child_filters = filters.into();
        self
    }

    pub fn with_node_depth(mut self, depth: usize) -> Self {
        self.node_depth = Some(depth);
        self
    }

    pub fn with_parent_depth(mut self, depth: isize) -> Self {
        self.parent_depth = Some(depth);
        self
    }

    pub fn with_child_depth(mut self, depth: usize) -> Self {
        self.child_depth = Some(depth);
        self
    }
}

/// One hit of a [`FindQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMatch<'a> {
    pub node: Node<'a>,
    /// Nearest ancestor satisfying the parent filters
    pub parent: Node<'a>,
    /// First descendant satisfying the child filters
    pub child: Node<'a>,
}

impl<'a> Node<'a> {
    /// First descendant (pre-order) matching `filters`.
    pub fn child_has_attributes(&self, filters: &FilterSet, depth: Option<usize>) -> Option<Node<'a>> {
        self.first_child(filters, depth)
    }

    /// Outermost descendants matching `filters`; matches are not descended into.
    pub fn children_have_attributes(&self, filters: &FilterSet, depth: Option<usize>) -> Vec<Node<'a>> {
        let options = SearchOptions {
            depth,
            include_children: false,
            filters: filters.clone(),
            ..SearchOptions::default()
        };
        self.children(&options)
    }

    pub fn parent_has_attributes(&self, filters: &FilterSet, depth: Option<isize>) -> Option<Node<'a>> {
        self.parent(depth, filters)
    }

    pub fn parents_have_attributes(&self, filters: &FilterSet, depth: Option<isize>) -> Vec<Node<'a>> {
        self.parents(depth, filters)
    }

    /// Nearest ancestor matching `parent_filters` together with this node's
    /// first descendant matching `child_filters`. Both must exist.
    pub fn parent_child_has_attributes(
        &self,
        parent_filters: &FilterSet,
        child_filters: &FilterSet,
        parent_depth: Option<isize>,
        child_depth: Option<usize>,
    ) -> Option<(Node<'a>, Node<'a>)> {
        let parent = self.parent(parent_depth, parent_filters)?;
        let child = self.first_child(child_filters, child_depth)?;
        Some((parent, child))
    }

    /// Descendant matching `child_filters` that has an ancestor matching
    /// `parent_filters`. Returns `(child, parent)`.
    pub fn find_child_with_parent(
        &self,
        child_filters: &FilterSet,
        parent_filters: &FilterSet,
        child_depth: Option<usize>,
        parent_depth: Option<isize>,
    ) -> Option<(Node<'a>, Node<'a>)> {
        let options = SearchOptions {
            depth: child_depth,
            filters: child_filters.clone(),
            ..SearchOptions::default()
        };
        self.children(&options).into_iter().find_map(|child| {
            child
                .parent_has_attributes(parent_filters, parent_depth)
                .map(|parent| (child, parent))
        })
    }

    /// Siblings matching `sibling_filters` under the nearest ancestor
    /// matching `parent_filters`. This node is never its own sibling.
    pub fn find_siblings(
        &self,
        parent_filters: &FilterSet,
        sibling_filters: &FilterSet,
        parent_depth: Option<isize>,
        sibling_depth: Option<usize>,
    ) -> Option<(Node<'a>, Vec<Node<'a>>)> {
        let parent = self.parent(parent_depth, parent_filters)?;
        let options = SearchOptions {
            depth: sibling_depth,
            filters: sibling_filters.clone(),
            ..SearchOptions::default()
        };
        let siblings: Vec<_> = parent
            .children(&options)
            .into_iter()
            .filter(|sibling| sibling != self)
            .collect();
        (!siblings.is_empty()).then_some((parent, siblings))
    }

    pub fn find_sibling(
        &self,
        parent_filters: &FilterSet,
        sibling_filters: &FilterSet,
        parent_depth: Option<isize>,
        sibling_depth: Option<usize>,
    ) -> Option<(Node<'a>, Node<'a>)> {
        self.find_siblings(parent_filters, sibling_filters, parent_depth, sibling_depth)
            .and_then(|(parent, siblings)| siblings.first().map(|&sibling| (parent, sibling)))
    }

    fn match_query(&self, query: &FindQuery) -> Option<NodeMatch<'a>> {
        let (parent, child) = self.parent_child_has_attributes(
            &query.parent_filters,
            &query.child_filters,
            query.parent_depth,
            query.child_depth,
        )?;
        Some(NodeMatch {
            node: *self,
            parent,
            child,
        })
    }

    /// First candidate (pre-order) satisfying all three filter sets.
    pub fn find_node(&self, query: &FindQuery) -> Option<NodeMatch<'a>> {
        self.children(&candidate_options(query))
            .into_iter()
            .find_map(|candidate| candidate.match_query(query))
    }

    /// Every candidate satisfying all three filter sets, in pre-order.
    pub fn find_nodes(&self, query: &FindQuery) -> Vec<NodeMatch<'a>> {
        self.children(&candidate_options(query))
            .into_iter()
            .filter_map(|candidate| candidate.match_query(query))
            .collect()
    }
}

fn candidate_options(query: &FindQuery) -> SearchOptions {
    SearchOptions {
        depth: query.node_depth,
        filters: query.node_filters.clone(),
        ..SearchOptions::default()
    }
}
