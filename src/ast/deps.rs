//! Contract dependency and library resolution.
//!
//! Runs once after every source has been wrapped, so references that cross
//! files resolve through the shared symbol table.

use crate::ast::kind::NodeKind;
use crate::ast::node::{Ast, Node, NodeId};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

#[derive(Default)]
struct Direct {
    contracts: BTreeSet<NodeId>,
    libraries: BTreeSet<NodeId>,
}

fn id_list<'a>(node: Node<'a>, field: &str) -> impl Iterator<Item = i64> + 'a {
    node.get(field)
        .and_then(|field| field.as_value())
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_i64)
}

fn referenced<'a>(node: Node<'a>) -> Option<Node<'a>> {
    node.get("referencedDeclaration")
        .and_then(|field| field.as_value())
        .and_then(Value::as_i64)
        .and_then(|ast_id| node.ast().find_by_ast_id(ast_id))
}

fn is_library(node: Node<'_>) -> bool {
    node.get_str("contractKind") == Some("library")
}

/// Contract owning a type definition, or the contract itself.
fn owning_contract(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        NodeKind::ContractDefinition => Some(node),
        NodeKind::StructDefinition | NodeKind::EnumDefinition => node
            .parent_node()
            .filter(|parent| parent.kind() == NodeKind::ContractDefinition),
        _ => None,
    }
}

fn direct_dependencies(contract: Node<'_>) -> Direct {
    let mut direct = Direct::default();
    let ast = contract.ast();

    for ast_id in id_list(contract, "linearizedBaseContracts")
        .chain(id_list(contract, "contractDependencies"))
    {
        if let Some(target) = ast.find_by_ast_id(ast_id) {
            if target.kind() == NodeKind::ContractDefinition {
                direct.contracts.insert(target.id());
            }
        }
    }

    for node in contract.descendants() {
        match node.kind() {
            NodeKind::UsingForDirective => {
                if let Some(library) = node.get_node("libraryName").and_then(referenced) {
                    if library.kind() == NodeKind::ContractDefinition {
                        direct.contracts.insert(library.id());
                        direct.libraries.insert(library.id());
                    }
                }
            }
            NodeKind::Identifier | NodeKind::IdentifierPath | NodeKind::UserDefinedTypeName => {
                let Some(target) = referenced(node).and_then(owning_contract) else {
                    continue;
                };
                if node.kind() == NodeKind::Identifier
                    && target.kind() == NodeKind::ContractDefinition
                    && is_library(target)
                {
                    direct.libraries.insert(target.id());
                }
                direct.contracts.insert(target.id());
            }
            _ => {}
        }
    }

    direct.contracts.remove(&contract.id());
    direct.libraries.remove(&contract.id());
    direct
}

fn sorted_by_name(ast: &Ast, ids: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = ids.into_iter().collect();
    ids.sort_by(|a, b| {
        let name_a = ast.node(*a).name().unwrap_or_default();
        let name_b = ast.node(*b).name().unwrap_or_default();
        name_a.cmp(name_b).then(a.cmp(b))
    });
    ids
}

/// Fill `dependencies` and `libraries` for every contract definition.
pub(crate) fn resolve(ast: &mut Ast) {
    let contracts: Vec<NodeId> = ast
        .iter()
        .filter(|node| node.kind() == NodeKind::ContractDefinition)
        .map(|node| node.id())
        .collect();

    let direct: HashMap<NodeId, Direct> = contracts
        .iter()
        .map(|&id| (id, direct_dependencies(ast.node(id))))
        .collect();

    let mut resolved = Vec::with_capacity(contracts.len());
    for &id in &contracts {
        let mut closure = BTreeSet::new();
        let mut pending: Vec<NodeId> = direct[&id].contracts.iter().copied().collect();
        while let Some(next) = pending.pop() {
            if next == id || !closure.insert(next) {
                continue;
            }
            if let Some(more) = direct.get(&next) {
                pending.extend(more.contracts.iter().copied());
            }
        }

        let dependencies = sorted_by_name(ast, closure);
        let libraries = sorted_by_name(ast, direct[&id].libraries.iter().copied());
        resolved.push((id, dependencies, libraries));
    }

    for (id, dependencies, libraries) in resolved {
        let data = &mut ast.nodes[id.index()];
        data.dependencies = dependencies;
        data.libraries = libraries;
    }
}
