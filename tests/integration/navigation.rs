use crate::common::{load_ast, load_output, mul, root};
use solidity_ast::{Ast, Field, Filter, NodeKind, Offset, SearchOptions};

#[test]
fn test_named_navigation_to_function() {
    let ast = load_ast();
    let mul = mul(&ast);

    assert_eq!(mul.kind(), NodeKind::FunctionDefinition);
    assert_eq!(mul.depth(), 2);
    assert_eq!(mul.offset(), Some(Offset::new(80, 226, 0)));

    let returns = mul.children(&SearchOptions::new().with_filters(Filter::node_type("Return")));
    let offsets: Vec<_> = returns.iter().filter_map(|n| n.src()).collect();
    assert_eq!(offsets, vec!["183:9:0", "291:9:0"]);
}

#[test]
fn test_function_body_is_flat_statement_list() {
    let ast = load_ast();
    let mul = mul(&ast);

    assert!(mul.is_iterable());
    let kinds: Vec<_> = mul.iter().map(|n| n.node_type()).collect();
    assert_eq!(
        kinds,
        vec![
            "IfStatement",
            "VariableDeclarationStatement",
            "ExpressionStatement",
            "Return"
        ]
    );
    assert_eq!(mul.len(), 4);
    assert_eq!(mul.at(3).map(|n| n.kind()), Some(NodeKind::Return));
    assert!(mul.at(4).is_none());
    assert!(ast.iter().all(|n| !n.kind().is_block()));
}

#[test]
fn test_fields_are_sorted_and_include_derived() {
    let ast = load_ast();
    let mul = mul(&ast);
    let fields: Vec<_> = mul.fields().collect();

    let mut sorted = fields.clone();
    sorted.sort_unstable();
    assert_eq!(fields, sorted);
    assert!(fields.contains(&"baseNodeType"));
    assert!(fields.contains(&"nodes"));
    assert!(!fields.contains(&"body"));
    assert_eq!(mul.get_str("baseNodeType"), Some("ContractPart"));
}

#[test]
fn test_parameters_are_nodes() {
    let ast = load_ast();
    let mul = mul(&ast);

    let params = mul.get_node("parameters").unwrap();
    assert_eq!(params.kind(), NodeKind::ParameterList);
    let names: Vec<_> = params.iter().filter_map(|n| n.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(matches!(params.get("parameters"), Some(Field::Nodes(ids)) if ids.len() == 2));
    assert_eq!(params.named("b").and_then(|n| n.get_str("name")), Some("b"));
}

#[test]
fn test_tree_invariants() {
    let ast = load_ast();
    assert_eq!(ast.len(), 63);

    for node in ast.iter() {
        match node.parent_node() {
            Some(parent) => {
                assert_eq!(parent.depth() + 1, node.depth(), "{node:?}");
                assert!(parent.child_nodes().any(|child| child == node));
                if let (Some(inner), Some(outer)) = (node.offset(), parent.offset()) {
                    assert!(outer.contains(&inner), "{node:?} outside {parent:?}");
                }
            }
            None => assert_eq!(node.depth(), 0),
        }
        assert_eq!(node.contract_id(), Some(0));

        let starts: Vec<_> = node
            .child_nodes()
            .filter_map(|child| child.offset())
            .map(|offset| offset.start)
            .collect();
        assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn test_symbol_lookup() {
    let ast = load_ast();
    let mul = mul(&ast);
    let id = mul.ast_id().unwrap();
    assert_eq!(ast.find_by_ast_id(id), Some(mul));

    let call = root(&ast)
        .children(&SearchOptions::new().with_filters(Filter::node_type("MemberAccess")))
        .pop()
        .unwrap();
    let target = call.resolve("referencedDeclaration").and_then(|r| r.as_i64()).unwrap();
    assert_eq!(ast.find_by_ast_id(target), Some(mul));
}

#[test]
fn test_debug_and_display() {
    let ast = load_ast();
    let mul = mul(&ast);
    assert_eq!(format!("{mul:?}"), "<FunctionDefinition 'mul' @80:226:0>");
    assert_eq!(mul.to_string(), "FunctionDefinition 'mul'");
    assert_eq!(root(&ast).to_string(), "SourceUnit 'SafeMath.sol'");
}

#[test]
fn test_unknown_node_types_are_wrapped() {
    let mut output = load_output();
    output["sources"]["SafeMath.sol"]["ast"]["nodes"][0]["nodeType"] =
        serde_json::json!("FuturePragma");
    let ast = Ast::from_standard_output(&output).unwrap();

    let pragma = root(&ast).at(0).unwrap();
    assert_eq!(pragma.kind(), NodeKind::Other);
    assert_eq!(pragma.node_type(), "FuturePragma");
    assert!(!pragma.has_field("baseNodeType"));
    let hits = root(&ast).children(&SearchOptions::new().with_filters(Filter::node_type("FuturePragma")));
    assert_eq!(hits, vec![pragma]);
}

#[test]
fn test_ast_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Ast>();

    let ast = load_ast();
    let options = SearchOptions::new().with_filters(Filter::node_type("Identifier"));
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| root(&ast).children(&options).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(counts.iter().all(|&count| count == 13));
}

#[test]
fn test_checked_lookup_rejects_foreign_ids() {
    let ast = load_ast();
    let small = Ast::from_ast(&serde_json::json!({"nodeType": "SourceUnit", "src": "0:1:0"})).unwrap();

    let foreign = mul(&ast).id();
    assert!(small.get(foreign).is_none());
    assert_eq!(ast.get(foreign), Some(mul(&ast)));
}

// contract Contract { function mul() { if (x) { y; } return z; } }
fn single_return_contract() -> Ast {
    let branch = serde_json::json!({
        "nodeType": "IfStatement", "id": 5, "src": "40:20:0",
        "condition": {"nodeType": "Identifier", "id": 6, "src": "44:1:0", "name": "x"},
        "trueBody": {"nodeType": "Block", "id": 7, "src": "47:12:0", "statements": [
            {"nodeType": "ExpressionStatement", "id": 8, "src": "49:2:0"}
        ]}
    });
    let body = serde_json::json!({"nodeType": "Block", "id": 4, "src": "30:50:0", "statements": [
        branch,
        {"nodeType": "Return", "id": 9, "src": "65:9:0"}
    ]});
    let function = serde_json::json!({
        "nodeType": "FunctionDefinition", "id": 3, "src": "20:60:0", "name": "mul", "body": body
    });
    Ast::from_ast(&serde_json::json!({
        "nodeType": "SourceUnit", "id": 1, "src": "0:100:0",
        "nodes": [{"nodeType": "ContractDefinition", "id": 2, "src": "0:100:0", "name": "Contract", "nodes": [function]}]
    }))
    .unwrap()
}

#[test]
fn test_single_return_below_named_function() {
    let ast = single_return_contract();
    let mul = root(&ast).named("Contract").and_then(|c| c.named("mul")).unwrap();

    let returns = mul.children(&SearchOptions::new().with_filters(Filter::node_type("Return")));
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0].ast_id(), Some(9));
}

#[test]
fn test_or_filter_yields_preorder_without_duplicates() {
    let ast = single_return_contract();
    let mul = root(&ast).named("Contract").and_then(|c| c.named("mul")).unwrap();

    let options = SearchOptions::new()
        .with_filters(vec![Filter::node_type("IfStatement"), Filter::node_type("Return")]);
    let hits = mul.children(&options);
    let kinds: Vec<_> = hits.iter().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::IfStatement, NodeKind::Return]);

    let ids: Vec<_> = hits.iter().filter_map(|n| n.ast_id()).collect();
    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(ids, unique);
    assert_eq!(ids, vec![5, 9]);
}
