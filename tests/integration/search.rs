use crate::common::{load_ast, load_output, mul, root};
use solidity_ast::{Ast, Filter, FilterSet, FindQuery, NodeKind, Offset, SearchOptions};

#[test]
fn test_unbounded_search_visits_every_descendant() {
    let ast = load_ast();
    let root = root(&ast);
    assert_eq!(root.children(&SearchOptions::new()).len(), ast.len() - 1);
    assert_eq!(
        root.children(&SearchOptions::new().with_self(true)).len(),
        ast.len()
    );
}

#[test]
fn test_depth_limited_search() {
    let ast = load_ast();
    let root = root(&ast);
    let shallow = root.children(&SearchOptions::new().with_depth(2));
    let labels: Vec<_> = shallow.iter().map(|n| n.to_string()).collect();
    assert_eq!(
        labels,
        vec![
            "PragmaDirective",
            "ContractDefinition 'SafeMath'",
            "FunctionDefinition 'mul'",
            "ContractDefinition 'Token'",
            "UsingForDirective",
            "VariableDeclaration 'balances'",
            "FunctionDefinition 'mint'",
        ]
    );
    assert!(shallow.iter().all(|n| n.depth() <= 2));
}

#[test]
fn test_or_filters_with_exclusion() {
    let ast = load_ast();
    let options = SearchOptions::new()
        .with_filters(vec![Filter::node_type("Identifier"), Filter::node_type("Literal")])
        .with_exclude(Filter::new().with("name", "a"));
    let hits = mul(&ast).children(&options);

    let rendered: Vec<_> = hits
        .iter()
        .map(|n| {
            n.name()
                .or_else(|| n.get_str("value"))
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(
        rendered,
        vec!["0", "0", "b", "require", "c", "b", "overflow", "c"]
    );
}

#[test]
fn test_exclusion_alternatives_are_ored() {
    let ast = load_ast();
    let options = SearchOptions::new()
        .with_filters(Filter::node_type("Identifier"))
        .with_exclude(
            FilterSet::new()
                .or(Filter::new().with("name", "a"))
                .or(Filter::new().with("name", "b")),
        );
    let names: Vec<_> = mul(&ast).children(&options).iter().filter_map(|n| n.name()).collect();
    assert_eq!(names, vec!["require", "c", "c"]);
}

#[test]
fn test_multi_condition_filter() {
    let ast = load_ast();
    let filter = Filter::node_type("FunctionCall")
        .with("expression.memberName", "mul")
        .with("expression.expression.name", "amount");
    let hits = root(&ast).children(&SearchOptions::new().with_filters(filter));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].src(), Some("503:13:0"));

    let typed = Filter::node_type("BinaryOperation").with("typeDescriptions.typeString", "bool");
    let bools = root(&ast).children(&SearchOptions::new().with_filters(typed));
    let operators: Vec<_> = bools.iter().filter_map(|n| n.get_str("operator")).collect();
    assert_eq!(operators, vec!["==", "=="]);
}

#[test]
fn test_required_offset_finds_enclosing_nodes() {
    let ast = load_ast();
    let star = Offset::point(225, 0);

    let enclosing = root(&ast).children(&SearchOptions::new().with_required_offset(star));
    let kinds: Vec<_> = enclosing.iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ContractDefinition,
            NodeKind::FunctionDefinition,
            NodeKind::VariableDeclarationStatement,
            NodeKind::BinaryOperation,
        ]
    );

    let innermost = root(&ast).children(
        &SearchOptions::new()
            .with_required_offset(star)
            .with_parents(false),
    );
    assert_eq!(innermost.len(), 1);
    assert_eq!(innermost[0].get_str("operator"), Some("*"));
}

#[test]
fn test_offset_limits_bound_results() {
    let ast = load_ast();
    let mint = root(&ast).named("Token").unwrap().named("mint").unwrap();
    let limits = mint.offset().unwrap();

    let inside = root(&ast).children(&SearchOptions::new().with_offset_limits(limits));
    assert_eq!(inside.len(), 20);
    assert_eq!(inside[0], mint);
    assert!(inside
        .iter()
        .all(|n| limits.contains(&n.offset().unwrap())));
}

#[test]
fn test_nodes_with_malformed_offsets_fail_offset_predicates() {
    let mut output = load_output();
    output["sources"]["SafeMath.sol"]["ast"]["nodes"][0]["src"] = serde_json::json!("abc:1:0");
    let ast = Ast::from_standard_output(&output).unwrap();
    let root = root(&ast);

    let pragma = root.at(0).unwrap();
    assert_eq!(pragma.offset(), None);
    assert_eq!(pragma.src(), Some("abc:1:0"));

    let pragmas = SearchOptions::new().with_filters(Filter::node_type("PragmaDirective"));
    assert_eq!(root.children(&pragmas), vec![pragma]);
    let bounded = pragmas.with_offset_limits(root.offset().unwrap());
    assert!(root.children(&bounded).is_empty());
}

#[test]
fn test_ancestor_search() {
    let ast = load_ast();
    let mul = mul(&ast);
    let ret_c = mul.at(3).unwrap();
    let c = ret_c.child_nodes().next().unwrap();

    let chain: Vec<_> = c
        .parents(None, &FilterSet::new())
        .iter()
        .map(|n| n.node_type())
        .collect();
    assert_eq!(
        chain,
        vec!["Return", "FunctionDefinition", "ContractDefinition", "SourceUnit"]
    );

    assert_eq!(c.parent(Some(-1), &FilterSet::new()), Some(ret_c));
    assert!(c
        .parent(Some(-1), &Filter::node_type("FunctionDefinition").into())
        .is_none());
    assert_eq!(
        c.parent(None, &Filter::node_type("FunctionDefinition").into()),
        Some(mul)
    );
    assert_eq!(c.ancestor_at(1).and_then(|n| n.name()), Some("SafeMath"));
    assert!(c.is_child_of(&mul));
    assert!(!c.is_child_of(&root(&ast).named("Token").unwrap()));
}

#[test]
fn test_find_node_combined_query() {
    let ast = load_ast();
    let root = root(&ast);

    let query = FindQuery::new(Filter::node_type("Return"))
        .with_parent(Filter::node_type("FunctionDefinition").with("name", "mul"))
        .with_child(Filter::node_type("Identifier"));
    let hit = root.find_node(&query).unwrap();
    assert_eq!(hit.node.src(), Some("291:9:0"));
    assert_eq!(hit.parent, mul(&ast));
    assert_eq!(hit.child.name(), Some("c"));
    assert_eq!(root.find_node(&query), Some(hit));

    let in_branch = FindQuery::new(Filter::node_type("Return")).with_parent(Filter::node_type("IfStatement"));
    let hit = root.find_node(&in_branch).unwrap();
    assert_eq!(hit.node.src(), Some("183:9:0"));
    assert_eq!(hit.child.get_str("value"), Some("0"));

    let everywhere = FindQuery::new(Filter::node_type("Identifier").with("name", "to"))
        .with_parent(Filter::node_type("IndexAccess"))
        .with_parent_depth(-1);
    assert!(root.find_nodes(&everywhere).is_empty(), "identifiers have no children");
}

#[test]
fn test_find_nodes_and_presence_checks() {
    let ast = load_ast();
    let root = root(&ast);

    let calls = FindQuery::new(Filter::node_type("FunctionCall"))
        .with_parent(Filter::node_type("ContractDefinition"))
        .with_child(Filter::node_type("Literal"));
    let hits = root.find_nodes(&calls);
    let contracts: Vec<_> = hits.iter().filter_map(|m| m.parent.name()).collect();
    assert_eq!(contracts, vec!["SafeMath", "Token"]);

    let token = root.named("Token").unwrap();
    let member = token
        .child_has_attributes(&Filter::node_type("MemberAccess").into(), None)
        .unwrap();
    assert_eq!(member.get_str("memberName"), Some("mul"));
    assert!(token
        .child_has_attributes(&Filter::node_type("MemberAccess").into(), Some(3))
        .is_none());

    let index_accesses = token.children_have_attributes(&Filter::node_type("IndexAccess").into(), None);
    assert_eq!(index_accesses.len(), 2);

    let within_function = member
        .parents_have_attributes(&Filter::new().with("baseNodeType", "ContractPart").into(), None);
    let names: Vec<_> = within_function.iter().filter_map(|n| n.name()).collect();
    assert_eq!(names, vec!["mint"]);
}
