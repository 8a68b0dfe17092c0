use crate::common::{load_ast, load_output, root};
use solidity_ast::Ast;

fn names<'a>(nodes: impl Iterator<Item = solidity_ast::Node<'a>>) -> Vec<&'a str> {
    nodes.filter_map(|node| node.name()).collect()
}

#[test]
fn test_library_usage_is_a_dependency() {
    let ast = load_ast();
    let token = root(&ast).named("Token").unwrap();
    assert_eq!(names(token.dependencies()), vec!["SafeMath"]);
    assert_eq!(names(token.libraries()), vec!["SafeMath"]);

    let safe_math = root(&ast).named("SafeMath").unwrap();
    assert_eq!(safe_math.dependencies().len(), 0);
    assert_eq!(safe_math.libraries().len(), 0);
}

#[test]
fn test_inheritance_across_sources() {
    let mut output = load_output();
    let token_id = root(&load_ast()).named("Token").unwrap().ast_id().unwrap();
    output["sources"]["Vault.sol"] = serde_json::json!({
        "id": 1,
        "ast": {
            "nodeType": "SourceUnit", "id": 900, "src": "0:60:1", "absolutePath": "Vault.sol",
            "nodes": [{
                "nodeType": "ContractDefinition", "id": 901, "src": "0:60:1", "name": "Vault",
                "contractKind": "contract", "contractDependencies": [],
                "linearizedBaseContracts": [901, token_id], "nodes": []
            }]
        }
    });
    let ast = Ast::from_standard_output(&output).unwrap();

    let vault = ast.find_by_ast_id(901).unwrap();
    assert_eq!(vault.contract_id(), Some(1));
    assert_eq!(names(vault.dependencies()), vec!["SafeMath", "Token"]);
    assert_eq!(vault.libraries().len(), 0);
    assert_eq!(ast.contracts().len(), 3);
    assert_eq!(ast.source_unit("Vault.sol").map(|n| n.depth()), Some(0));
}
