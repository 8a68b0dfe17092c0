use solidity_ast::{Ast, Node};
use std::fs;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn output_path() -> PathBuf {
    fixtures_dir().join("safemath_output.json")
}

pub fn load_ast() -> Ast {
    Ast::from_standard_output_path(output_path()).unwrap()
}

pub fn load_output() -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(output_path()).unwrap()).unwrap()
}

pub fn source() -> String {
    fs::read_to_string(fixtures_dir().join("SafeMath.sol")).unwrap()
}

pub fn root(ast: &Ast) -> Node<'_> {
    ast.roots().next().unwrap()
}

pub fn mul(ast: &Ast) -> Node<'_> {
    root(ast).named("SafeMath").unwrap().named("mul").unwrap()
}
