use crate::ast::builder::TreeBuilder;
use crate::ast::deps;
use crate::ast::errors::AstError;
use crate::ast::node::Ast;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Ast {
    /// Wrap a single per-file AST record (a `SourceUnit`).
    pub fn from_ast(record: &Value) -> Result<Ast, AstError> {
        let mut ast = Ast::default();
        TreeBuilder::new(&mut ast).add_root(record, None)?;
        deps::resolve(&mut ast);
        Ok(ast)
    }

    /// Wrap every source in a standard-JSON compiler output.
    ///
    /// Reads `sources.<path>.ast` for each entry; roots are ordered by the
    /// entry's `id`, falling back to document order when ids are missing.
    pub fn from_standard_output(output: &Value) -> Result<Ast, AstError> {
        let sources = output
            .get("sources")
            .and_then(Value::as_object)
            .ok_or(AstError::MissingSources)?;

        let mut entries = Vec::with_capacity(sources.len());
        for (position, (path, entry)) in sources.iter().enumerate() {
            let record = entry.get("ast").ok_or_else(|| AstError::MissingAst {
                source_path: path.clone(),
            })?;
            let source_id = entry
                .get("id")
                .and_then(Value::as_u64)
                .map(|id| id as usize);
            entries.push((source_id.unwrap_or(usize::MAX), position, source_id, record));
        }
        entries.sort_by_key(|(order, position, ..)| (*order, *position));

        let mut ast = Ast::default();
        let mut builder = TreeBuilder::new(&mut ast);
        for (_, _, source_id, record) in entries {
            builder.add_root(record, source_id)?;
        }
        deps::resolve(&mut ast);

        debug!(
            sources = ast.roots.len(),
            nodes = ast.nodes.len(),
            "built AST from compiler output"
        );
        Ok(ast)
    }

    pub fn from_standard_output_str(input: &str) -> Result<Ast, AstError> {
        let output: Value = serde_json::from_str(input)?;
        Ast::from_standard_output(&output)
    }

    pub fn from_ast_str(input: &str) -> Result<Ast, AstError> {
        let record: Value = serde_json::from_str(input)?;
        Ast::from_ast(&record)
    }

    /// Load a standard-JSON output file from disk.
    pub fn from_standard_output_path(path: impl AsRef<Path>) -> Result<Ast, AstError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| AstError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ast::from_standard_output_str(&contents)
    }
}
