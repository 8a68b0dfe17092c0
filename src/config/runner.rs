//! Query runner - executes configured queries against a corpus
//!
//! Every query runs from each source root. Matches are reported with their
//! source lines and code when the caller supplied the text of the file the
//! match lives in.

use crate::ast::{Ast, Node};
use crate::config::schema::{OutputOptions, QueryConfig, QueryDefinition, ValidationIssue};
use crate::extract::ExtractError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Source text of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Excerpt {
    /// No source text was supplied for the match's file
    Unavailable,
    Extracted {
        lines: (usize, usize),
        code: String,
    },
    Failed(ExtractError),
}

#[derive(Debug, Clone)]
pub struct QueryHit<'a> {
    pub node: Node<'a>,
    pub excerpt: Excerpt,
}

impl fmt::Display for QueryHit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)?;
        if let Some(offset) = self.node.offset() {
            write!(f, " @ {offset}")?;
        }
        match &self.excerpt {
            Excerpt::Unavailable => Ok(()),
            Excerpt::Extracted { lines, code } => {
                write!(f, " (lines {}-{})\n{}", lines.0, lines.1, code)
            }
            Excerpt::Failed(err) => write!(f, " (no code: {err})"),
        }
    }
}

/// Matches of one query across all roots.
#[derive(Debug, Clone, Default)]
pub struct QueryReport<'a> {
    pub hits: Vec<QueryHit<'a>>,
}

impl QueryReport<'_> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

fn excerpt(node: &Node<'_>, sources: &HashMap<usize, String>, output: OutputOptions) -> Excerpt {
    let Some(source) = node.contract_id().and_then(|id| sources.get(&id)) else {
        return Excerpt::Unavailable;
    };
    let lines = match node.line_numbers(source) {
        Ok(lines) => lines,
        Err(err) => return Excerpt::Failed(err),
    };
    match node.extract_code(source, output.loc, output.tags) {
        Ok(code) => Excerpt::Extracted { lines, code },
        Err(err) => Excerpt::Failed(err),
    }
}

fn run_query<'a>(
    query: &QueryDefinition,
    ast: &'a Ast,
    sources: &HashMap<usize, String>,
    output: OutputOptions,
) -> Result<QueryReport<'a>, ValidationIssue> {
    let options = query.search_options()?;
    let hits: Vec<QueryHit<'a>> = ast
        .roots()
        .flat_map(|root| root.children(&options))
        .map(|node| QueryHit {
            excerpt: excerpt(&node, sources, output),
            node,
        })
        .collect();

    debug!(query = %query.id, hits = hits.len(), "query finished");
    Ok(QueryReport { hits })
}

/// Run every query in `config` against `ast`.
///
/// `sources` maps source file index to file text and is optional per file.
///
/// # Returns
///
/// One result per query, in configuration order
pub fn run_queries<'a>(
    config: &QueryConfig,
    ast: &'a Ast,
    sources: &HashMap<usize, String>,
) -> Vec<(String, Result<QueryReport<'a>, ValidationIssue>)> {
    info!(
        name = %config.meta.name,
        queries = config.queries.len(),
        roots = ast.roots().len(),
        "running queries"
    );
    config
        .queries
        .iter()
        .map(|query| {
            (
                query.id.clone(),
                run_query(query, ast, sources, config.output),
            )
        })
        .collect()
}
