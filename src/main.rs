use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use solidity_ast::config::{load_from_path, run_queries, Excerpt};
use solidity_ast::{Ast, Filter, Node, SearchOptions};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solidity-ast")]
#[command(about = "Query and extract code from solc JSON ASTs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an indented outline of every source unit
    Tree {
        /// Standard-JSON compiler output
        #[arg(short, long)]
        output: PathBuf,

        /// Stop descending below this many levels
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Run the queries of a TOML query file
    Query {
        /// Standard-JSON compiler output
        #[arg(short, long)]
        output: PathBuf,

        /// Query configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Directory that source `absolutePath`s are relative to
        #[arg(short, long)]
        base_path: Option<PathBuf>,
    },

    /// Print the code of every node of a given type
    Extract {
        /// Standard-JSON compiler output
        #[arg(short, long)]
        output: PathBuf,

        /// nodeType to match, e.g. FunctionDefinition
        #[arg(short = 't', long)]
        node_type: String,

        /// Only nodes with this name
        #[arg(long)]
        name: Option<String>,

        /// Directory that source `absolutePath`s are relative to
        #[arg(short, long)]
        base_path: Option<PathBuf>,

        /// Omit line numbers
        #[arg(long)]
        no_loc: bool,

        /// Strip `//@` annotations
        #[arg(long)]
        no_tags: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { output, max_depth } => cmd_tree(&output, max_depth),

        Commands::Query {
            output,
            config,
            base_path,
        } => cmd_query(&output, &config, base_path.as_deref()),

        Commands::Extract {
            output,
            node_type,
            name,
            base_path,
            no_loc,
            no_tags,
        } => cmd_extract(
            &output,
            &node_type,
            name.as_deref(),
            base_path.as_deref(),
            !no_loc,
            !no_tags,
        ),
    }
}

fn load_ast(output: &Path) -> Result<Ast> {
    Ast::from_standard_output_path(output)
        .with_context(|| format!("failed to load compiler output {}", output.display()))
}

/// Helper: Read the text of every source unit that exists under `base_path`.
///
/// Keyed by source file index; unreadable files are skipped with a warning.
fn read_sources(ast: &Ast, base_path: &Path) -> HashMap<usize, String> {
    let mut sources = HashMap::new();
    for root in ast.roots() {
        let (Some(id), Some(path)) = (root.contract_id(), root.get_str("absolutePath")) else {
            continue;
        };
        let file = base_path.join(path);
        match fs::read_to_string(&file) {
            Ok(text) => {
                debug!(file = %file.display(), id, "read source");
                sources.insert(id, text);
            }
            Err(err) => warn!(file = %file.display(), error = %err, "source not readable"),
        }
    }
    sources
}

fn describe(node: &Node<'_>) -> String {
    match node.offset() {
        Some(offset) => format!("{} {}", node, format!("@ {offset}").dimmed()),
        None => node.to_string(),
    }
}

fn cmd_tree(output: &Path, max_depth: Option<usize>) -> Result<()> {
    let ast = load_ast(output)?;

    for root in ast.roots() {
        println!("{}", describe(&root).bold());
        let options = SearchOptions {
            depth: max_depth,
            ..SearchOptions::default()
        };
        for node in root.children(&options) {
            let indent = "  ".repeat(node.depth() - root.depth());
            println!("{indent}{}", describe(&node));
        }
    }

    Ok(())
}

fn cmd_query(output: &Path, config_path: &Path, base_path: Option<&Path>) -> Result<()> {
    let config = load_from_path(config_path)?;
    let ast = load_ast(output)?;
    let sources = base_path
        .map(|base| read_sources(&ast, base))
        .unwrap_or_default();

    if !config.meta.name.is_empty() {
        println!("{}", config.meta.name.bold());
    }

    let mut total_hits = 0;
    let mut total_failed = 0;

    for (query_id, result) in run_queries(&config, &ast, &sources) {
        match result {
            Ok(report) if report.is_empty() => {
                println!("{} {}: no matches", "⊙".yellow(), query_id);
            }
            Ok(report) => {
                println!(
                    "{} {}: {} match(es)",
                    "✓".green(),
                    query_id,
                    report.len()
                );
                for hit in &report.hits {
                    println!("  {}", describe(&hit.node));
                    match &hit.excerpt {
                        Excerpt::Extracted { code, .. } => {
                            for line in code.lines() {
                                println!("    {line}");
                            }
                        }
                        Excerpt::Failed(err) => {
                            println!("    {}", format!("no code: {err}").yellow());
                        }
                        Excerpt::Unavailable => {}
                    }
                }
                total_hits += report.len();
            }
            Err(issue) => {
                eprintln!("{} {}: Error - {}", "✗".red(), query_id, issue);
                total_failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} matches", format!("{total_hits}").green());
    println!("  {} failed queries", format!("{total_failed}").red());

    if total_failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_extract(
    output: &Path,
    node_type: &str,
    name: Option<&str>,
    base_path: Option<&Path>,
    loc: bool,
    tags: bool,
) -> Result<()> {
    let ast = load_ast(output)?;
    let base_path = base_path.unwrap_or_else(|| Path::new("."));
    let sources = read_sources(&ast, base_path);

    let mut filter = Filter::node_type(node_type);
    if let Some(name) = name {
        filter = filter.with("name", name);
    }
    let options = SearchOptions::new().with_filters(filter);

    let mut found = 0;
    for root in ast.roots() {
        for node in root.children(&options) {
            found += 1;
            println!("{}", describe(&node).bold());
            let Some(source) = node.contract_id().and_then(|id| sources.get(&id)) else {
                println!("{}", "  (source not available)".yellow());
                continue;
            };
            match node.extract_code(source, loc, tags) {
                Ok(code) => println!("{code}\n"),
                Err(err) => eprintln!("{} {}", "✗".red(), err),
            }
        }
    }

    if found == 0 {
        anyhow::bail!("no {} nodes found", node_type);
    }

    Ok(())
}
