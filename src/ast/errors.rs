use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid AST record: {reason}")]
    InvalidRecord { reason: String },

    #[error("compiler output has no 'sources' object")]
    MissingSources,

    #[error("source '{source_path}' has no 'ast' entry")]
    MissingAst { source_path: String },
}
