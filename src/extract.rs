//! Source code extraction by offset.
//!
//! Spans are widened to whole lines. With `loc` every line is prefixed with
//! its 1-based number; without `tags` inline `//@` annotations are removed:
//!
//! ```text
//! 5: uint c = a * b; //@ overflow
//!                ^ loc = true, tags = true
//! 5: uint c = a * b;
//!                ^ loc = true, tags = false
//! ```

use crate::ast::Node;
use crate::cache;
use crate::offset::Offset;
use thiserror::Error;

/// Marker opening an inline annotation comment.
pub const TAG_MARKER: &str = "//@";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("node has no source offset")]
    MissingOffset,

    #[error("offset {offset} starts beyond source of length {source_len}")]
    OutOfBounds { offset: Offset, source_len: usize },
}

fn check_bounds(offset: &Offset, source: &str) -> Result<(), ExtractError> {
    if offset.start > source.len() {
        return Err(ExtractError::OutOfBounds {
            offset: *offset,
            source_len: source.len(),
        });
    }
    Ok(())
}

/// First and last 1-based line covered by `offset`.
pub fn line_range(offset: &Offset, source: &str) -> Result<(usize, usize), ExtractError> {
    check_bounds(offset, source)?;
    let index = cache::line_index(source);
    let start_line = index.line_of(offset.start);
    let end_line = match offset.length {
        0 => start_line,
        _ => index.line_of(offset.end() - 1),
    };
    Ok((start_line, end_line))
}

/// Whole-line text covered by `offset`, without the final newline.
pub fn snippet(offset: &Offset, source: &str, loc: bool, tags: bool) -> Result<String, ExtractError> {
    let (start_line, end_line) = line_range(offset, source)?;
    let index = cache::line_index(source);
    let text = &source[index.line_start(start_line)..index.line_end(end_line)];

    let code = if tags {
        text.to_string()
    } else {
        text.split('\n').map(strip_tags).collect::<Vec<_>>().join("\n")
    };

    Ok(if loc {
        insert_line_numbers(&code, start_line)
    } else {
        code
    })
}

/// Drop a trailing `//@` annotation and the whitespace before it.
pub fn strip_tags(line: &str) -> &str {
    match line.find(TAG_MARKER) {
        Some(position) => line[..position].trim_end(),
        None => line,
    }
}

/// Prefix each line of `code` with its number, counting from `start_line`.
pub fn insert_line_numbers(code: &str, start_line: usize) -> String {
    code.split('\n')
        .enumerate()
        .map(|(position, line)| format!("{}: {}", start_line + position, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Node<'_> {
    pub fn line_numbers(&self, source: &str) -> Result<(usize, usize), ExtractError> {
        let offset = self.offset().ok_or(ExtractError::MissingOffset)?;
        line_range(&offset, source)
    }

    /// Source lines covered by this node.
    pub fn extract_code(&self, source: &str, loc: bool, tags: bool) -> Result<String, ExtractError> {
        let offset = self.offset().ok_or(ExtractError::MissingOffset)?;
        snippet(&offset, source, loc, tags)
    }
}
