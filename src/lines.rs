//! Byte offset to line number mapping.
//!
//! A [`LineIndex`] records the byte position of every `\n` in a source text
//! once, after which any byte offset maps to its 1-based line with a binary
//! search:
//!
//! ```text
//! "ab\ncd\nef"   newlines = [2, 5]
//!
//! line_of(4): newlines before byte 4 = 1  ->  line 2
//! ```

/// Sorted newline positions for one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    newlines: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let newlines = source
            .bytes()
            .enumerate()
            .filter_map(|(pos, byte)| (byte == b'\n').then_some(pos))
            .collect();

        Self {
            newlines,
            len: source.len(),
        }
    }

    /// Length in bytes of the indexed text.
    pub fn source_len(&self) -> usize {
        self.len
    }

    /// Number of lines; a trailing newline does not open an extra line.
    pub fn line_count(&self) -> usize {
        match self.newlines.last() {
            Some(&last) if last + 1 == self.len => self.newlines.len(),
            _ => self.newlines.len() + 1,
        }
    }

    /// 1-based line containing `byte`. Offsets past the end map to the last line.
    pub fn line_of(&self, byte: usize) -> usize {
        1 + self.newlines.partition_point(|&pos| pos < byte)
    }

    /// Byte offset at which `line` (1-based) starts.
    pub fn line_start(&self, line: usize) -> usize {
        match line {
            0 | 1 => 0,
            n => self
                .newlines
                .get(n - 2)
                .map_or(self.len, |&newline| newline + 1),
        }
    }

    /// Byte offset of the end of `line`, excluding its newline.
    pub fn line_end(&self, line: usize) -> usize {
        self.newlines
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(self.len)
    }
}
