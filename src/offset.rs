use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// A source span as emitted by solc: `"<start>:<length>:<fileIndex>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// Starting byte offset (inclusive)
    pub start: usize,
    /// Length of the span in bytes
    pub length: usize,
    /// Index of the source file in the compiler's source list
    pub file_index: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    #[error("malformed source offset '{src}': expected <start>:<length>:<fileIndex>")]
    Malformed { src: String },
}

impl Offset {
    pub fn new(start: usize, length: usize, file_index: usize) -> Self {
        Self {
            start,
            length,
            file_index,
        }
    }

    /// A zero-length offset, used to ask "which nodes cover this byte?".
    pub fn point(position: usize, file_index: usize) -> Self {
        Self::new(position, 0, file_index)
    }

    /// Parse the compact `start:length:fileIndex` form.
    ///
    /// Exactly three colon-separated unsigned integers are accepted; no
    /// surrounding whitespace is tolerated.
    pub fn parse(src: &str) -> Result<Self, OffsetError> {
        let malformed = || OffsetError::Malformed {
            src: src.to_string(),
        };

        let mut parts = src.split(':');
        let mut next = || -> Result<usize, OffsetError> {
            parts
                .next()
                .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|part| part.parse::<usize>().ok())
                .ok_or_else(malformed)
        };

        let start = next()?;
        let length = next()?;
        let file_index = next()?;

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(start, length, file_index))
    }

    /// Ending byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True when `other` lies entirely inside this span of the same file.
    pub fn contains(&self, other: &Offset) -> bool {
        self.file_index == other.file_index
            && other.start >= self.start
            && other.end() <= self.end()
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.length, self.file_index)
    }
}

impl FromStr for Offset {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Offset::parse(s)
    }
}

impl Serialize for Offset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Offset::parse(&raw).map_err(serde::de::Error::custom)
    }
}
