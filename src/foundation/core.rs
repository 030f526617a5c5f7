use std::{fmt, str::FromStr};

use crate::foundation::error::{CueError, CueResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Half-open byte interval `[start, end)` into raw scene text.
///
/// Ranges produced by the scanner cover exactly one JSON object, braces included.
pub struct ByteRange {
    /// Offset of the opening brace.
    pub start: usize,
    /// One past the closing brace.
    pub end: usize, // exclusive
}

impl ByteRange {
    /// Build a range; `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> CueResult<Self> {
        if start > end {
            return Err(CueError::validation("ByteRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of bytes covered.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range covers no bytes.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// True when `offset` lies inside `[start, end)`.
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Midpoint offset, always inside a non-empty range.
    pub fn midpoint(self) -> usize {
        self.start + self.len() / 2
    }

    /// Slice `text` by this range, if it is in bounds and on char boundaries.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.start..self.end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Positional address of an element inside the nested scene graph.
///
/// Each segment is the element's index in its parent `elements` array, so `"2.0"` is the
/// first child of the third top-level element. Paths are recomputed on every parse and
/// are not stable identities across edits.
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    /// The empty path (the scene root).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit segments.
    pub fn from_segments(segments: impl Into<Vec<usize>>) -> Self {
        Self(segments.into())
    }

    /// Path of the `index`-th child below this path.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(index);
        Self(segments)
    }

    /// Number of segments; top-level elements have depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Index segments from the root down.
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Index within the parent array (the last segment).
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl FromStr for ElementPath {
    type Err = CueError;

    fn from_str(s: &str) -> CueResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CueError::validation("element path must be non-empty"));
        }
        s.split('.')
            .map(|seg| {
                seg.parse::<usize>().map_err(|_| {
                    CueError::validation(format!("invalid element path segment '{seg}'"))
                })
            })
            .collect::<CueResult<Vec<_>>>()
            .map(Self)
    }
}

impl serde::Serialize for ElementPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ElementPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
