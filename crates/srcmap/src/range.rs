//! Half-open byte spans within a buffer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;
use crate::error::BufferError;

/// A contiguous span of bytes `[begin, end)` within a specific [`Buffer`],
/// used to tag syntax elements with their originating location.
///
/// The range itself is a plain pair of offsets; resolution against the text
/// it points into goes through the buffer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceRange {
    begin: usize,
    end: usize,
}

impl SourceRange {
    /// Creates the span `[begin, end)`. `begin` must not exceed `end`.
    #[must_use]
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "inverted range {begin}..{end}");
        Self { begin, end }
    }

    /// The inclusive start offset.
    #[must_use]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// The exclusive end offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes the span covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Whether `offset` falls inside the span.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.begin <= offset && offset < self.end
    }

    /// The smallest range covering both `self` and `other`.
    #[must_use]
    pub fn join(&self, other: Self) -> Self {
        Self {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// The line number of the span's begin offset within `buffer`.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] when the buffer has no source yet.
    pub fn line(&self, buffer: &Buffer) -> Result<usize, BufferError> {
        buffer.line_for_position(self.begin)
    }

    /// The byte column of the span's begin offset within `buffer`.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] when the buffer has no source yet.
    pub fn column(&self, buffer: &Buffer) -> Result<usize, BufferError> {
        buffer.column_for_position(self.begin)
    }

    /// The text the span covers within `buffer`.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] when the buffer has no source yet, or
    /// [`BufferError::RangeOutOfBounds`] when the span does not fit it.
    pub fn source<'b>(&self, buffer: &'b Buffer) -> Result<&'b str, BufferError> {
        buffer.slice(*self)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}
