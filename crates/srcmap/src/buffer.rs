//! Write-once document storage with offset to line/column resolution.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::encoding::reencode;
use crate::error::BufferError;
use crate::range::SourceRange;

/// Immutable holder of one document's text plus the metadata needed to map
/// byte offsets to line and column positions.
///
/// A buffer is constructed empty, its source is assigned exactly once, and it
/// is read for the rest of its lifetime. The line index and per-line text are
/// derived lazily from the frozen source and cached; the `OnceLock` cells
/// double as the one-time-initialization barrier, so a `&Buffer` can be
/// shared across threads while the first readers race to populate them.
///
/// ```
/// use srcmap::Buffer;
///
/// let buffer = Buffer::new("demo.src");
/// buffer.set_source(b"let x = 1\nlet y = 2\n")?;
/// assert_eq!(buffer.decompose_position(12)?, (2, 2));
/// assert_eq!(buffer.source_line(1)?, "let x = 1");
/// # Ok::<(), srcmap::BufferError>(())
/// ```
#[derive(Debug)]
pub struct Buffer {
    name: String,
    first_line: usize,
    source: OnceLock<String>,
    lines: OnceLock<Vec<String>>,
    line_begins: OnceLock<Vec<usize>>,
}

impl Buffer {
    /// Creates an empty buffer labeled `name`, numbering lines from 1.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_first_line(name, 1)
    }

    /// Creates an empty buffer whose first line carries the number
    /// `first_line` instead of 1, for documents embedded mid-file.
    #[must_use]
    pub fn with_first_line(name: impl Into<String>, first_line: usize) -> Self {
        Self {
            name: name.into(),
            first_line,
            source: OnceLock::new(),
            lines: OnceLock::new(),
            line_begins: OnceLock::new(),
        }
    }

    /// Reads the file at `path` in binary mode and assigns its bytes as the
    /// buffer's source. The buffer is named after the path.
    ///
    /// # Errors
    ///
    /// [`BufferError::Io`] when the read fails, plus anything
    /// [`set_source`](Self::set_source) reports.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let buffer = Self::new(path.display().to_string());
        buffer.set_source(&fs::read(path)?)?;
        Ok(buffer)
    }

    /// The buffer's label, typically the originating filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The line number assigned to the first line of the text.
    #[must_use]
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Reencodes `bytes` to UTF-8, honoring any magic comment, and freezes
    /// the result as the buffer's source.
    ///
    /// # Errors
    ///
    /// Anything [`reencode`] reports, or [`BufferError::SourceAlreadySet`]
    /// when the source was assigned before. A failed reencode leaves the
    /// buffer unassigned.
    pub fn set_source(&self, bytes: &[u8]) -> Result<(), BufferError> {
        self.set_raw_source(reencode(bytes)?)
    }

    /// Freezes already-decoded text as the buffer's source, collapsing CR-LF
    /// pairs to LF first. No encoding detection is performed.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceAlreadySet`] when the source was assigned before;
    /// the originally stored text is untouched.
    pub fn set_raw_source(&self, text: impl Into<String>) -> Result<(), BufferError> {
        let text = text.into();
        let normalized = if text.contains("\r\n") {
            text.replace("\r\n", "\n")
        } else {
            text
        };
        self.source
            .set(normalized)
            .map_err(|_| BufferError::SourceAlreadySet)
    }

    /// The frozen source text.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn source(&self) -> Result<&str, BufferError> {
        self.source
            .get()
            .map(String::as_str)
            .ok_or(BufferError::SourceUnset)
    }

    /// A range spanning the entire source text.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn source_range(&self) -> Result<SourceRange, BufferError> {
        Ok(SourceRange::new(0, self.source()?.len()))
    }

    /// Resolves a byte offset to its `(line_number, column)` position.
    ///
    /// The line is found by binary search over the line-begin index; the
    /// column is the byte distance from the start of that line. Offsets past
    /// the end of the text are not an error: they resolve against the last
    /// indexed line, so the end-of-input marker a parser emits one position
    /// past the final character still gets a meaningful position.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn decompose_position(&self, offset: usize) -> Result<(usize, usize), BufferError> {
        let begins = self.line_begins()?;
        // begins[0] is 0, so the partition point is never 0.
        let index = begins.partition_point(|&begin| begin <= offset) - 1;
        Ok((self.first_line + index, offset - begins[index]))
    }

    /// The line number containing `offset`.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn line_for_position(&self, offset: usize) -> Result<usize, BufferError> {
        Ok(self.decompose_position(offset)?.0)
    }

    /// The byte column of `offset` within its line.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn column_for_position(&self, offset: usize) -> Result<usize, BufferError> {
        Ok(self.decompose_position(offset)?.1)
    }

    /// A fresh copy of the text of line `line_number`, without its
    /// terminator.
    ///
    /// One line past the last physical line yields an empty string, matching
    /// parsers that probe the position just past end-of-input.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment, or
    /// [`BufferError::LineOutOfRange`] for any line before `first_line` or
    /// beyond the synthetic final line.
    pub fn source_line(&self, line_number: usize) -> Result<String, BufferError> {
        let lines = self.lines()?;
        line_number
            .checked_sub(self.first_line)
            .and_then(|index| lines.get(index))
            .cloned()
            .ok_or(BufferError::LineOutOfRange { line: line_number })
    }

    /// The number of the synthetic empty line just past the last physical
    /// line; equal to `first_line` for an empty document.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment.
    pub fn last_line(&self) -> Result<usize, BufferError> {
        Ok(self.first_line + self.lines()?.len() - 1)
    }

    /// The slice of source text a range covers.
    ///
    /// # Errors
    ///
    /// [`BufferError::SourceUnset`] before any assignment, or
    /// [`BufferError::RangeOutOfBounds`] when the range reaches past the text
    /// or cuts through a multi-byte character.
    pub fn slice(&self, range: SourceRange) -> Result<&str, BufferError> {
        self.source()?
            .get(range.begin()..range.end())
            .ok_or(BufferError::RangeOutOfBounds {
                begin: range.begin(),
                end: range.end(),
            })
    }

    /// Start offset of every line, ascending; entry 0 is always offset 0.
    fn line_begins(&self) -> Result<&[usize], BufferError> {
        let source = self.source()?;
        Ok(self.line_begins.get_or_init(|| {
            let mut begins = vec![0];
            for (index, byte) in source.bytes().enumerate() {
                if byte == b'\n' {
                    begins.push(index + 1);
                }
            }
            begins
        }))
    }

    /// Per-line text without terminators, with one synthetic empty line
    /// appended after the last physical line.
    fn lines(&self) -> Result<&[String], BufferError> {
        let source = self.source()?;
        Ok(self.lines.get_or_init(|| {
            let mut lines: Vec<String> = source.lines().map(str::to_owned).collect();
            lines.push(String::new());
            lines
        }))
    }
}
