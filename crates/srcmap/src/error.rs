use thiserror::Error;

/// Errors surfaced by [`Buffer`](crate::Buffer) operations and by encoding
/// detection.
///
/// All of these are programmer or input errors reported synchronously to the
/// immediate caller; nothing is retried or recovered internally, and a failed
/// operation leaves the buffer in its prior state.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The source text was read before any assignment.
    #[error("buffer source is not set")]
    SourceUnset,

    /// A second source assignment was attempted on a write-once buffer.
    #[error("buffer source is already set")]
    SourceAlreadySet,

    /// A magic comment declared an encoding that no known label resolves to.
    #[error("unknown encoding declared in magic comment: {label}")]
    UnknownEncoding {
        /// The declared encoding name, with any emacs suffix already stripped.
        label: String,
    },

    /// The input bytes are not valid under the encoding they were decoded
    /// with.
    #[error("invalid byte sequence for encoding {encoding}")]
    InvalidByteSequence {
        /// Canonical name of the encoding the bytes failed to decode under.
        encoding: &'static str,
    },

    /// A line number outside the buffer's indexed lines. The synthetic line
    /// one past the last physical line is in range; everything beyond it, or
    /// before `first_line`, is not.
    #[error("line {line} is outside the buffer")]
    LineOutOfRange {
        /// The requested line number.
        line: usize,
    },

    /// A byte range that does not lie on char boundaries inside the source
    /// text.
    #[error("range {begin}..{end} is outside the buffer")]
    RangeOutOfBounds {
        /// Begin offset of the rejected range.
        begin: usize,
        /// End offset of the rejected range.
        end: usize,
    },

    /// Reading a source file from disk failed.
    #[error("failed to read source file: {0}")]
    Io(#[from] std::io::Error),
}
