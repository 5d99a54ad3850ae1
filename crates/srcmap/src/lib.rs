//! Source buffers, magic-comment encoding detection, and position maps for
//! language front-ends.
//!
//! A [`Buffer`] owns one document's immutable text: raw bytes go in once,
//! encoding detection and CR-LF normalization run up front, and from then on
//! the buffer answers offset-to-position queries and hands out line text for
//! diagnostics. [`SourceRange`] tags syntax elements with the span they came
//! from, and [`Argument`] bundles the name/operator/expression spans of an
//! argument construct for a tree-builder.
//!
//! ```
//! use srcmap::{Argument, Buffer, SourceRange};
//!
//! let buffer = Buffer::new("config.src");
//! buffer.set_source(b"# coding: utf-8\nmode = fast\n")?;
//!
//! let name = SourceRange::new(16, 20);
//! assert_eq!(name.source(&buffer)?, "mode");
//! assert_eq!(buffer.decompose_position(name.begin())?, (2, 0));
//!
//! let argument = Argument::spanning(name, SourceRange::new(16, 27))
//!     .with_operator(SourceRange::new(21, 22));
//! assert_eq!(argument.operator().unwrap().source(&buffer)?, "=");
//! # Ok::<(), srcmap::BufferError>(())
//! ```

mod buffer;
mod encoding;
mod error;
mod map;
mod range;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use encoding::{recognize_encoding, reencode};
pub use encoding_rs::Encoding;
pub use error::BufferError;
pub use map::Argument;
pub use range::SourceRange;
