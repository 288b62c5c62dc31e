//! CoNLL-U input and output.
//!
//! Annotated output appends one derived column per word line; rejected
//! sentences are written in the plain ten-column layout under an
//! `# error_type = ...` comment.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::ConlluError;
pub use reader::{parse_str, ConlluReader, IdField};
pub use writer::{annotated_to_string, write_annotated, write_plain, write_rejected};
