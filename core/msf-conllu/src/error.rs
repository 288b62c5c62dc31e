use msf_protocol::{FeatureParseError, UnknownValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConlluError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A word line without the ten mandatory columns
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: malformed id '{value}'")]
    BadId { line: usize, value: String },

    #[error("line {line}: malformed head '{value}'")]
    BadHead { line: usize, value: String },

    #[error("line {line}: {source}")]
    Upos {
        line: usize,
        #[source]
        source: UnknownValue,
    },

    #[error("line {line}: {source}")]
    Feats {
        line: usize,
        #[source]
        source: FeatureParseError,
    },
}

impl ConlluError {
    /// Line number the error was found on, if it came from the input text.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConlluError::Io(_) => None,
            ConlluError::ColumnCount { line, .. }
            | ConlluError::BadId { line, .. }
            | ConlluError::BadHead { line, .. }
            | ConlluError::Upos { line, .. }
            | ConlluError::Feats { line, .. } => Some(*line),
        }
    }
}
