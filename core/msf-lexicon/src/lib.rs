//! Per-language lexical data the annotator is driven by.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod determiners;
pub mod relations;
pub mod swedish;
pub mod tam;
pub mod translit;

pub use determiners::{ComparisonMarker, DeterminerEntry, DeterminerKey, DeterminerTable};
pub use relations::{Bucket, RelationTables};
pub use tam::{FiniteEffect, TamRule, TamTable};
pub use translit::{fallback_value, transliterate};

#[derive(Error, Debug)]
pub enum LexiconError {
    /// Table file could not be read
    #[error("cannot read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON for a lexicon
    #[error("invalid table data: {0}")]
    Json(#[from] serde_json::Error),

    /// Two TAM rules share a lemma
    #[error("TAM rule for '{0}' is declared twice")]
    DuplicateRule(String),

    /// A lemma is both a negation particle and an auxiliary
    #[error("'{0}' is both a negation lemma and a TAM rule")]
    NegationRule(String),

    #[error("infinitive marker must not be empty")]
    EmptyInfinitiveMarker,

    /// A `prefer` entry points at a table that does not list the lemma
    #[error("'{lemma}' prefers the {bucket:?} table but is not in it")]
    DanglingPreference { lemma: String, bucket: Bucket },

    #[error("determiner entry {0} matches nothing")]
    EmptyDeterminer(usize),
}

/// Everything the rule engine needs to know about one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub relations: RelationTables,
    pub tam: TamTable,
    pub determiners: DeterminerTable,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::swedish()
    }
}

impl Lexicon {
    pub fn swedish() -> Self {
        swedish::lexicon()
    }

    /// Parses and validates a JSON table set.
    pub fn from_json(text: &str) -> Result<Self, LexiconError> {
        let mut lexicon: Lexicon = serde_json::from_str(text)?;
        lexicon.relations.normalize();
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            rules = lexicon.tam.rules.len(),
            determiners = lexicon.determiners.entries.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn to_json_pretty(&self) -> Result<String, LexiconError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the cross-table constraints serde cannot express.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.tam.infinitive_marker.is_empty() {
            return Err(LexiconError::EmptyInfinitiveMarker);
        }

        for (i, rule) in self.tam.rules.iter().enumerate() {
            if self.tam.rules[..i].iter().any(|r| r.lemma == rule.lemma) {
                return Err(LexiconError::DuplicateRule(rule.lemma.clone()));
            }
            if self.tam.is_negation(&rule.lemma) {
                return Err(LexiconError::NegationRule(rule.lemma.clone()));
            }
        }

        for (lemma, bucket) in &self.relations.prefer {
            if !self.relations.contains(*bucket, lemma) {
                return Err(LexiconError::DanglingPreference {
                    lemma: lemma.clone(),
                    bucket: *bucket,
                });
            }
        }

        for (i, entry) in self.determiners.entries.iter().enumerate() {
            let empty = match &entry.key {
                DeterminerKey::Lemma(lemma) => lemma.is_empty(),
                DeterminerKey::Forms(forms) => forms.is_empty(),
            };
            if empty {
                return Err(LexiconError::EmptyDeterminer(i));
            }
        }
        Ok(())
    }
}
