//! Where tables come from and where output goes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use msf_lexicon::Lexicon;
use tracing::info;

/// Rejected sentences when annotating to stdout without a rejected path.
pub const DEFAULT_REJECTED: &str = "rejected.conllu";

/// Resolved settings of one `annotate` run.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// JSON table file; the built-in Swedish tables when absent.
    pub tables: Option<PathBuf>,
    /// Annotated output; stdout when absent.
    pub output: Option<PathBuf>,
    /// Rejected sentences; derived from `output` when absent.
    pub rejected: Option<PathBuf>,
    /// JSON run summary.
    pub summary: Option<PathBuf>,
}

impl Settings {
    pub fn lexicon(&self) -> Result<Lexicon> {
        match &self.tables {
            Some(path) => {
                let lexicon = Lexicon::from_path(path)
                    .with_context(|| format!("loading tables from {}", path.display()))?;
                info!(path = %path.display(), "using table file");
                Ok(lexicon)
            }
            None => Ok(Lexicon::swedish()),
        }
    }

    pub fn output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => create(path),
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }

    /// `<output stem>.rejected.conllu` next to the output, unless set explicitly.
    pub fn rejected_path(&self) -> PathBuf {
        match (&self.rejected, &self.output) {
            (Some(path), _) => path.clone(),
            (None, Some(output)) => {
                let stem = output
                    .file_stem()
                    .map_or_else(|| "output".into(), |stem| stem.to_string_lossy());
                output.with_file_name(format!("{}.{}", stem, DEFAULT_REJECTED))
            }
            (None, None) => PathBuf::from(DEFAULT_REJECTED),
        }
    }

    pub fn rejected(&self) -> Result<Box<dyn Write>> {
        let path = self.rejected_path();
        ensure!(
            self.output.as_deref() != Some(path.as_path()),
            "rejected sentences cannot go to the annotated output {}",
            path.display()
        );
        info!(path = %path.display(), "writing rejected sentences");
        create(&path)
    }
}

pub fn create(path: &Path) -> Result<Box<dyn Write>> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
