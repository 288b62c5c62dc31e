//! msf-annotate: derives morphosyntactic features for a CoNLL-U treebank.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use msf_conllu::{write_annotated, write_rejected, ConlluReader};
use msf_grammar::{Annotation, Annotator, Summary};
use msf_lexicon::Lexicon;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "msf-annotate",
    author,
    version,
    about = "Adds a derived morphosyntactic feature column to UD treebanks"
)]
struct Cli {
    /// Log every annotated head
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotate a CoNLL-U file
    Annotate(AnnotateArgs),

    /// Inspect lexical tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
}

#[derive(Args, Debug)]
struct AnnotateArgs {
    /// CoNLL-U input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Annotated output (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Where rejected sentences go (defaults to <output stem>.rejected.conllu)
    #[arg(short, long, value_name = "FILE", env = "MSF_REJECTED")]
    rejected: Option<PathBuf>,

    /// JSON table file replacing the built-in Swedish tables
    #[arg(short, long, value_name = "FILE", env = "MSF_TABLES")]
    tables: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum TablesAction {
    /// Write the built-in tables as JSON
    Dump {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Load and validate a JSON table file
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl From<&AnnotateArgs> for Settings {
    fn from(args: &AnnotateArgs) -> Self {
        Settings {
            tables: args.tables.clone(),
            output: args.output.clone(),
            rejected: args.rejected.clone(),
            summary: args.summary.clone(),
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Annotate(args) => annotate(&Settings::from(&args), &args.input),
        Commands::Tables { action } => match action {
            TablesAction::Dump { output } => dump_tables(output),
            TablesAction::Check { file } => check_tables(file),
        },
    }
}

fn annotate(settings: &Settings, input: &Path) -> Result<()> {
    let annotator = Annotator::new(settings.lexicon()?);
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let reader = ConlluReader::new(BufReader::new(file));

    let mut out = settings.output()?;
    let mut rejected = settings.rejected()?;
    let mut summary = Summary::default();

    for item in reader {
        let sentence = match item {
            Ok(sentence) => sentence,
            Err(err) => {
                warn!(line = ?err.line(), error = %err, "skipping malformed block");
                summary.record_malformed();
                continue;
            }
        };

        let annotation = annotator.annotate(sentence);
        summary.record(&annotation);
        match &annotation {
            Annotation::Accepted { sentence, features } => {
                write_annotated(&mut out, sentence, features).context("writing annotated sentence")?;
            }
            Annotation::Rejected { sentence, reason } => {
                write_rejected(&mut rejected, sentence, &reason.code()).context("writing rejected sentence")?;
            }
        }
    }

    out.flush().context("flushing annotated output")?;
    rejected.flush().context("flushing rejected output")?;

    info!(
        sentences = summary.sentences,
        accepted = summary.accepted,
        rejected = summary.rejected,
        malformed = summary.malformed,
        "annotation finished"
    );
    if let Some(path) = &settings.summary {
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    }
    Ok(())
}

fn dump_tables(output: Option<PathBuf>) -> Result<()> {
    let json = Lexicon::swedish().to_json_pretty().context("serializing built-in tables")?;
    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "wrote built-in tables");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn check_tables(file: PathBuf) -> Result<()> {
    let lexicon = Lexicon::from_path(&file).with_context(|| format!("checking {}", file.display()))?;
    println!(
        "{}: ok ({} TAM rules, {} case, {} marker, {} conj entries, {} determiners)",
        file.display(),
        lexicon.tam.rules.len(),
        lexicon.relations.case.len(),
        lexicon.relations.marker.len(),
        lexicon.relations.conj.len(),
        lexicon.determiners.entries.len(),
    );
    Ok(())
}
