//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use clozer::core::input::{EncodingStrategy, InputConfig, DEFAULT_MAX_FILE_SIZE};
use clozer::core::render::{OutputFormat, RenderConfig};

use crate::commands;

/// clozer - turn cloze markup into anchored, cross-linked exercise elements.
#[derive(Parser, Debug)]
#[command(name = "clozer")]
#[command(
    author,
    version,
    about,
    long_about = r#"clozer reads authored cloze markup and replaces its markers with anchors:

- ___ (three or more underscores) marks a blank
- !!text!! (1-40 characters) marks a highlight

Every blank is linked to the highlights before and after it.
Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (elements in document order, then markup)
- json: a single JSON array
- md: human-friendly Markdown
- raw: transformed markup only

Examples:
    clozer build exercise.html --blanks answers.json
    clozer lint exercise.html --blanks answers.json
    clozer check exercise.html --blanks graded.json
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        env = "CLOZER_FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Can also be set with the CLOZER_FORMAT environment variable."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored summaries on stderr. The NO_COLOR environment variable\n\
is honored as well."
    )]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress the stderr summary. Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (debug logging).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log scanning details at debug level to stderr.\n\n\
Without this flag the RUST_LOG environment variable applies (default: warn)."
    )]
    pub verbose: bool,

    /// Refuse markup that is not valid UTF-8.
    #[arg(long, global = true)]
    pub strict_utf8: bool,

    /// Maximum markup size in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FILE_SIZE, value_name = "BYTES")]
    pub max_file_size: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Files every command reads
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Authored markup file.
    #[arg(value_name = "HTML_FILE")]
    pub html: PathBuf,

    /// JSON array of answer templates, in document order.
    #[arg(
        long,
        value_name = "FILE",
        long_help = "JSON array of answer templates, one per blank in document order.\n\n\
Each entry is a single answer (\"Paris\"), a list of accepted answers\n\
([\"Paris\", \"paris\"]) or a full blank object:\n\
  {\"correct_answers\": [\"Paris\"], \"hint\": \"city\", \"is_correct\": true}\n\n\
Without this option every blank marker renders as an empty placeholder."
    )]
    pub blanks: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a cloze and print its elements and markup.
    #[command(long_about = "Normalize blank markers, replace every marker with an anchor and\n\
link each blank to its surrounding highlights.\n\n\
Examples:\n\
  clozer build exercise.html --blanks answers.json\n\
  clozer build exercise.html --blanks answers.json --media media.json --format json\n\
  clozer build exercise.html --blanks answers.json --format raw > exercise.out.html\n")]
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// JSON array of media elements passed through to the output.
        #[arg(long, value_name = "FILE")]
        media: Option<PathBuf>,
    },

    /// Report authoring problems in cloze markup.
    #[command(long_about = "Check for blank markers without answers, answers without markers,\n\
'!!' delimiters that do not form a highlight, and exercises without blanks.\n\n\
Exits with status 1 when an error-level issue is found.\n\n\
Example:\n\
  clozer lint exercise.html --blanks answers.json\n")]
    Lint {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Report whether every blank is graded correct.
    #[command(long_about = "Build the cloze with answer templates that carry is_correct flags\n\
and report completeness. Exits with status 2 when incomplete.\n\n\
Example:\n\
  clozer check exercise.html --blanks graded.json\n")]
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    LintErrors,
    Incomplete,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::LintErrors => 1,
            Outcome::Incomplete => 2,
        }
    }
}

/// Options shared by all command handlers
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub render: RenderConfig,
    pub input: InputConfig,
    pub quiet: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<Outcome> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|message: String| anyhow::anyhow!(message))?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings {
        render: RenderConfig::from(format).pretty(cli.pretty),
        input: InputConfig {
            max_file_size: cli.max_file_size,
            encoding_strategy: if cli.strict_utf8 {
                EncodingStrategy::Strict
            } else {
                EncodingStrategy::Lossy
            },
        },
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Build { input, media } => {
            commands::run_build(&input.html, input.blanks.as_deref(), media.as_deref(), settings)
        }
        Commands::Lint { input } => {
            commands::run_lint(&input.html, input.blanks.as_deref(), settings)
        }
        Commands::Check { input } => {
            commands::run_check(&input.html, input.blanks.as_deref(), settings)
        }
    }
}
