//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use docket_classifier::BackendKind;
use std::path::PathBuf;

/// Docket - Find the ten strongest arguments in a legal brief.
#[derive(Debug, Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.docket/config.toml)
    #[arg(short, long, global = true, env = "DOCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (citations only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank the arguments of a brief
    Analyze(AnalyzeArgs),

    /// Show how a brief is cut into pages, lines and segments
    Segment(SegmentArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text file with page breaks (form feeds or `--- Page N ---` lines)
    pub file: PathBuf,

    /// Classifier backend
    #[arg(long, value_enum)]
    pub classifier: Option<ClassifierArg>,

    /// Ollama model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Ollama endpoint URL
    #[arg(short, long, env = "OLLAMA_HOST")]
    pub endpoint: Option<String>,

    /// Number of arguments to report (at most 10)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Document name used in the report (default: the file name)
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the segment command.
#[derive(Debug, Parser)]
pub struct SegmentArgs {
    /// Text file with page breaks
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Classifier argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ClassifierArg {
    /// Deterministic rule-based classifier
    Rules,
    /// Local Ollama model
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ClassifierArg> for BackendKind {
    fn from(arg: ClassifierArg) -> Self {
        match arg {
            ClassifierArg::Rules => BackendKind::Rules,
            ClassifierArg::Ollama => BackendKind::Ollama,
        }
    }
}
