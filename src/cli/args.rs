use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::model::ModelDescription;

/// Command line arguments for llmctl
#[derive(Parser, Debug)]
#[command(
    name = "llmctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Model inspection and log tailing for local LLM runtimes",
    long_about = "Render model descriptions as aligned reports and view or follow the runtime's server and app logs."
)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show information about a model
    Show(ShowArgs),
    /// View the server or app log
    Logs(LogsArgs),
    /// Print log file locations
    Paths,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Show(_) => "show",
            Command::Logs(_) => "logs",
            Command::Paths => "paths",
            Command::Config(_) => "config",
            Command::Version => "version",
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
}

/// Arguments for `show`
#[derive(ClapArgs, Debug)]
pub struct ShowArgs {
    /// Model name or path to a JSON model description
    pub model: String,

    /// Directory holding `<model>.json` descriptions
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    /// Include metadata and tensors
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only the license
    #[arg(long, group = "field")]
    pub license: bool,

    /// Print only the parameters
    #[arg(long, group = "field")]
    pub parameters: bool,

    /// Print only the system prompt
    #[arg(long, group = "field")]
    pub system: bool,

    /// Print only the template
    #[arg(long, group = "field")]
    pub template: bool,

    /// Print only the Modelfile
    #[arg(long, group = "field")]
    pub modelfile: bool,
}

impl ShowArgs {
    /// The raw field selected by a field flag, if any
    pub fn selected_field<'a>(&self, description: &'a ModelDescription) -> Option<&'a str> {
        if self.license {
            Some(&description.license)
        } else if self.parameters {
            Some(&description.parameters)
        } else if self.system {
            Some(&description.system)
        } else if self.template {
            Some(&description.template)
        } else if self.modelfile {
            Some(&description.modelfile)
        } else {
            None
        }
    }
}

/// Arguments for `logs`
#[derive(ClapArgs, Debug)]
pub struct LogsArgs {
    /// Number of lines to show from the end (0 = all)
    #[arg(short = 'n', long)]
    pub tail: Option<usize>,

    /// Keep printing lines as they are appended
    #[arg(short, long)]
    pub follow: bool,

    /// Show the app log instead of the server log
    #[arg(long, conflicts_with = "file")]
    pub app: bool,

    /// Read an explicit log file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Create default configuration
    Init {
        /// Output file path
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
