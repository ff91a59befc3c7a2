//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: list registered templates
//! - show: print a template verbatim
//! - render: print a template with variables substituted
//! - compose: print system + user messages as JSON
//! - context: print retrieved documents formatted as prompt context

use clap::{Args, Parser, Subcommand};
use promptreg::FormatOptions;
use std::path::PathBuf;

/// promptreg - Look up and render named LLM prompt templates
#[derive(Parser, Debug)]
#[command(name = "promptreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Template directory or file (overrides config)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Do not include the built-in templates
    #[arg(long, global = true)]
    pub no_builtin: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered templates
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a template's literal text
    Show {
        /// Template name (file name, e.g. classification.txt)
        name: String,
    },

    /// Print a template with variables substituted
    Render {
        /// Template name
        name: String,

        /// Variable assignment (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Print the template as a system message followed by a user message
    Compose {
        /// Template name
        name: String,

        /// User input that follows the system instruction
        input: String,

        /// Variable assignment (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Retrieved documents to include (JSON array or JSON Lines)
        #[arg(long, value_name = "FILE")]
        docs: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Print retrieved documents formatted as prompt context
    Context {
        /// Document file (JSON array or JSON Lines)
        docs: PathBuf,

        #[command(flatten)]
        format: FormatArgs,
    },
}

/// Options controlling how retrieved documents are formatted
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FormatArgs {
    /// Keep doc_id and chunk_id metadata lines
    #[arg(long)]
    pub with_ids: bool,

    /// Truncate each document body to this many characters
    #[arg(long, value_name = "CHARS")]
    pub max_length: Option<usize>,
}

impl From<FormatArgs> for FormatOptions {
    fn from(args: FormatArgs) -> Self {
        Self {
            with_ids: args.with_ids,
            max_length: args.max_length,
        }
    }
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
