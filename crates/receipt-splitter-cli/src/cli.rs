use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Split multi-page receipt PDFs into single-page files named from their contents.
#[derive(Debug, Parser)]
#[command(name = "receipt-splitter", about, version)]
pub struct Cli {
    /// Configuration file. Default: ./receipt-splitter.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split every page of the input PDFs into its own named file
    Split {
        /// PDF file or directory to scan recursively. Default: input_folder from the config
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Output directory. Default: output_folder from the config, or INPUT/output
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// File name template using {VALUE}, {RECIPIENT} and {BANK}
        #[arg(short, long)]
        template: Option<String>,

        /// Only print the final summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the fields and file name each page would get, without writing
    Inspect {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// File name template using {VALUE}, {RECIPIENT} and {BANK}
        #[arg(short, long)]
        template: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination. Default: ./receipt-splitter.toml
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `inspect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// One JSON object per page
    Json,
}
