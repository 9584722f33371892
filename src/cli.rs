use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::defaults::Defaults;

/// YouTube script cloner: analyze a script's style, then write new ones in it
#[derive(Parser, Debug)]
#[command(version, about = "YouTube script analyzer and style cloner")]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the Gemini API
    #[arg(long, env = "GEMINI_API_BASE", default_value = Defaults::API_BASE, global = true)]
    pub api_base: String,

    /// Model used for both analysis and generation
    #[arg(long, default_value = Defaults::MODEL, global = true)]
    pub model: String,

    /// Override the model used for analysis
    #[arg(long, global = true)]
    pub analysis_model: Option<String>,

    /// Override the model used for generation
    #[arg(long, global = true)]
    pub generation_model: Option<String>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Where to write the log (the TUI owns the terminal)
    #[arg(long, env = "SCRIPT_CLONER_LOG", default_value = Defaults::LOG_FILE, global = true)]
    pub log_file: PathBuf,

    /// Without a subcommand the interactive TUI starts
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one script and print the analysis as JSON
    Analyze {
        /// Script file to analyze ("-" reads stdin)
        #[arg(long)]
        file: PathBuf,

        /// Optional path to write the JSON output (pretty-printed)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a new script from a saved analysis
    Generate {
        /// Analysis JSON produced by `analyze`
        #[arg(long)]
        analysis: PathBuf,

        /// Topic for the new script
        #[arg(long)]
        topic: String,

        /// Optional path to write the script
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
