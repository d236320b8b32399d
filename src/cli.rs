use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Identity used when neither --user nor $USER is available
pub const ANONYMOUS: &str = "anonymous";

#[derive(Parser, Debug, Clone)]
#[command(name = "chemviz-report")]
#[command(about = "Render ChemViz equipment analysis reports as PDF")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Directory the PDF is written to
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Config file (TOML). Falls back to $CHEMVIZ_REPORT_CONFIG, then the user config dir
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON instead of a status line
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Multi-section analysis report from an upload summary and its history
    Detailed {
        /// JSON payload: {"results": {...}, "history": [...], "username": "..."}
        #[arg(long, short = 'i', value_name = "PATH")]
        input: PathBuf,

        /// Requesting identity; used as preparer when the payload names none
        #[arg(long, value_name = "NAME")]
        user: Option<String>,
    },
    /// Single-page report from the most recent upload
    Quick {
        /// JSON array of history records, newest first
        #[arg(long, value_name = "PATH")]
        history: PathBuf,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        let input = self.input_path();
        if !input.is_file() {
            return Err(format!("Input file not found: {}", input.display()));
        }

        if self.out_dir.exists() && !self.out_dir.is_dir() {
            return Err(format!("--out-dir is not a directory: {}", self.out_dir.display()));
        }

        if let Command::Detailed { user: Some(user), .. } = &self.command
            && user.trim().is_empty()
        {
            return Err("--user must not be blank".to_string());
        }

        Ok(())
    }

    /// The JSON file this command reads
    pub fn input_path(&self) -> &Path {
        match &self.command {
            Command::Detailed { input, .. } => input,
            Command::Quick { history } => history,
        }
    }

    /// Who is asking for the report: --user, then $USER, then "anonymous"
    pub fn requester(&self) -> String {
        let explicit = match &self.command {
            Command::Detailed { user, .. } => user.clone(),
            Command::Quick { .. } => None,
        };
        explicit
            .or_else(|| std::env::var("USER").ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}
