//! CLI interface for the role matcher

use crate::config::OutputFormat;
use crate::processing::roles::RoleCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "role-matcher")]
#[command(about = "Match healthcare and customer service resumes against fixed role profiles")]
#[command(long_about = "Score resumes against Customer Service, Medical Assistant, NP and RN profiles, explain each score and rank candidates per role")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze resumes against every role and pick the best candidate per role
    Analyze {
        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Candidate name, overrides detection when a single file is given
        #[arg(short, long)]
        name: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include matched keywords and full rankings
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank resumes for a single role
    Rank {
        /// Role: "Customer Service", "Medical Assistants", "NPs", "RNs" or cs, ma, np, rn
        #[arg(short, long, value_parser = parse_role)]
        role: RoleCategory,

        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,
    },

    /// List role profiles with their weights and keywords
    Roles {
        /// Show only this role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<RoleCategory>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

pub fn parse_role(role: &str) -> Result<RoleCategory, String> {
    role.parse()
}
