use crate::config::toml_config::IntakeConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "candidate-intake")]
#[command(about = "Validates and formats candidate intake form data")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log events as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check a CPF and print it formatted
    Cpf { value: String },

    /// Check a CEP, optionally resolving its address
    Cep {
        value: String,

        #[arg(long)]
        lookup: bool,
    },

    /// Check an email address
    Email { value: String },

    /// Check a birth date against the minimum age
    BirthDate { value: String },

    /// Check a video link and describe its preview
    Video { url: String },

    /// Validate the CPF + birth date login
    Login {
        #[arg(long)]
        cpf: String,

        #[arg(long)]
        birth_date: String,
    },

    /// Validate a whole form exported as JSON or TOML
    Form { path: PathBuf },
}

impl CliConfig {
    /// The configuration file named on the command line, or the defaults.
    pub fn load_config(&self) -> Result<IntakeConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                IntakeConfig::from_file(path)
            }
            None => Ok(IntakeConfig::default()),
        }
    }
}
