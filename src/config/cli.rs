use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pcasp-credores")]
#[command(about = "Validates creditor balances between PCASP control groups 7 and 8")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the local web UI (default)
    Serve(ServeArgs),
    /// Validate a CSV file and write the Excel result to disk
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Trial-balance CSV exported from the accounting system
    #[arg(short, long)]
    pub input: String,

    /// Directory where the workbook is written
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Workbook file name (defaults to the configured one)
    #[arg(long)]
    pub file_name: Option<String>,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }

    /// Loads the TOML file when given, then applies command-line overrides.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        match &self.command {
            Some(Command::Serve(args)) => {
                if let Some(host) = &args.host {
                    config.server.host = host.clone();
                }
                if let Some(port) = args.port {
                    config.server.port = port;
                }
            }
            Some(Command::Validate(args)) => {
                if let Some(file_name) = &args.file_name {
                    config.output.file_name = file_name.clone();
                }
            }
            None => {}
        }

        Ok(config)
    }
}
