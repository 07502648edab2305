//! CLI command definitions

use clap::Args;

/// Serve the dashboard
#[derive(Debug, Args, Clone)]
pub struct ServeCommand {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Seed configuration YAML (defaults to the built-in demo pipeline)
    #[arg(short, long)]
    pub file: Option<String>,
}

impl ServeCommand {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Validate a seed configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to seed YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
