use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bms",
    about = "Onboard Bulk Mail admin back-office",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the back-office HTTP server
    Serve(ServeArgs),
    /// Log in as admin and remember the session
    Login(LoginArgs),
    /// End the remembered session
    Logout,
    /// Show whether a session is remembered
    Status,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<String>,
    /// Start with empty collections instead of the demo catalog
    #[arg(long)]
    pub empty: bool,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long)]
    pub password: String,
}
