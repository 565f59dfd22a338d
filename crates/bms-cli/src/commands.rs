use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use bms_server::{BmsServer, ServerConfig};
use bms_session::{FileSessionSlot, SessionGuard, StaticCredentialVerifier};
use bms_types::Session;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Login(args) => cmd_login(&config, &cli.format, args).await,
        Command::Logout => cmd_logout(&config),
        Command::Status => cmd_status(&config, &cli.format),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn session_guard(config: &ServerConfig) -> SessionGuard {
    SessionGuard::new(
        Arc::new(FileSessionSlot::new(&config.session_dir)),
        Arc::new(StaticCredentialVerifier::new(config.dev_credentials.clone())),
    )
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address: {bind}"))?;
    }
    if args.empty {
        config.seed_demo_data = false;
    }
    println!("{} serving on {}", config.settings.app_name.bold(), config.bind_addr.to_string().cyan());
    BmsServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_login(config: &ServerConfig, format: &OutputFormat, args: LoginArgs) -> anyhow::Result<()> {
    let guard = session_guard(config);
    let session = guard
        .authenticate(&args.email, &args.password)
        .await
        .context("login failed")?;
    match format {
        OutputFormat::Json => print_session_json(&session, false),
        OutputFormat::Text => {
            println!("{} Logged in as {}", "✓".green().bold(), session.principal.identifier.bold());
            println!("  Role: {}", session.principal.role.to_string().cyan());
            println!("  Session: {}", config.session_dir.display());
        }
    }
    Ok(())
}

fn cmd_logout(config: &ServerConfig) -> anyhow::Result<()> {
    session_guard(config).end_session()?;
    println!("{} Logged out.", "✓".green());
    Ok(())
}

fn cmd_status(config: &ServerConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let restored = session_guard(config).restore()?;
    match (format, restored) {
        (OutputFormat::Json, Some(session)) => print_session_json(&session, true),
        (OutputFormat::Json, None) => println!("{}", json!({ "authenticated": false })),
        (OutputFormat::Text, Some(session)) => {
            println!("{} Session remembered ({})", "●".green(), session.principal.role.to_string().cyan());
            println!("  {}", "principal not re-validated on restore".yellow());
        }
        (OutputFormat::Text, None) => println!("{} Not logged in.", "○".dimmed()),
    }
    Ok(())
}

fn print_session_json(session: &Session, restored: bool) {
    println!(
        "{}",
        json!({
            "authenticated": true,
            "restored": restored,
            "principal": session.principal,
            "issued_at": session.issued_at,
        })
    );
}
