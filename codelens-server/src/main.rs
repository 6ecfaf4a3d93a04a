//! Codelens CLI - AI code review service
//!
//! Runs the HTTP service and reads stored review history.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codelens_core::{Config, Language, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{HistoryArgs, ServeArgs, ShowArgs};

/// Codelens: AI code review and test generation
#[derive(Parser, Debug)]
#[command(name = "codelens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Address to listen on (overrides config and env)
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Model to request from the gateway (overrides config and env)
    #[arg(long, global = true)]
    model: Option<String>,

    /// SQLite database file (overrides config and env)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Run the HTTP service
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// List a user's past reviews
    #[command(visible_alias = "h")]
    History(HistoryArgs),

    /// Show one stored review
    Show(ShowArgs),

    /// Show current configuration
    Config {
        /// Write a secrets.toml template (fails if one already exists)
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // Load configuration with overrides
    let config =
        Config::load_with_overrides(cli.bind.clone(), cli.model.clone(), cli.database.clone())?;

    if cli.verbose {
        tracing::info!(
            bind = %config.server.bind,
            model = %config.gateway.model,
            database = %config.database.path.display(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("codelens {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::History(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Show(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            print_config(&config, init_secrets)?;
        }
        None => {
            println!("Codelens - AI code review and test generation");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config, init_secrets: bool) -> anyhow::Result<()> {
    println!("Codelens Configuration");
    println!("======================");
    println!();
    println!("Server:");
    println!("  bind: {}", config.server.bind);
    match config.server.max_body_bytes {
        Some(limit) => println!("  max_body_bytes: {}", limit),
        None => println!("  max_body_bytes: (unlimited)"),
    }
    println!();
    println!("Gateway:");
    println!("  url: {}", config.gateway.completions_url());
    println!("  model: {}", config.gateway.model);
    println!("  timeout: {:?}", config.gateway.timeout);
    println!("  max_retries: {}", config.gateway.max_retries);
    println!();
    let languages: Vec<_> = Language::ALL.iter().map(Language::label).collect();
    println!("Languages: {}", languages.join(", "));
    println!();
    println!("Database:");
    println!("  path: {}", config.database.path.display());
    println!("  max_connections: {}", config.database.max_connections);
    println!();

    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    if init_secrets {
        let path = Secrets::create_template()?;
        println!("Secrets template: {}", path.display());
    }

    let key_state = match Secrets::load()?.gateway_api_key() {
        Some(_) => "configured",
        None => "not configured",
    };
    println!("Gateway API key: {}", key_state);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_are_flags_only() {
        // CODELENS_* variables are applied by Config::with_env_overrides
        let command = Cli::command();
        for name in ["bind", "model", "database"] {
            let arg = command
                .get_arguments()
                .find(|a| a.get_id() == name)
                .unwrap();
            assert!(arg.get_env().is_none(), "{} should not read env", name);
        }
    }

    #[test]
    fn test_history_args() {
        let cli = Cli::try_parse_from(["codelens", "--model", "m", "history", "--user", "u1"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("m"));
        assert!(cli.bind.is_none());
        assert!(matches!(cli.command, Some(Commands::History(_))));
    }
}
