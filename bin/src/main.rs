//! haverview CLI - Command-line access to the Haver Analytics Haver View API.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "haverview")]
#[command(about = "Query the Haver Analytics Haver View API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Haver API key
    #[arg(long, env = "HAVER_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the databases available to your key
    Databases,

    /// Show the first series record of a database
    Info {
        /// Database name (e.g., USECON)
        database: String,
    },

    /// List the series in a database
    Series {
        /// Database name
        database: String,

        /// Fetch a single page starting at this name
        #[arg(short, long)]
        like: Option<String>,

        /// Output the full series records instead of names
        #[arg(long)]
        full: bool,

        /// Output format for full records
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Search series by keyword
    Search {
        /// Search text
        query: String,
    },

    /// Show the recession table
    Recessions {
        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Read series into one table
    Read {
        /// Series codes (e.g., N997CE@EUDATA)
        #[arg(required = true)]
        codes: Vec<String>,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Check the API key and connectivity
    Status,
}

/// Maps the `-v` count onto a log level.
const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let haver = commands::connect(cli.api_key).await?;

    match command {
        Commands::Databases => commands::catalog::databases(&haver).await,
        Commands::Info { database } => commands::catalog::info(&haver, &database).await,
        Commands::Series {
            database,
            like,
            full,
            format,
        } => commands::series::series(&haver, &database, like.as_deref(), full, format).await,
        Commands::Search { query } => commands::catalog::search(&haver, &query).await,
        Commands::Recessions { output, format } => {
            commands::catalog::recessions(&haver, output, format).await
        }
        Commands::Read {
            codes,
            output,
            format,
        } => commands::read::read(&haver, &codes, output, format).await,
        Commands::Status => commands::status::status(&haver).await,
    }
}
