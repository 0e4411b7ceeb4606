use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devfeed_core::ContactForm;
use feed_logging::LogDestination;

mod app;
mod command;
mod config;
mod effects;
mod render;
mod serve;

#[derive(Parser)]
#[command(name = "devfeed", version, about = "Read dev.to from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive feed browser (default)
    Browse,
    /// Run the contact relay HTTP endpoint
    Serve {
        /// Listen address; overrides DEVFEED_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Validate and relay one contact message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = feed_logging::parse_level(&cli.log_level);
    let config = config::AppConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            // stdout belongs to the front end.
            feed_logging::initialize(LogDestination::File, level);
            app::run_browse(&config)
        }
        Commands::Serve { bind } => {
            feed_logging::initialize(LogDestination::Terminal, level);
            let bind = bind.unwrap_or(config.bind);
            runtime()?.block_on(serve::serve(&config, bind))
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            feed_logging::initialize(LogDestination::Terminal, level);
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            runtime()?.block_on(serve::send_once(&config, form))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to build tokio runtime")
}
