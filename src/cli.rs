use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use nowplaying::clients::errors::{Error, Result};
use nowplaying::{now_playing, server};
use tokio::net::TcpListener;

use crate::config::ConfigBuilder;

#[derive(Parser)]
#[command(name = "nowplaying")]
#[command(version, about = "Serve the currently playing Last.fm track as JSON", long_about = None)]
struct Cli {
    /// Last.fm username, overrides LASTFM_USERNAME
    #[arg(long, global = true)]
    user: Option<String>,

    /// Last.fm API root, overrides LASTFM_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Last.fm request timeout in seconds, overrides LASTFM_TIMEOUT_SECS
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the current track once and exit
    Current {
        /// Page of the recent tracks history to read
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(user) = cli.user {
        builder = builder.username(user);
    }
    if let Some(api_url) = cli.api_url {
        builder = builder.api_url(api_url);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                builder = builder.port(port);
            }
            serve(builder).await
        }
        Commands::Current { page } => print_current(builder, page).await,
    }
}

async fn serve(builder: ConfigBuilder) -> Result<()> {
    info!("Building config ...");
    let config = builder.build()?;
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    server::serve(listener, Arc::new(config.lastfm)).await?;
    Ok(())
}

async fn print_current(builder: ConfigBuilder, page: u32) -> Result<()> {
    let config = builder.build()?;
    match now_playing::fetch_current_track(&config.lastfm, page.max(1)).await? {
        Some(details) => {
            println!("{}", serde_json::to_string_pretty(&details)?);
            Ok(())
        }
        None => Err(Error::NoRecentTracks(config.lastfm.username().to_string())),
    }
}
