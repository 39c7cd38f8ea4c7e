//! CLI entry point for blog-api

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(version)]
#[command(about = "Serves a Markdown blog as JSON and RSS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    #[command(alias = "s")]
    Server {
        /// Port to listen on (overrides _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List posts or tags
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the RSS feed
    Rss,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_api=debug,tower_http=debug,info"
    } else {
        "blog_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let app = blog_api::BlogApi::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| app.config.ip.clone());
            let port = port.unwrap_or(app.config.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_api::server::start(&app, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let app = blog_api::BlogApi::new(&base_dir)?;
            blog_api::commands::list::run(&app, &r#type)?;
        }

        Commands::Rss => {
            let app = blog_api::BlogApi::new(&base_dir)?;
            println!("{}", app.feed()?.to_xml());
        }

        Commands::New { title } => {
            let app = blog_api::BlogApi::new(&base_dir)?;
            let path = app.new_post(&title)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("blog-api version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
