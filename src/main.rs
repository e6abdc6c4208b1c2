use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lectern::book::{demo_book, load_book};
use lectern::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a book JSON file. Without one the bundled demo book opens.
    book: Option<PathBuf>,

    /// Base URL of the book platform, overriding the configured one
    #[arg(long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectern=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    let book = match &cli.book {
        Some(path) => load_book(path)?,
        None => demo_book(),
    };

    let mut app = App::new(config, book)?;
    app.run().await?;

    Ok(())
}
