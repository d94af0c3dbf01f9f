use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    load_settings, normalize_base_url,
    presenter::{render_card_text, render_message_text},
    RecommendClient, RecommendationApi, SearchShell, SearchView,
};
use tracing_subscriber::EnvFilter;

/// Ask the Uncover recommendation service about a skin or hair concern.
#[derive(Parser, Debug)]
#[command(name = "uncover")]
struct Args {
    /// Free-text concern, e.g. "dry scalp".
    query: Vec<String>,
    /// Backend base URL; overrides config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Path to a TOML config file (defaults to ./uncover.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only check that the backend is reachable.
    #[arg(long)]
    check: bool,
    /// Print the search outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        settings.base_url = normalize_base_url(base_url)?;
    }
    let client = RecommendClient::from_settings(&settings)?;
    tracing::debug!(base_url = client.base_url(), "using recommendation backend");

    if args.check {
        let health = client.health().await?;
        println!("{}: {}", client.base_url(), health.message);
        return Ok(());
    }

    let mut shell = SearchShell::new();
    shell.set_query(args.query.join(" "));
    if !shell.submit(&client).await {
        bail!("tell us about your skin/hair concern, e.g. `uncover dry scalp`");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shell.outcome())?);
    } else {
        println!("{}", render_view(&shell.view()));
    }
    Ok(())
}

fn render_view(view: &SearchView<'_>) -> String {
    match view {
        SearchView::Results { card, message } => {
            let mut sections = Vec::new();
            if let Some(card) = card {
                sections.push(render_card_text(card));
            }
            if let Some(message) = message {
                sections.push(render_message_text(message));
            }
            sections.join("\n\n")
        }
        SearchView::Loading => "Searching...".to_string(),
        SearchView::Empty => "No recommendation was returned.".to_string(),
    }
}
