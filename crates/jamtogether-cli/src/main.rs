mod browse;
mod clipboard;
mod render;
mod search;

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jamtogether_client::JamClient;
use jamtogether_core::{load_catalog, AppConfig, Catalog};

#[derive(Debug, Parser)]
#[command(name = "jamtogether")]
#[command(about = "잼투게더: find open rehearsal rooms around Hongdae")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the built-in studio catalog grouped by region
    Studios,
    /// Fetch the live studio listing and show it as map markers
    Browse {
        /// Print markers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search for rooms with an open slot
    Search(SearchArgs),
    /// Show frequently asked questions
    Faq,
}

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Date to search (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub(crate) date: Option<NaiveDate>,
    /// Earliest start hour (0-24)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=24))]
    pub(crate) start: Option<u8>,
    /// Latest end hour (0-24)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=24))]
    pub(crate) end: Option<u8>,
    /// Minimum contiguous hours (1-6)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub(crate) min_hours: Option<u8>,
    /// Studio to include; repeatable. With no --studio or --region every
    /// grouped studio is searched
    #[arg(long = "studio")]
    pub(crate) studios: Vec<String>,
    /// Region whose studios to include; repeatable
    #[arg(long = "region")]
    pub(crate) regions: Vec<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Copy the share text of the N-th result (1-based) to the clipboard
    #[arg(long, value_name = "N")]
    pub(crate) copy: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = jamtogether_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(config = ?config, "configuration loaded");

    let catalog = load_configured_catalog(&config)?;

    match command {
        Commands::Studios => render::print_catalog(&catalog),
        Commands::Faq => render::print_faq(),
        Commands::Browse { json } => {
            let client = build_client(&config)?;
            browse::run_browse(&client, &config, catalog, json).await?;
        }
        Commands::Search(args) => {
            let client = build_client(&config)?;
            search::run_search(&client, &config, catalog, &args).await?;
        }
    }

    Ok(())
}

fn load_configured_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin()?,
    };
    tracing::debug!(
        regions = catalog.regions().len(),
        studios = catalog.studios().len(),
        rooms = catalog.room_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn build_client(config: &AppConfig) -> anyhow::Result<JamClient> {
    JamClient::new(&config.backend_url, &config.user_agent).map_err(|e| {
        anyhow::anyhow!(
            "failed to build backend client for {}: {e}",
            config.backend_url_redacted()
        )
    })
}
