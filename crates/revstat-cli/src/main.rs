use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod input;
mod output;
mod run;

use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "revstat-cli")]
#[command(about = "Collect customer-review statistics for a list of ASINs")]
struct Cli {
    /// JSON array of ASINs (inline) or the path to a file containing one.
    asins: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = revstat_core::load_app_config().context("failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .context("invalid REVSTAT_LOG_LEVEL")?,
        )
        .init();

    let asins = input::parse_asin_list(&cli.asins)?;
    tracing::info!(count = asins.len(), "starting review-statistics run");

    let api = revstat_paapi::PaapiClient::with_endpoint(
        &config.paapi_access_key_id,
        &config.paapi_secret_key,
        config.paapi_associate_tag.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        config.max_attempts,
        config.retry_delay_secs,
        &config.paapi_endpoint,
    )
    .map_err(|e| anyhow::anyhow!("failed to build product API client: {e}"))?;

    let pages = revstat_scraper::ReviewPageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_attempts,
        config.retry_delay_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build review-page client: {e}"))?;

    let records = run::collect_reviews(&asins, &api, &pages, &config).await;
    tracing::info!(
        records = records.len(),
        input = asins.len(),
        "run complete"
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            output::write_records(&records, cli.format, file)?;
        }
        None => output::write_records(&records, cli.format, io::stdout().lock())?,
    }

    Ok(())
}
