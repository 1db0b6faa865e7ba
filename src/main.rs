use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use outage_schedule::{
    api::PageClient,
    chrono_util::SystemClock,
    config::Config,
    pipeline::{ExtractedPage, Pipeline, RunOutcome},
    store::JsonFileStore,
};

#[derive(Parser)]
struct Opts {
    /// TOML configuration; the built-in defaults are used when omitted.
    config_path: Option<PathBuf>,
    /// Read the page from this file instead of downloading it.
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// Overrides `output_path` of the configuration.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Compare with the previous document, but never write.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    if let Err(e) = run(&opts).await {
        error!("The run failed: {e:?}");
        std::process::exit(1);
    }
}

async fn run(opts: &Opts) -> anyhow::Result<()> {
    let mut config = Config::load(opts.config_path.as_deref())?;
    if let Some(output) = &opts.output {
        config.output_path = output.clone();
    }
    info!("Starting the outage schedule parser for {}", config.region_id);

    let html = match &opts.html_file {
        Some(path) => {
            info!("Reading the page from {path:?}");
            fs_err::read_to_string(path)?
        }
        None => PageClient::new(&config)?.fetch_html().await?,
    };
    let page = ExtractedPage::parse(&html, &config);

    let pipeline = Pipeline::new(
        &config,
        SystemClock::new(config.time_zone),
        JsonFileStore::new(&config.output_path),
    );
    match pipeline.run(page, opts.dry_run)? {
        RunOutcome::Written => info!("The document was updated"),
        RunOutcome::Unchanged => info!("Data did not change; nothing was written"),
        RunOutcome::DryRun => info!("Data changed, but this is a dry run; nothing was written"),
        RunOutcome::NoUsableData(reason) => warn!("No usable data ({reason}); nothing was written"),
    }
    Ok(())
}
