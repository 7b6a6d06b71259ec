//! BlackWall - Main Entry Point

use anyhow::Context;

use blackwall_core::constants::{APP_NAME, APP_VERSION};
use blackwall_core::logic::config::PipelineConfig;
use blackwall_core::logic::pipeline;

fn main() -> anyhow::Result<()> {
    // Load .env before the logger so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let mut config = PipelineConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [train, test, ..] = args.as_slice() {
        config = config.with_paths(train, test);
    }

    log::info!("Train: {}", config.train_path.display());
    log::info!("Test: {}", config.test_path.display());

    let report = pipeline::run(&config).context("data preparation pipeline failed")?;

    match &config.report_path {
        Some(path) => report
            .write_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{}", report.to_json()?),
    }

    log::info!("Run {} complete", report.run_id);
    Ok(())
}
