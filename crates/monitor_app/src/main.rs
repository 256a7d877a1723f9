mod config;
mod logging;

use std::process::ExitCode;

use chrono::Utc;
use monitor_core::RenderSettings;
use monitor_engine::{
    run_once, FetchSettings, JsonFileStore, PageFetcher, PatternExtractor, RetryPolicy,
    TelegramNotifier, TelegramSettings,
};
use monitor_logging::{monitor_error, monitor_info};

use crate::config::Config;

fn main() -> ExitCode {
    // A .env file is optional; deployments usually set the environment
    // through the scheduler instead.
    let _ = dotenvy::dotenv();
    logging::initialize(logging::LogDestination::Terminal);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            monitor_error!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let extractor = match PatternExtractor::new(&config.id_pattern, &config.count_pattern) {
        Ok(extractor) => extractor,
        Err(err) => {
            monitor_error!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = PageFetcher::new(FetchSettings::default(), RetryPolicy::default());
    let store = JsonFileStore::new(&config.state_path);
    let notifier = TelegramNotifier::new(TelegramSettings::new(&config.bot_token, &config.chat_id));
    let render = RenderSettings {
        listing_url_base: config.listing_url_base.clone(),
        update_header: config.update_header.clone(),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            monitor_error!("Failed to start runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    monitor_info!("Checking {}", config.search_url);
    let observed_at_epoch = Utc::now().timestamp();
    let result = runtime.block_on(run_once(
        config.search_url.as_str(),
        observed_at_epoch,
        &fetcher,
        &extractor,
        &store,
        &notifier,
        &render,
    ));

    match result {
        Ok(outcome) => {
            monitor_info!(
                "Run complete: baseline={}, notified={}, added={}, removed={}",
                outcome.baseline,
                outcome.notified,
                outcome.added,
                outcome.removed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            monitor_error!("Run failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
