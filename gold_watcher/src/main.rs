use anyhow::Context;
use gold_core::candles::handler::OandaClient;
use gold_core::config::dto::Config;
use gold_core::notifier::handler::PushPlusNotifier;
use gold_core::watcher::dto::WatchPlan;
use gold_core::watcher::handler::Watcher;
use gold_core::watcher::sleeper::TokioSleeper;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    log::info!("Starting gold_watcher...");

    let config = Config::from_env().context("Failed to load configuration")?;

    let source = OandaClient::new(&config).context("Failed to create candle client")?;
    let notifier = PushPlusNotifier::new(&config).context("Failed to create push client")?;

    let watcher = Watcher::new(WatchPlan::from(&config), source, notifier, TokioSleeper);
    watcher.run().await;

    Ok(())
}
