use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use engine::{BinanceClient, Scheduler, SchedulerConfig};
use signal::{SignalAggregator, SignalConfig};
use telegram_alert::TelegramNotifier;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(symbol = %cfg.symbol, timeframe = %cfg.timeframe, "QuorumBot starting");

    // ── Wiring ────────────────────────────────────────────────────────────────
    let source = Arc::new(BinanceClient::new());
    let notifier = Arc::new(TelegramNotifier::new(
        cfg.telegram_token.clone(),
        cfg.telegram_chat_id,
    ));
    let aggregator = SignalAggregator::new(SignalConfig {
        rsi_buy: cfg.rsi_buy,
        rsi_sell: cfg.rsi_sell,
        ..SignalConfig::default()
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        SchedulerConfig {
            symbol: cfg.symbol.clone(),
            timeframe: cfg.timeframe.clone(),
            candle_limit: cfg.candle_limit,
            cycle_interval: Duration::from_secs(cfg.cycle_interval_secs),
            error_cooldown: Duration::from_secs(cfg.error_cooldown_secs),
        },
        source,
        aggregator,
        notifier,
        shutdown_rx,
    );

    // ── Run ───────────────────────────────────────────────────────────────────
    let handle = tokio::spawn(scheduler.run());

    info!("Scheduler started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl-c");
    info!("Shutdown signal received. Stopping scheduler.");

    let _ = shutdown_tx.send(true);
    let _ = handle.await;
}
