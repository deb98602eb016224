use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use common::{Alert, CandleSource, Error, Notifier, Result, Verdict};
use indicators::snapshot;
use signal::SignalAggregator;

/// Cadence and market parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub symbol: String,
    pub timeframe: String,
    pub candle_limit: u32,
    /// Sleep after a successful cycle.
    pub cycle_interval: Duration,
    /// Shorter sleep after a failed cycle before retrying.
    pub error_cooldown: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC/USDT".to_string(),
            timeframe: "1m".to_string(),
            candle_limit: 100,
            cycle_interval: Duration::from_secs(60),
            error_cooldown: Duration::from_secs(30),
        }
    }
}

/// Drives fetch → indicators → vote → alert on a fixed cadence.
///
/// This is the only place where cycle errors are caught. Inner
/// components return values or errors and never retry on their own; a
/// failed cycle is logged, followed by the cooldown sleep, and the loop
/// carries on. There is no retry budget — persistent outages mean
/// indefinite retry at the cooldown cadence.
pub struct Scheduler {
    config: SchedulerConfig,
    source: Arc<dyn CandleSource>,
    aggregator: SignalAggregator,
    notifier: Arc<dyn Notifier>,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        source: Arc<dyn CandleSource>,
        aggregator: SignalAggregator,
        notifier: Arc<dyn Notifier>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            source,
            aggregator,
            notifier,
            shutdown,
        }
    }

    /// Run until the shutdown flag flips. Call from `tokio::spawn`.
    pub async fn run(mut self) {
        info!(
            symbol = %self.config.symbol,
            timeframe = %self.config.timeframe,
            "Scheduler running"
        );

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            let delay = match self.cycle().await {
                Ok(verdict) => {
                    debug!(verdict = %verdict, "Cycle complete");
                    self.config.cycle_interval
                }
                Err(e) => {
                    warn!(error = %e, "Cycle failed — retrying after cooldown");
                    self.config.error_cooldown
                }
            };

            // Shutdown is observed during the sleep as well as at the
            // cycle boundary.
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.shutdown.changed() => {}
            }
        }

        info!("Scheduler stopped");
    }

    /// One fetch → snapshot → decide → notify pass. All cycle-scoped
    /// data is owned by this call and dropped when it returns.
    async fn cycle(&self) -> Result<Verdict> {
        let candles = self
            .source
            .fetch_candles(
                &self.config.symbol,
                &self.config.timeframe,
                self.config.candle_limit,
            )
            .await?;

        let snapshot = snapshot::compute(&candles)
            .ok_or_else(|| Error::Market("empty candle window".to_string()))?;

        let decision = self.aggregator.decide(&snapshot);
        if decision.verdict == Verdict::None {
            return Ok(Verdict::None);
        }

        let alert = Alert {
            symbol: self.config.symbol.clone(),
            verdict: decision.verdict,
            price: snapshot.close,
            leans: decision.leans,
            timestamp: chrono::Utc::now(),
        };

        info!(
            verdict = %alert.verdict,
            price = alert.price,
            "Vote threshold reached — dispatching alert"
        );
        self.notifier.send_alert(&alert).await?;

        Ok(alert.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use tokio::time::Instant;

    use common::Candle;
    use signal::SignalConfig;

    struct ScriptedSource {
        fail: bool,
        closes: Vec<f64>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedSource {
        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                closes: Vec::new(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn with_closes(closes: Vec<f64>) -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                closes,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CandleSource for ScriptedSource {
        async fn fetch_candles(
            &self,
            _symbol: &str,
            _timeframe: &str,
            _limit: u32,
        ) -> common::Result<Vec<Candle>> {
            self.calls.lock().unwrap().push(Instant::now());
            if self.fail {
                return Err(Error::Http("connection refused".to_string()));
            }
            Ok(self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Candle {
                    timestamp: Utc.timestamp_opt(60 * i as i64, 0).single().unwrap(),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1.0,
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<Alert>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_alert(&self, alert: &Alert) -> common::Result<()> {
            self.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    fn test_config() -> SchedulerConfig {
        SchedulerConfig::default()
    }

    async fn wait_for_calls(source: &ScriptedSource, n: usize) {
        while source.call_count() < n {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Flat history: one lone RSI Sell lean, far from the vote
    /// threshold, so every cycle ends in NONE.
    fn neutral_closes() -> Vec<f64> {
        vec![100.0; 100]
    }

    /// Flat history ending in a single sharp drop: RSI pins to 0 and
    /// the close breaches the lower Bollinger band — two Buy leans.
    fn crash_closes() -> Vec<f64> {
        let mut closes = vec![100.0; 99];
        closes.push(50.0);
        closes
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_errors_do_not_kill_the_loop() {
        let source = ScriptedSource::failing();
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = Scheduler::new(
            test_config(),
            source.clone(),
            SignalAggregator::new(SignalConfig::default()),
            notifier.clone(),
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 4).await;
        assert!(source.call_count() >= 4, "loop died after a fetch error");
        assert!(notifier.alerts.lock().unwrap().is_empty());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycles_use_the_shorter_cooldown_delay() {
        let source = ScriptedSource::failing();
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let config = test_config();
        let cooldown = config.error_cooldown;
        let interval = config.cycle_interval;
        let scheduler = Scheduler::new(
            config,
            source.clone(),
            SignalAggregator::new(SignalConfig::default()),
            notifier,
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 3).await;
        let calls = source.calls.lock().unwrap().clone();
        for pair in calls.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(
                gap >= cooldown && gap < interval,
                "expected cooldown-length gap, got {gap:?}"
            );
        }

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn successful_cycles_use_the_full_interval() {
        let source = ScriptedSource::with_closes(neutral_closes());
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let config = test_config();
        let interval = config.cycle_interval;
        let scheduler = Scheduler::new(
            config,
            source.clone(),
            SignalAggregator::new(SignalConfig::default()),
            notifier,
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 3).await;
        let calls = source.calls.lock().unwrap().clone();
        for pair in calls.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= interval, "expected full-interval gap, got {gap:?}");
        }

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn no_alert_is_dispatched_when_the_vote_falls_short() {
        let source = ScriptedSource::with_closes(neutral_closes());
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = Scheduler::new(
            test_config(),
            source.clone(),
            SignalAggregator::new(SignalConfig::default()),
            notifier.clone(),
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 3).await;
        assert!(notifier.alerts.lock().unwrap().is_empty());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn alert_is_dispatched_when_the_vote_threshold_is_met() {
        let source = ScriptedSource::with_closes(crash_closes());
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Two of the four indicators lean Buy on a crash candle; lower
        // the vote requirement so the dispatch path fires.
        let scheduler = Scheduler::new(
            test_config(),
            source.clone(),
            SignalAggregator::new(SignalConfig {
                votes_required: 2,
                ..SignalConfig::default()
            }),
            notifier.clone(),
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 1).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        let alerts = notifier.alerts.lock().unwrap();
        assert!(!alerts.is_empty(), "expected at least one alert");
        let alert = &alerts[0];
        assert_eq!(alert.verdict, Verdict::Buy);
        assert_eq!(alert.price, 50.0);
        assert_eq!(alert.symbol, "BTC/USDT");
        let labels: Vec<&str> = alert.leans.iter().map(|l| l.label).collect();
        assert!(labels.contains(&"RSI Buy"));
        assert!(labels.contains(&"BB Buy"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_observed_during_the_sleep() {
        let source = ScriptedSource::with_closes(neutral_closes());
        let notifier = Arc::new(RecordingNotifier::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler = Scheduler::new(
            test_config(),
            source.clone(),
            SignalAggregator::new(SignalConfig::default()),
            notifier,
            shutdown_rx,
        );
        let handle = tokio::spawn(scheduler.run());

        wait_for_calls(&source, 1).await;
        shutdown_tx.send(true).unwrap();
        // The loop must exit from inside the interval sleep, well before
        // the next cycle would start.
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler did not stop promptly")
            .unwrap();
    }
}
