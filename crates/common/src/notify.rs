use async_trait::async_trait;

use crate::{Alert, Result};

/// Abstraction over the outbound alert channel.
///
/// Implementations format and deliver the alert. Delivery failures must
/// propagate — the scheduler logs them and retries the whole cycle
/// after the cooldown; a lost alert is never fatal to the process.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_alert(&self, alert: &Alert) -> Result<()>;
}
