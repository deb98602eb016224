use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::debug;

use common::{Alert, Error, Notifier, Result};

/// Delivers alerts to one Telegram chat via the Bot API.
///
/// Delivery failures propagate to the scheduler as recoverable cycle
/// errors — a dropped alert never takes the process down.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token.into()),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_alert(&self, alert: &Alert) -> Result<()> {
        let text = render_alert(alert);
        debug!(chat_id = ?self.chat_id, verdict = %alert.verdict, "Sending Telegram alert");

        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| Error::Notify(e.to_string()))?;

        Ok(())
    }
}

/// Render the multi-line Markdown alert message: header, pair, signal,
/// price, the comma-joined lean labels, and the cycle timestamp.
pub fn render_alert(alert: &Alert) -> String {
    let labels: Vec<&str> = alert.leans.iter().map(|l| l.label).collect();
    format!(
        "📢 *QuorumBot Signal*\n\
         🔹 Pair: `{}`\n\
         🔹 Signal: *{}*\n\
         🔹 Price: {}\n\
         📊 Indicators: {}\n\
         🕐 Time: {}\n",
        alert.symbol,
        alert.verdict,
        alert.price,
        labels.join(", "),
        alert.timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}
