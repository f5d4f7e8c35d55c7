pub mod telegram;

use std::collections::HashSet;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::aggregator::Aggregator;
use crate::domain::NewsItem;
use crate::errors::SvodkaResult;

pub use telegram::{Messenger, TelegramClient};

const GREETING: &str = "🔍 Собираю свежие новости, подождите немного...\n\n📌 По возникшим вопросам обращаться: @Blackfox3007";
const NO_NEWS: &str = "❗️ Новостей за последние сутки не найдено.";
/// Pause before retrying after a failed `getUpdates` call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polling bot: on `/start` or `/news` it runs a full aggregation pass
/// and sends each surviving item as its own message.
pub struct NewsBot<C: Messenger> {
    client: C,
    aggregator: Aggregator,
}

impl<C: Messenger> NewsBot<C> {
    pub fn new(client: C, aggregator: Aggregator) -> Self {
        Self { client, aggregator }
    }

    pub async fn run(&self) -> SvodkaResult<()> {
        info!("bot started, waiting for commands");
        let mut offset: Option<i64> = None;

        loop {
            let updates = match self.client.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, retrying");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);

                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text.as_deref() else {
                    continue;
                };

                match text.trim() {
                    "/start" | "/news" => {
                        if let Err(e) = self.deliver(message.chat.id).await {
                            error!(chat_id = message.chat.id, error = %e, "delivery failed");
                        }
                    }
                    other => {
                        info!(chat_id = message.chat.id, command = other, "ignored message");
                    }
                }
            }
        }
    }

    /// One full collect-and-send pass into a single chat.
    pub async fn deliver(&self, chat_id: i64) -> SvodkaResult<()> {
        self.client.send_message(chat_id, GREETING).await?;

        let items = self.aggregator.collect_all().await;
        if items.is_empty() {
            self.client.send_message(chat_id, NO_NEWS).await?;
            return Ok(());
        }

        // Belt-and-braces repeat guard at the delivery boundary.
        let mut seen_links = HashSet::new();
        for item in &items {
            if !seen_links.insert(item.link.as_str()) {
                continue;
            }
            self.client
                .send_message(chat_id, &format_item(item))
                .await?;
        }

        info!(chat_id, count = seen_links.len(), "news delivered");
        Ok(())
    }
}

fn format_item(item: &NewsItem) -> String {
    format!(
        "<b>📢 Заголовок:</b> {}\n<b>🔗 Ссылка:</b> {}\n<b>📅 Дата:</b> {}\n{}",
        item.title,
        item.link,
        item.date,
        "-".repeat(72)
    )
}
