mod config;
mod error;
mod homework_api;
mod poll_loop;
mod telegram;

use anyhow::Result;
use config::BotConfig;
use homework_api::HomeworkApi;
use poll_loop::PollLoop;
use std::time::{SystemTime, UNIX_EPOCH};
use telegram::TelegramNotifier;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    // 足りなければここで終了（ポーリングは 1 回もしない）
    let config = BotConfig::from_env()?;
    info!("config = {:?}", config.redacted());

    let client = reqwest::Client::new();
    let api = HomeworkApi::from_config(client.clone(), &config);
    let notifier = TelegramNotifier::from_config(client, &config);

    let timestamp =
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64;

    info!("Starting homework status bot… (from_date = {timestamp})");

    let mut poll = PollLoop::new(api, notifier, config.dedup_mode, timestamp);
    poll.run().await;

    Ok(())
}
