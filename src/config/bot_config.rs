use crate::config::{DedupMode, Redacted, env_parsing};
use anyhow::{Context, Result, bail};
use tracing::{debug, error};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// 起動前にそろっていないといけない環境変数
pub const REQUIRED_TOKENS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Clone, Debug)]
pub struct BotConfig {
    // --- 必須 ---
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,

    // --- 任意（デフォルトあり）---
    pub endpoint: Url,
    pub telegram_api_url: String, // 例: https://api.telegram.org

    pub dedup_mode: DedupMode,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(env_parsing::opt)
    }

    /// 値の取り出し元を差し替えられる版（テスト用にプロセス環境を触らずに済む）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        check_tokens(&lookup)?;

        // check_tokens を通ったので必ずある
        let must = |key: &str| lookup(key).with_context(|| format!("missing required env: {key}"));
        let practicum_token = must("PRACTICUM_TOKEN")?;
        let telegram_token = must("TELEGRAM_TOKEN")?;
        let telegram_chat_id = must("TELEGRAM_CHAT_ID")?;

        let endpoint = lookup("ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        let endpoint =
            Url::parse(&endpoint).with_context(|| format!("invalid ENDPOINT: {endpoint}"))?;

        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .map(|s| env_parsing::trim_base_url(&s))
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into());

        let dedup_mode: DedupMode = env_parsing::parse_str(&lookup, "DEDUP_MODE", "contains")?;

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            telegram_api_url,
            dedup_mode,
        })
    }

    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// 足りないトークンを 1 行ずつログに出し、1 つでも欠けていればエラー
fn check_tokens(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    let missing: Vec<&str> =
        REQUIRED_TOKENS.iter().copied().filter(|&key| lookup(key).is_none()).collect();

    for key in &missing {
        error!("Нет токена {key}");
    }

    if !missing.is_empty() {
        error!("CRITICAL: Приостанавливаем программу");
        bail!("Ошибка. Отсутствуют переменные окружения: {}", missing.join(", "));
    }

    debug!("Успешно. Все необходимые токены получены");
    Ok(())
}
