use anyhow::{Result, anyhow};
use std::{env, fmt::Display, str::FromStr};

/// 空文字は未設定扱い
pub fn opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// `lookup` から値を取り出し、なければ `default` をパースする
pub fn parse_str<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    <T as FromStr>::Err: Display,
{
    match lookup(key) {
        Some(s) => s.parse::<T>().map_err(|e| anyhow!("failed to parse {key}='{s}': {e}")),
        None => default
            .parse::<T>()
            .map_err(|e| anyhow!("failed to parse default of {key} ('{default}'): {e}")),
    }
}

/// Telegram API のベース URL から末尾スラッシュを落とす
pub fn trim_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
