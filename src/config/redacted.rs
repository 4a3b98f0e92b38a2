use super::BotConfig;

pub struct Redacted<'a>(pub(crate) &'a BotConfig);

impl std::fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.0;
        f.debug_struct("BotConfig")
            .field("practicum_token", &mask(&c.practicum_token))
            .field("telegram_token", &mask(&c.telegram_token))
            .field("telegram_chat_id", &c.telegram_chat_id)
            .field("endpoint", &c.endpoint.as_str())
            .field("telegram_api_url", &c.telegram_api_url)
            .field("dedup_mode", &c.dedup_mode)
            .finish()
    }
}

fn mask(s: &str) -> String {
    match s.get(..3) {
        Some(head) if s.len() > 6 => format!("{head}***"),
        _ => "***".into(),
    }
}
