mod bot_config;
mod dedup_mode;
mod env_parsing;
mod redacted;

pub use bot_config::BotConfig;
pub use dedup_mode::DedupMode;
pub use redacted::Redacted;
