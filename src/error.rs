//! エラー種別。Display はそのままチャットに転送される文面

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// 通信失敗・2xx 以外・JSON デコード失敗をまとめて扱う
    #[error("Ошибка при запросе к {endpoint}. Ошибка: {source}")]
    ApiUnreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Ошибка. Не совпадает название статуса проверки домашней работы: {0}")]
    UnknownVerdict(String),

    #[error("Ошибка при отправке сообщения: {0}")]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// URL にボットトークンが入るので、URL を落としたものだけ持つ
    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("Telegram API {status}: {description}")]
    Rejected { status: u16, description: String },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        DeliveryError::Transport(e.without_url())
    }
}
