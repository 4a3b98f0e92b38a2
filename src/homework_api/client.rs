use crate::config::BotConfig;
use crate::error::BotError;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

/// 提出物ステータス API のクライアント（1 回呼ぶと 1 リクエスト、リトライなし）
#[derive(Clone)]
pub struct HomeworkApi {
    client: Client,
    endpoint: Url,
    token: String,
}

impl HomeworkApi {
    pub fn new(client: Client, endpoint: Url, token: impl Into<String>) -> Self {
        Self { client, endpoint, token: token.into() }
    }

    pub fn from_config(client: Client, config: &BotConfig) -> Self {
        Self::new(client, config.endpoint.clone(), &config.practicum_token)
    }

    /// `from_date = since` 以降に更新された提出物を取得
    pub async fn fetch(&self, since: i64) -> Result<Value, BotError> {
        match self.request(since).await {
            Ok(body) => {
                debug!("Успешно. Запрос к API: {}", self.endpoint);
                Ok(body)
            }
            Err(source) => {
                let err = BotError::ApiUnreachable { endpoint: self.endpoint.to_string(), source };
                error!("{err}");
                Err(err)
            }
        }
    }

    async fn request(&self, since: i64) -> reqwest::Result<Value> {
        self.client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}
