//! Telegram Bot API まわり（sendMessage だけ）

use crate::config::BotConfig;
use crate::error::DeliveryError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// `{"ok": false, "description": "..."}` 形式のレスポンス
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// 決まったチャットにテキストを送るだけの通知役
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self { client, api_url: api_url.into(), token: token.into(), chat_id: chat_id.into() }
    }

    pub fn from_config(client: Client, config: &BotConfig) -> Self {
        Self::new(
            client,
            &config.telegram_api_url,
            &config.telegram_token,
            &config.telegram_chat_id,
        )
    }

    /// 1 回だけ送る（リトライなし）
    pub async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        match self.post(text).await {
            Ok(()) => {
                debug!("Отправлено сообщение: '{text}'");
                Ok(())
            }
            Err(e) => {
                error!("Ошибка при отправке сообщения: {e}");
                Err(e)
            }
        }
    }

    async fn post(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let body = SendMessage { chat_id: &self.chat_id, text };

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        // 2xx でも ok=false のことがあるので両方見る
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();
        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_default(),
            }),
            None => Err(DeliveryError::Rejected { status: status.as_u16(), description: text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier_for(server: &MockServer) -> TelegramNotifier {
        TelegramNotifier::new(Client::new(), server.uri(), "123:abc", "42")
    }

    #[tokio::test]
    async fn posts_text_to_chat() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "привет"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"message_id": 1}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        notifier_for(&server).send("привет").await.unwrap();
    }

    #[tokio::test]
    async fn api_error_is_delivery_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = notifier_for(&server).send("x").await.unwrap_err();
        match err {
            DeliveryError::Rejected { status, description } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_false_with_200_is_still_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": false, "description": "nope"})),
            )
            .mount(&server)
            .await;

        assert!(notifier_for(&server).send("x").await.is_err());
    }

    #[tokio::test]
    async fn transport_failure_is_delivery_error() {
        let notifier = TelegramNotifier::new(Client::new(), "http://127.0.0.1:1", "t", "1");
        let err = notifier.send("x").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
    }

    #[tokio::test]
    async fn transport_error_text_hides_bot_token() {
        let notifier =
            TelegramNotifier::new(Client::new(), "http://127.0.0.1:1", "123456:SECRET", "1");
        let err = notifier.send("x").await.unwrap_err();

        // チャットに流れるエラー報告と同じ形に整形して確認
        let report = format!("Ошибка. Сбой в работе программы: {}", BotError::from(err));
        assert!(!report.contains("SECRET"), "token leaked: {report}");
        assert!(!report.contains("/sendMessage"), "url leaked: {report}");
    }

    #[tokio::test]
    async fn body_read_failure_is_transport_error() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        // Content-Length より短い本文を返してすぐ切る
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n{\"ok\":",
                );
            }
        });

        let notifier = TelegramNotifier::new(Client::new(), format!("http://{addr}"), "t", "1");
        let err = notifier.send("x").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)), "got {err:?}");
    }
}
