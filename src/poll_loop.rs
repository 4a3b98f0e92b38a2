//! ステータス API を定期的に叩いて、変化があれば Telegram に流すループ

use crate::config::DedupMode;
use crate::error::BotError;
use crate::homework_api::{HomeworkApi, check_response, parse_status};
use crate::telegram::TelegramNotifier;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error};

/// 1 周ごとの待ち時間
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// 1 周分の結果（テストと debug ログ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// homeworks が空だった
    NoUpdates,
    /// 前回と同じ文面だったので送らなかった
    Unchanged,
    Notified,
    /// どこかの段階で失敗し、エラー報告を試みた
    Failed,
}

pub struct PollLoop {
    api: HomeworkApi,
    notifier: TelegramNotifier,
    dedup_mode: DedupMode,
    retry_period: Duration,

    /// 問い合わせ窓の下限。起動時に決めたら進めない
    timestamp: i64,
    /// 最後に送ったステータス通知
    last_message: String,
}

impl PollLoop {
    pub fn new(
        api: HomeworkApi,
        notifier: TelegramNotifier,
        dedup_mode: DedupMode,
        timestamp: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            dedup_mode,
            retry_period: RETRY_PERIOD,
            timestamp,
            last_message: String::new(),
        }
    }

    #[cfg(test)]
    pub fn retry_period(mut self, period: Duration) -> Self {
        self.retry_period = period;
        self
    }

    #[cfg(test)]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// 成功しても失敗しても待ってから次へ。外から止められるまで戻らない
    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_once().await;
            debug!(?outcome, "iteration finished");

            debug!("Пауза на {} минут", self.retry_period.as_secs() / 60);
            sleep(self.retry_period).await;
        }
    }

    /// 1 周分。エラーはここで全部受け止めてチャットに報告する
    pub async fn run_once(&mut self) -> IterationOutcome {
        match self.poll().await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report_error(&e).await;
                IterationOutcome::Failed
            }
        }
    }

    async fn poll(&mut self) -> Result<IterationOutcome, BotError> {
        let response = self.api.fetch(self.timestamp).await?;
        let homeworks = check_response(response)?;

        // 見るのは先頭の 1 件だけ
        let Some(latest) = homeworks.first() else {
            debug!("Новых статусов нет");
            return Ok(IterationOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if self.dedup_mode.is_duplicate(&self.last_message, &message) {
            debug!("Статус не изменился");
            return Ok(IterationOutcome::Unchanged);
        }

        // 送信に失敗してもメモは更新済み（同じ文面を毎周再送しない）
        self.last_message = message;
        self.notifier.send(&self.last_message).await?;
        Ok(IterationOutcome::Notified)
    }

    /// エラー報告は送れなくてもログだけ残して続行
    async fn report_error(&self, err: &BotError) {
        let message = format!("Ошибка. Сбой в работе программы: {err}");
        if let Err(e) = self.notifier.send(&message).await {
            error!("Не удалось отправить сообщение об ошибке: {e}");
        }
    }
}
