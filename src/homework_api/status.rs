use crate::error::BotError;
use crate::homework_api::Verdict;
use serde_json::Value;
use tracing::error;

/// 1 件分の提出物から通知文を組み立てる
pub fn parse_status(homework: &Value) -> Result<String, BotError> {
    let homework_name = required_str(homework, "homework_name")?;
    let status = required_str(homework, "status")?;

    let verdict = status.parse::<Verdict>().inspect_err(|e| error!("{e}"))?;

    Ok(format!("Изменился статус проверки работы \"{homework_name}\". {}", verdict.text()))
}

fn required_str<'a>(homework: &'a Value, key: &str) -> Result<&'a str, BotError> {
    match homework.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => {
            let msg = format!("Ошибка. Поле {key} имеет некорректный тип: {other}");
            error!("{msg}");
            Err(BotError::MalformedResponse(msg))
        }
        None => {
            let msg = format!(
                "Ошибка. Отсутствует необходимый ключ для определения статуса \
                 проверки домашнего задания: {key}"
            );
            error!("{msg}");
            Err(BotError::MalformedResponse(msg))
        }
    }
}
