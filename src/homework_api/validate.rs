use crate::error::BotError;
use serde_json::Value;
use tracing::error;

/// ログに出してから MalformedResponse にする
fn malformed(msg: &str) -> BotError {
    error!("{msg}");
    BotError::MalformedResponse(msg.to_string())
}

fn is_empty_payload(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// API のレスポンスを検査して `homeworks` の中身をそのまま返す
pub fn check_response(response: Value) -> Result<Vec<Value>, BotError> {
    if is_empty_payload(&response) {
        return Err(malformed("Ошибка. Ответ API содержит пустой словарь."));
    }

    let Value::Object(mut map) = response else {
        return Err(malformed("Ошибка. Ответ API имеет некорректный тип."));
    };

    match map.remove("homeworks") {
        None => Err(malformed("Ошибка. Отсутствует необходимый ключ в ответе.")),
        Some(Value::Array(homeworks)) => Ok(homeworks),
        Some(_) => Err(malformed(
            "Ошибка. В ответе API неверный тип данных у элемента homeworks",
        )),
    }
}
