//! 分類バックエンドとの契約
//!
//! - `POST <base>/email/classify-by-file` : multipart、フィールド `email_file`
//! - `POST <base>/email/classify-by-text` : JSON `{"text": ...}`
//!
//! レスポンスはここで一度だけ判定し、`ClassificationOutcome` に変換する。

use serde::Serialize;
use serde_json::Value;

use crate::types::{ClassificationOutcome, ClassificationResult, StagedFile};

pub const CLASSIFY_BY_FILE_PATH: &str = "email/classify-by-file";
pub const CLASSIFY_BY_TEXT_PATH: &str = "email/classify-by-text";

/// multipartのファイルフィールド名
pub const FILE_FIELD: &str = "email_file";

/// テキスト分類のリクエストボディ
#[derive(Debug, Serialize)]
pub struct TextPayload<'a> {
    pub text: &'a str,
}

/// 送信するリクエスト（1回の送信につき1つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyRequest {
    File(StagedFile),
    Text(String),
}

impl ClassifyRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ClassifyRequest::File(_) => CLASSIFY_BY_FILE_PATH,
            ClassifyRequest::Text(_) => CLASSIFY_BY_TEXT_PATH,
        }
    }

    pub fn url(&self, base: &str) -> String {
        endpoint_url(base, self.path())
    }
}

/// ベースURLとパスを `/` 1つで連結
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// ステータスとボディから結果を判定
pub fn decode_response(status: u16, body: &str) -> ClassificationOutcome {
    if (200..300).contains(&status) {
        match serde_json::from_str::<ClassificationResult>(body) {
            Ok(result) => ClassificationOutcome::Success(result),
            Err(e) => {
                tracing::warn!(error = %e, "classification response could not be parsed");
                ClassificationOutcome::UnknownFailure
            }
        }
    } else {
        decode_error_body(body)
    }
}

/// エラーボディ `{"detail": {"ok": <falsy>, "message": "..."}}` のみ既知の拒否として扱う
pub fn decode_error_body(body: &str) -> ClassificationOutcome {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return ClassificationOutcome::UnknownFailure;
    };

    let detail = &value["detail"];
    let ok = &detail["ok"];
    match (&detail["message"], is_falsy(ok)) {
        (Value::String(message), true) => ClassificationOutcome::KnownFailure(message.clone()),
        _ => ClassificationOutcome::UnknownFailure,
    }
}

/// `false`、`0`、空文字列。`null` や欠落は「okなし」なので偽扱いしない
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_once() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", "email/classify-by-text"),
            "http://localhost:8000/email/classify-by-text"
        );
        assert_eq!(
            endpoint_url("https://api.example.com/v1", "/email/classify-by-file"),
            "https://api.example.com/v1/email/classify-by-file"
        );
    }

    #[test]
    fn test_request_paths() {
        let file = ClassifyRequest::File(StagedFile::new("a.txt", b"hi".to_vec()));
        let text = ClassifyRequest::Text("hello".into());
        assert_eq!(file.path(), CLASSIFY_BY_FILE_PATH);
        assert_eq!(text.url("http://x"), "http://x/email/classify-by-text");
    }

    #[test]
    fn test_text_payload_shape() {
        let body = serde_json::to_string(&TextPayload {
            text: "Hello there, please respond",
        })
        .unwrap();
        assert_eq!(body, r#"{"text":"Hello there, please respond"}"#);
    }

    #[test]
    fn test_success_body() {
        let body = r#"{"original_content":"Hello there, please respond","classification":"Importante","suggested_response":"Obrigado, retornaremos em breve."}"#;
        let ClassificationOutcome::Success(result) = decode_response(200, body) else {
            panic!("expected success");
        };
        assert_eq!(result.classification, "Importante");
    }

    #[test]
    fn test_unparseable_success_body_is_unknown() {
        assert_eq!(decode_response(200, "<html>"), ClassificationOutcome::UnknownFailure);
        assert_eq!(decode_response(201, r#"{"classification":"x"}"#), ClassificationOutcome::UnknownFailure);
    }

    #[test]
    fn test_known_failure_message_verbatim() {
        let body = r#"{"detail":{"ok":false,"message":"Não foi possível classificar o email fornecido"}}"#;
        assert_eq!(
            decode_response(500, body),
            ClassificationOutcome::KnownFailure("Não foi possível classificar o email fornecido".into())
        );
    }

    #[test]
    fn test_ok_true_or_missing_is_unknown() {
        for body in [
            r#"{"detail":{"ok":true,"message":"X"}}"#,
            r#"{"detail":{"message":"X"}}"#,
            r#"{"detail":{"ok":null,"message":"X"}}"#,
            r#"{"detail":{"ok":1,"message":"X"}}"#,
            r#"{"detail":"Not Found"}"#,
            r#"{"detail":[{"loc":["body","text"],"msg":"field required"}]}"#,
            r#"{}"#,
            "",
        ] {
            assert_eq!(decode_response(422, body), ClassificationOutcome::UnknownFailure, "{body}");
        }
    }

    #[test]
    fn test_ok_zero_is_falsy() {
        assert_eq!(
            decode_response(400, r#"{"detail":{"ok":0,"message":"Nome de arquivo inválido"}}"#),
            ClassificationOutcome::KnownFailure("Nome de arquivo inválido".into())
        );
    }

    #[test]
    fn test_known_shape_without_message_is_unknown() {
        assert_eq!(
            decode_response(400, r#"{"detail":{"ok":false}}"#),
            ClassificationOutcome::UnknownFailure
        );
    }
}
