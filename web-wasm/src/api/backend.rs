//! 分類バックエンド呼び出し（fetch）
//!
//! file: multipart（ブラウザが境界付きContent-Typeを付与）
//! text: JSON

use js_sys::{Array, Uint8Array};
use mail_triage_common::api::{TextPayload, FILE_FIELD};
use mail_triage_common::{decode_response, ClassificationOutcome, ClassifyRequest, Classifier};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Request, RequestInit, RequestMode, Response};

/// ビルド時に `MAIL_TRIAGE_BACKEND_URL` で指定
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub fn backend_url() -> &'static str {
    option_env!("MAIL_TRIAGE_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL)
}

pub struct FetchClassifier {
    base_url: String,
}

impl FetchClassifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::new(backend_url())
    }

    /// POSTしてステータスとボディを返す
    async fn post(&self, request: &ClassifyRequest) -> Result<(u16, String), JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);

        match request {
            ClassifyRequest::File(file) => {
                let form = FormData::new()?;
                let bytes = Uint8Array::from(file.bytes.as_slice());
                let blob = Blob::new_with_u8_array_sequence(&Array::of1(&bytes))?;
                form.append_with_blob_and_filename(FILE_FIELD, &blob, &file.name)?;
                opts.set_body(&form);
            }
            ClassifyRequest::Text(text) => {
                let body = serde_json::to_string(&TextPayload { text })
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                opts.set_body(&JsValue::from_str(&body));
            }
        }

        let req = Request::new_with_str_and_init(&request.url(&self.base_url), &opts)?;
        if let ClassifyRequest::Text(_) = request {
            req.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&req)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let body = JsFuture::from(resp.text()?).await?;
        Ok((resp.status(), body.as_string().unwrap_or_default()))
    }
}

impl Classifier for FetchClassifier {
    async fn classify(&self, request: &ClassifyRequest) -> ClassificationOutcome {
        match self.post(request).await {
            Ok((status, body)) => decode_response(status, &body),
            Err(e) => {
                gloo::console::error!(format!("classification request failed: {:?}", e));
                ClassificationOutcome::UnknownFailure
            }
        }
    }
}
