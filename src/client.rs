//! 分類バックエンドのHTTPクライアント

use crate::error::{Result, TriageError};
use mail_triage_common::api::{TextPayload, FILE_FIELD};
use mail_triage_common::{decode_response, ClassificationOutcome, ClassifyRequest, Classifier, StagedFile};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn build(&self, request: &ClassifyRequest) -> reqwest::RequestBuilder {
        let url = request.url(&self.base_url);
        match request {
            ClassifyRequest::File(file) => {
                let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
                self.client
                    .post(url)
                    .multipart(Form::new().part(FILE_FIELD, part))
            }
            ClassifyRequest::Text(text) => self.client.post(url).json(&TextPayload { text }),
        }
    }
}

impl Classifier for HttpClassifier {
    async fn classify(&self, request: &ClassifyRequest) -> ClassificationOutcome {
        let response = match self.build(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, path = request.path(), "request failed");
                return ClassificationOutcome::UnknownFailure;
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                tracing::debug!(status, path = request.path(), "response received");
                decode_response(status, &body)
            }
            Err(e) => {
                tracing::warn!(error = %e, status, "response body unreadable");
                ClassificationOutcome::UnknownFailure
            }
        }
    }
}

/// パスからファイルを読み込んで送信待ちにする
pub async fn read_staged_file(path: &Path) -> Result<StagedFile> {
    if !path.is_file() {
        return Err(TriageError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = tokio::fs::read(path).await?;
    Ok(StagedFile::new(name, bytes))
}
