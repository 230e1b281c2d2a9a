use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("バックエンドURLが設定されていません。`mail-triage config --set-base-url URL` または環境変数 MAIL_TRIAGE_BACKEND_URL で設定してください")]
    MissingBaseUrl,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("設定ストアエラー: {0}")]
    Store(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] mail_triage_common::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
