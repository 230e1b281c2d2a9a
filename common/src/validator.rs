//! 入力検証
//!
//! 送信時にのみ呼び出す。ファイルは拡張子の文字列一致だけを見て、
//! MIMEタイプや中身は確認しない。

use thiserror::Error;

/// 受け付ける拡張子（小文字）と種類
pub const ALLOWED_EXTENSIONS: &[(&str, FileKind)] = &[("txt", FileKind::Text), ("pdf", FileKind::Pdf)];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// ファイル未選択。通知せずに何もしない
    #[error("no file staged")]
    NoFileStaged,

    #[error("Extensão de arquivo inválida. Os arquivos devem ser PDF ou TXT")]
    UnsupportedExtension(String),

    #[error("O texto do email não pode ser vazio")]
    EmptyText,

    #[error("O texto do email deve ter pelo menos {min} caracteres")]
    TextTooShort { min: usize, actual: usize },
}

impl ValidationError {
    /// ユーザーに通知しない拒否か
    pub fn is_silent(&self) -> bool {
        matches!(self, ValidationError::NoFileStaged)
    }
}

/// ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
}

/// 最後の `.` 以降を拡張子とみなす。`.` がなければファイル名全体
pub fn file_extension(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// ファイル名を検証
pub fn validate_file_name(name: Option<&str>) -> Result<FileKind, ValidationError> {
    let name = name.ok_or(ValidationError::NoFileStaged)?;
    let extension = file_extension(name).to_lowercase();

    ALLOWED_EXTENSIONS
        .iter()
        .find(|(allowed, _)| *allowed == extension)
        .map(|(_, kind)| *kind)
        .ok_or(ValidationError::UnsupportedExtension(extension))
}

/// テキストを検証（文字数はUnicodeスカラー値で数える）
pub fn validate_text(text: &str, min_len: usize) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let actual = text.chars().count();
    if actual < min_len {
        return Err(ValidationError::TextTooShort { min: min_len, actual });
    }

    Ok(())
}
