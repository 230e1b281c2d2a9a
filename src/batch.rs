//! まとめて分類
//!
//! 指定されたテキストとファイルを1つのタスク上で並行に送信する。
//! 結果は応答が届いた順にリストへ追加される。

use crate::client::{read_staged_file, HttpClassifier};
use crate::error::{Result, TriageError};
use crate::render::{format_notification, render_results};
use crate::terminal::current_width;
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use indicatif::{ProgressBar, ProgressStyle};
use mail_triage_common::{submit_file, submit_text, Session, SessionHandle, StagedFile};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// 送信対象
#[derive(Debug, Clone)]
pub enum BatchItem {
    Text(String),
    File(StagedFile),
}

/// フォルダ内のファイルを列挙（拡張子の判定は送信時の検証に任せる）
pub fn collect_dir(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TriageError::FolderNotFound(dir.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    Ok(paths)
}

pub async fn load_items(texts: Vec<String>, files: Vec<PathBuf>) -> Result<Vec<BatchItem>> {
    let mut items: Vec<BatchItem> = texts.into_iter().map(BatchItem::Text).collect();
    for path in files {
        items.push(BatchItem::File(read_staged_file(&path).await?));
    }
    Ok(items)
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// 全件を並行送信して、最後に結果リストを表示
pub async fn run(
    session: &RefCell<Session>,
    classifier: &HttpClassifier,
    items: Vec<BatchItem>,
    width_override: Option<u32>,
) {
    if items.is_empty() {
        println!("送信するテキストまたはファイルがありません");
        return;
    }

    let bar = spinner();
    bar.set_message(format!("{}件を分類中...", items.len()));

    let flush = |bar: &ProgressBar| {
        for notification in session.update(|s| s.drain_notifications()).unwrap_or_default() {
            bar.println(format_notification(&notification));
        }
    };

    // 入力の設定と送信開始は最初のpoll内で同期的に行われる
    let submissions: Vec<LocalBoxFuture<'_, ()>> = items
        .into_iter()
        .map(|item| {
            let bar = &bar;
            async move {
                match item {
                    BatchItem::Text(text) => {
                        session.update(|s| s.set_text(text));
                        submit_text(session, classifier).await;
                    }
                    BatchItem::File(file) => {
                        session.update(|s| s.stage_file(Some(file)));
                        submit_file(session, classifier).await;
                    }
                }
                flush(bar);
            }
            .boxed_local()
        })
        .collect();

    join_all(submissions).await;
    flush(&bar);
    bar.finish_and_clear();

    let width = current_width(width_override);
    session.update(|s| s.set_viewport_width(width));
    println!("\n{}", render_results(&session.borrow()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_dir_flat_and_recursive() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("b.txt"), "olá").unwrap();
        std::fs::write(dir.path().join("a.pdf"), "%PDF").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("c.txt"), "oi").unwrap();

        let flat = collect_dir(dir.path(), false).unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);

        let all = collect_dir(dir.path(), true).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_collect_missing_dir() {
        let result = collect_dir(Path::new("/nonexistent/mail/12345"), false);
        assert!(matches!(result, Err(TriageError::FolderNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_items_missing_file() {
        let result = load_items(vec![], vec![PathBuf::from("/nonexistent/email.txt")]).await;
        assert!(matches!(result, Err(TriageError::FileNotFound(_))));
    }
}
