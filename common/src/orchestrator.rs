//! 送信と結果反映の非同期フロー
//!
//! 状態の変更は必ず `SessionHandle::update` を通して「その時点の」セッションに対して行う。
//! 待機中に別の完了や削除が入っても上書きしない。

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::api::ClassifyRequest;
use crate::session::{Session, Submission, Ticket};
use crate::types::ClassificationOutcome;

/// セッションへの共有アクセス
///
/// 表示側が破棄済みなどで更新できない場合は None を返す。
pub trait SessionHandle {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R>;
}

impl SessionHandle for RefCell<Session> {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<H: SessionHandle> SessionHandle for Rc<H> {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.as_ref().update(f)
    }
}

/// 分類バックエンド
///
/// 失敗はすべて `ClassificationOutcome` に畳み込んで返す。
#[allow(async_fn_in_trait)]
pub trait Classifier {
    async fn classify(&self, request: &ClassifyRequest) -> ClassificationOutcome;
}

/// クリップボード
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    type Error: Display;

    async fn write_text(&self, text: &str) -> Result<(), Self::Error>;
}

/// 送信中チケットを確実に解放する
///
/// 完了前にフューチャーが破棄された場合も、ドロップ時にチケットを返す。
struct InFlightGuard<'a, H: SessionHandle> {
    handle: &'a H,
    ticket: Option<Ticket>,
}

impl<'a, H: SessionHandle> InFlightGuard<'a, H> {
    fn new(handle: &'a H, ticket: Ticket) -> Self {
        Self {
            handle,
            ticket: Some(ticket),
        }
    }

    fn settle(mut self, outcome: ClassificationOutcome) {
        if let Some(ticket) = self.ticket.take() {
            self.handle
                .update(|session| session.finish_submission(ticket, outcome));
        }
    }
}

impl<H: SessionHandle> Drop for InFlightGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.handle
                .update(|session| session.abandon_submission(ticket));
        }
    }
}

/// 選択中のファイルを送信。成功してリストに追加されたら true
pub async fn submit_file<H, C>(handle: &H, classifier: &C) -> bool
where
    H: SessionHandle,
    C: Classifier,
{
    run_submission(handle, classifier, Session::begin_file_submission).await
}

/// 入力中のテキストを送信
pub async fn submit_text<H, C>(handle: &H, classifier: &C) -> bool
where
    H: SessionHandle,
    C: Classifier,
{
    run_submission(handle, classifier, Session::begin_text_submission).await
}

async fn run_submission<H, C>(
    handle: &H,
    classifier: &C,
    begin: fn(&mut Session) -> Option<Submission>,
) -> bool
where
    H: SessionHandle,
    C: Classifier,
{
    let Some(submission) = handle.update(begin).flatten() else {
        return false;
    };

    let guard = InFlightGuard::new(handle, submission.ticket);
    let outcome = classifier.classify(&submission.request).await;
    let success = outcome.is_success();
    guard.settle(outcome);
    success
}

/// 任意のテキストをコピーし、結果を通知する
pub async fn copy_text<H, C>(handle: &H, clipboard: &C, text: &str) -> bool
where
    H: SessionHandle,
    C: Clipboard,
{
    let succeeded = match clipboard.write_text(text).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            false
        }
    };
    handle.update(|session| session.record_copy(succeeded));
    succeeded
}

/// 指定位置の返信案をコピー。位置が存在しなければ何もしない
pub async fn copy_suggestion<H, C>(handle: &H, clipboard: &C, index: usize) -> bool
where
    H: SessionHandle,
    C: Clipboard,
{
    let Some(text) = handle
        .update(|session| session.suggestion(index).map(str::to_string))
        .flatten()
    else {
        return false;
    };
    copy_text(handle, clipboard, &text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::notify::{MSG_CLASSIFIED, MSG_CLASSIFY_FAILED, MSG_COPIED, MSG_COPY_FAILED, MSG_SUBMITTED};
    use crate::theme::testing::{FakeDisplay, MemoryStore};
    use crate::types::{ClassificationResult, StagedFile};
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::collections::VecDeque;

    fn new_session() -> RefCell<Session> {
        RefCell::new(Session::init(
            ControllerConfig::default(),
            &MemoryStore::default(),
            &FakeDisplay::default(),
        ))
    }

    fn result(label: &str) -> ClassificationResult {
        ClassificationResult {
            original_content: format!("body {label}"),
            classification: label.to_string(),
            suggested_response: format!("reply {label}"),
        }
    }

    fn messages(handle: &impl SessionHandle) -> Vec<String> {
        handle
            .update(|s| s.drain_notifications())
            .unwrap_or_default()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// 決まった結果を返すバックエンド
    struct ScriptedClassifier {
        outcome: ClassificationOutcome,
        requests: RefCell<Vec<ClassifyRequest>>,
    }

    impl ScriptedClassifier {
        fn new(outcome: ClassificationOutcome) -> Self {
            Self {
                outcome,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Classifier for ScriptedClassifier {
        async fn classify(&self, request: &ClassifyRequest) -> ClassificationOutcome {
            self.requests.borrow_mut().push(request.clone());
            self.outcome.clone()
        }
    }

    /// テスト側が応答のタイミングを決めるバックエンド
    #[derive(Default)]
    struct GatedClassifier {
        gates: RefCell<VecDeque<oneshot::Receiver<ClassificationOutcome>>>,
    }

    impl GatedClassifier {
        fn gate(&self) -> oneshot::Sender<ClassificationOutcome> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push_back(rx);
            tx
        }
    }

    impl Classifier for GatedClassifier {
        async fn classify(&self, _request: &ClassifyRequest) -> ClassificationOutcome {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(rx) => rx.await.unwrap_or(ClassificationOutcome::UnknownFailure),
                None => ClassificationOutcome::UnknownFailure,
            }
        }
    }

    struct FakeClipboard {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl Clipboard for FakeClipboard {
        type Error = String;

        async fn write_text(&self, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("permission denied".into());
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_rejected_extension_sends_nothing() {
        let session = new_session();
        session.update(|s| s.stage_file(Some(StagedFile::new("resume.docx", vec![1, 2]))));
        let backend = ScriptedClassifier::new(ClassificationOutcome::Success(result("x")));

        assert!(!block_on(submit_file(&session, &backend)));
        assert!(backend.requests.borrow().is_empty());
        assert_eq!(
            messages(&session),
            vec!["Extensão de arquivo inválida. Os arquivos devem ser PDF ou TXT"]
        );
        assert!(session.borrow().results().is_empty());
    }

    #[test]
    fn test_no_file_sends_nothing_silently() {
        let session = new_session();
        let backend = ScriptedClassifier::new(ClassificationOutcome::UnknownFailure);

        assert!(!block_on(submit_file(&session, &backend)));
        assert!(backend.requests.borrow().is_empty());
        assert!(messages(&session).is_empty());
    }

    #[test]
    fn test_file_submission_sends_one_request() {
        let session = new_session();
        let file = StagedFile::new("Email.PDF", b"%PDF-1.4".to_vec());
        session.update(|s| s.stage_file(Some(file.clone())));
        let backend = ScriptedClassifier::new(ClassificationOutcome::Success(result("Importante")));

        assert!(block_on(submit_file(&session, &backend)));
        assert_eq!(*backend.requests.borrow(), vec![ClassifyRequest::File(file)]);
        assert_eq!(messages(&session), vec![MSG_SUBMITTED, MSG_CLASSIFIED]);
        assert!(!session.borrow().is_busy());
    }

    #[test]
    fn test_text_scenario_appends_response_body() {
        let session = new_session();
        session.update(|s| {
            s.set_viewport_width(900.0);
            s.set_text("Hello there, please respond");
        });
        let expected = ClassificationResult {
            original_content: "Hello there, please respond".into(),
            classification: "Importante".into(),
            suggested_response: "Obrigado, retornaremos em breve.".into(),
        };
        let backend = ScriptedClassifier::new(ClassificationOutcome::Success(expected.clone()));

        assert!(block_on(submit_text(&session, &backend)));
        assert_eq!(
            *backend.requests.borrow(),
            vec![ClassifyRequest::Text("Hello there, please respond".into())]
        );
        assert_eq!(session.borrow().results().as_slice(), &[expected]);
        assert_eq!(session.borrow().layout(), crate::layout::Layout::Wide);
    }

    #[test]
    fn test_known_failure_message_shown_verbatim() {
        let session = new_session();
        session.update(|s| s.set_text("Hello there, please respond"));
        let backend = ScriptedClassifier::new(ClassificationOutcome::KnownFailure("X".into()));

        assert!(!block_on(submit_text(&session, &backend)));
        assert_eq!(messages(&session), vec![MSG_SUBMITTED, "X"]);
        assert!(session.borrow().results().is_empty());
        assert!(!session.borrow().is_busy());
    }

    #[test]
    fn test_unknown_failure_shows_generic_message() {
        let session = new_session();
        session.update(|s| s.set_text("Hello there, please respond"));
        let backend = ScriptedClassifier::new(ClassificationOutcome::UnknownFailure);

        assert!(!block_on(submit_text(&session, &backend)));
        assert_eq!(messages(&session), vec![MSG_SUBMITTED, MSG_CLASSIFY_FAILED]);
        assert!(session.borrow().results().is_empty());
    }

    #[test]
    fn test_appends_in_arrival_order() {
        let session = Rc::new(new_session());
        session.update(|s| s.set_text("Hello there, please respond"));
        let backend = Rc::new(GatedClassifier::default());
        let first_gate = backend.gate();
        let second_gate = backend.gate();

        let mut pool = LocalPool::new();
        for _ in 0..2 {
            let session = Rc::clone(&session);
            let backend = Rc::clone(&backend);
            pool.spawner()
                .spawn_local(async move {
                    submit_text(&session, backend.as_ref()).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(session.borrow().in_flight(), 2);

        // 2番目の送信が先に返る
        second_gate
            .send(ClassificationOutcome::Success(result("second")))
            .unwrap();
        pool.run_until_stalled();
        assert!(session.borrow().is_busy());
        assert_eq!(session.borrow().results().len(), 1);

        // 待っている間にユーザーが削除しても、後の追加で上書きされない
        session.update(|s| s.remove_at(0));

        first_gate
            .send(ClassificationOutcome::Success(result("first")))
            .unwrap();
        pool.run_until_stalled();

        let labels: Vec<String> = session
            .borrow()
            .results()
            .iter()
            .map(|r| r.classification.clone())
            .collect();
        assert_eq!(labels, vec!["first"]);
        assert!(!session.borrow().is_busy());
    }

    #[test]
    fn test_dropped_request_releases_busy() {
        let session = new_session();
        session.update(|s| s.set_text("Hello there, please respond"));
        let backend = GatedClassifier::default();
        let _gate = backend.gate();

        {
            let mut pool = LocalPool::new();
            let fut = submit_text(&session, &backend);
            futures::pin_mut!(fut);
            assert!(pool.run_until(futures::future::poll_immediate(&mut fut)).is_none());
            assert!(session.borrow().is_busy());
        }

        assert!(!session.borrow().is_busy());
        assert!(session.borrow().results().is_empty());
    }

    #[test]
    fn test_copy_success_and_failure_notify() {
        let session = new_session();
        let ok = FakeClipboard {
            fail: false,
            written: RefCell::new(Vec::new()),
        };
        let broken = FakeClipboard {
            fail: true,
            written: RefCell::new(Vec::new()),
        };

        assert!(block_on(copy_text(&session, &ok, "Obrigado")));
        assert!(!block_on(copy_text(&session, &broken, "Obrigado")));
        assert_eq!(*ok.written.borrow(), vec!["Obrigado".to_string()]);
        assert_eq!(messages(&session), vec![MSG_COPIED, MSG_COPY_FAILED]);
    }

    #[test]
    fn test_copy_suggestion_by_index() {
        let session = new_session();
        session.update(|s| s.set_text("Hello there, please respond"));
        let backend = ScriptedClassifier::new(ClassificationOutcome::Success(result("a")));
        block_on(submit_text(&session, &backend));
        messages(&session);

        let clipboard = FakeClipboard {
            fail: false,
            written: RefCell::new(Vec::new()),
        };
        assert!(block_on(copy_suggestion(&session, &clipboard, 0)));
        assert!(!block_on(copy_suggestion(&session, &clipboard, 3)));
        assert_eq!(*clipboard.written.borrow(), vec!["reply a".to_string()]);
        assert_eq!(messages(&session), vec![MSG_COPIED]);
    }
}
