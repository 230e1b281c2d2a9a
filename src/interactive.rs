//! 対話モード
//!
//! ファイル選択、テキスト入力、送信、コピー、削除、テーマ切替をメニューから行う。

use crate::client::{read_staged_file, HttpClassifier};
use crate::clipboard::Osc52Clipboard;
use crate::render::{format_notification, render_results};
use crate::store::FilePreferenceStore;
use crate::terminal::{current_width, TerminalDisplay};
use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use indicatif::ProgressBar;
use mail_triage_common::{
    copy_suggestion, submit_file, submit_text, Session, SessionHandle, ThemeMode,
};
use std::cell::RefCell;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    StageFile,
    TypeText,
    SubmitFile,
    SubmitText,
    Copy,
    Remove,
    ToggleTheme,
    Quit,
}

const ACTIONS: &[(Action, &str)] = &[
    (Action::StageFile, "Selecionar arquivo (.txt ou .pdf)"),
    (Action::TypeText, "Digitar texto do email"),
    (Action::SubmitFile, "Enviar arquivo"),
    (Action::SubmitText, "Enviar texto"),
    (Action::Copy, "Copiar resposta sugerida"),
    (Action::Remove, "Remover email"),
    (Action::ToggleTheme, "Trocar de tema"),
    (Action::Quit, "Sair"),
];

pub struct InteractiveSession<'a> {
    session: RefCell<Session>,
    classifier: &'a HttpClassifier,
    store: &'a FilePreferenceStore,
    display: &'a TerminalDisplay,
    width_override: Option<u32>,
}

impl<'a> InteractiveSession<'a> {
    pub fn new(
        session: Session,
        classifier: &'a HttpClassifier,
        store: &'a FilePreferenceStore,
        display: &'a TerminalDisplay,
        width_override: Option<u32>,
    ) -> Self {
        Self {
            session: RefCell::new(session),
            classifier,
            store,
            display,
            width_override,
        }
    }

    pub async fn run(&self) -> Result<()> {
        println!("📧 mail-triage - classificação de emails\n");

        loop {
            self.print_status();

            let labels: Vec<&str> = ACTIONS.iter().map(|(_, label)| *label).collect();
            let selected = Select::with_theme(self.display.dialog_theme().as_ref())
                .with_prompt("Ação")
                .items(&labels)
                .default(0)
                .interact()
                .context("メニュー選択に失敗")?;

            match ACTIONS[selected].0 {
                Action::StageFile => self.stage_file().await?,
                Action::TypeText => self.type_text()?,
                Action::SubmitFile => {
                    self.with_spinner(submit_file(&self.session, self.classifier)).await;
                }
                Action::SubmitText => {
                    if !self.session.borrow().can_submit_text() {
                        let min = self.session.borrow().config().min_text_len;
                        println!("✖ Digite pelo menos {} caracteres antes de enviar", min);
                        continue;
                    }
                    self.with_spinner(submit_text(&self.session, self.classifier)).await;
                }
                Action::Copy => {
                    if let Some(index) = self.pick_entry("Copiar resposta de qual email?")? {
                        copy_suggestion(&self.session, &Osc52Clipboard::stdout(), index).await;
                    }
                }
                Action::Remove => {
                    if let Some(index) = self.pick_entry("Remover qual email?")? {
                        self.session.update(|s| s.remove_at(index));
                    }
                }
                Action::ToggleTheme => {
                    let mode = self
                        .session
                        .borrow_mut()
                        .toggle_theme(self.store, self.display);
                    println!("Tema: {}", theme_label(mode));
                }
                Action::Quit => break,
            }

            self.flush_notifications();
            // 端末のリサイズに追従する
            let width = current_width(self.width_override);
            self.session.update(|s| s.set_viewport_width(width));
            println!("\n{}\n", render_results(&self.session.borrow()));
        }

        Ok(())
    }

    fn print_status(&self) {
        let session = self.session.borrow();
        let file = session
            .staged_file()
            .map(|f| f.name.as_str())
            .unwrap_or("(nenhum)");
        let text_chars = session.text().chars().count();
        println!(
            "Arquivo: {} | Texto: {} caracteres | Tema: {}",
            file,
            text_chars,
            theme_label(session.theme())
        );
    }

    fn flush_notifications(&self) {
        for notification in self.session.update(|s| s.drain_notifications()).unwrap_or_default() {
            println!("{}", format_notification(&notification));
        }
    }

    /// 送信中はスピナーを表示
    async fn with_spinner<F: Future<Output = bool>>(&self, submission: F) -> bool {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message("Classificando...");
        let classified = submission.await;
        bar.finish_and_clear();
        classified
    }

    async fn stage_file(&self) -> Result<()> {
        let raw: String = Input::with_theme(self.display.dialog_theme().as_ref())
            .with_prompt("Caminho do arquivo")
            .interact_text()
            .context("ファイルパスの入力に失敗")?;

        match read_staged_file(&PathBuf::from(raw.trim())).await {
            Ok(file) => {
                println!("✔ Arquivo selecionado: {}", file.name);
                self.session.update(|s| s.stage_file(Some(file)));
            }
            Err(e) => println!("✖ {}", e),
        }
        Ok(())
    }

    fn type_text(&self) -> Result<()> {
        let current = self.session.borrow().text().to_string();
        let text: String = Input::with_theme(self.display.dialog_theme().as_ref())
            .with_prompt("Texto do email")
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .context("テキストの入力に失敗")?;
        self.session.update(|s| s.set_text(text));
        Ok(())
    }

    fn pick_entry(&self, prompt: &str) -> Result<Option<usize>> {
        let items: Vec<String> = self
            .session
            .borrow()
            .results()
            .iter()
            .enumerate()
            .map(|(i, r)| format!("Email {} - {}", i + 1, r.classification))
            .collect();
        if items.is_empty() {
            println!("Nenhum email classificado ainda");
            return Ok(None);
        }

        let index = Select::with_theme(self.display.dialog_theme().as_ref())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()
            .context("選択に失敗")?;
        Ok(index)
    }
}

fn theme_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "claro",
        ThemeMode::Dark => "escuro",
    }
}
