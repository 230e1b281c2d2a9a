use clap::Parser;
use mail_triage::{batch, cli, client, config, interactive, store, terminal};
use cli::{Cli, Commands};
use config::Config;
use mail_triage_common::{Session, SessionHandle};
use std::cell::RefCell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let mut config = Config::load()?;
    if let Some(url) = &cli.base_url {
        config.base_url = Some(url.clone());
    }

    let store = store::FilePreferenceStore::new(Config::preferences_path()?);
    let display = terminal::TerminalDisplay::from_env();

    match cli.command {
        Commands::Classify { text, file, dir, recursive } => {
            println!("📧 mail-triage - classificação\n");

            let mut files = file;
            if let Some(dir) = dir {
                files.extend(batch::collect_dir(&dir, recursive)?);
            }
            let items = batch::load_items(text, files).await?;

            let classifier = client::HttpClassifier::new(config.get_base_url()?, config.timeout_seconds)?;
            let session = RefCell::new(Session::init(config.terminal_controller(), &store, &display));
            session.update(|s| s.set_viewport_width(terminal::current_width(cli.width)));

            batch::run(&session, &classifier, items, cli.width).await;
        }

        Commands::Session => {
            let classifier = client::HttpClassifier::new(config.get_base_url()?, config.timeout_seconds)?;
            let mut session = Session::init(config.terminal_controller(), &store, &display);
            session.set_viewport_width(terminal::current_width(cli.width));

            interactive::InteractiveSession::new(session, &classifier, &store, &display, cli.width)
                .run()
                .await?;
        }

        Commands::Theme { toggle } => {
            let mut session = Session::init(config.terminal_controller(), &store, &display);
            if toggle {
                session.toggle_theme(&store, &display);
                println!("✔ テーマを切り替えました");
            }
            println!("テーマ: {}", session.theme());
            println!("  保存先: {}", store.path().display());
        }

        Commands::Config { set_base_url, show } => {
            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  バックエンドURL: {}", config.get_base_url().unwrap_or_else(|_| "未設定".into()));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  レイアウトしきい値: {}桁", config.terminal_threshold);
                println!("  最小文字数: {}", config.controller.min_text_len);
                println!("  テーマ保存期間: {}日", config.controller.theme_expiry_days);
                println!("  送信後の入力: {:?}", config.controller.input_retention);
            }
        }
    }

    Ok(())
}

/// ログ出力の設定（RUST_LOG が優先）
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
