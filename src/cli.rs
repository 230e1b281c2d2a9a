use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mail-triage")]
#[command(about = "メール分類クライアント: 本文やファイルを分類サービスへ送り、分類と返信案を表示", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイルより優先）
    #[arg(long, global = true, env = "MAIL_TRIAGE_BACKEND_URL")]
    pub base_url: Option<String>,

    /// 表示幅（桁数）。省略時は端末の幅を測る。しきい値未満ならカード表示
    #[arg(long, global = true)]
    pub width: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキスト/ファイルをまとめて分類（並行送信）
    Classify {
        /// 分類するテキスト（複数可）
        #[arg(short, long)]
        text: Vec<String>,

        /// 分類するファイル .txt / .pdf（複数可）
        #[arg(short, long)]
        file: Vec<PathBuf>,

        /// フォルダ内のファイルをすべて送信
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 対話モード
    Session,

    /// テーマ設定
    Theme {
        /// ライト/ダークを切り替える
        #[arg(long)]
        toggle: bool,
    },

    /// 設定管理
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
