use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fruit-lens")]
#[command(about = "果物画像をAI解析して栄養情報を表示", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析APIのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を解析して結果を表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// MIMEタイプを指定（デフォルト: 拡張子から推定）
        #[arg(long)]
        content_type: Option<String>,

        /// 結果をJSONで保存
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 全件を表示（デフォルトは先頭のみ）
        #[arg(short, long)]
        all: bool,
    },

    /// 画像を解析して結果を対話式でページ送り
    Browse {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// MIMEタイプを指定（デフォルト: 拡張子から推定）
        #[arg(long)]
        content_type: Option<String>,
    },

    /// 設定の表示・変更
    Config {
        /// 解析APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// リクエストタイムアウト（秒）を設定。0で解除
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 解析失敗時に前回結果を残すか
        #[arg(long)]
        keep_stale_results: Option<bool>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
