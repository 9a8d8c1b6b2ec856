use anyhow::Result;
use clap::Parser;
use fruit_lens::analyzer::HttpAnalyzer;
use fruit_lens::preview::TempFilePreviewStore;
use fruit_lens::session::AnalysisSession;
use fruit_lens::{cli, config, report, selection, view};
use cli::{Cli, Commands};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

type Session = AnalysisSession<HttpAnalyzer, TempFilePreviewStore>;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fruit_lens=debug,fruit_lens_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// セッションを作って画像を選択
fn open_session(
    config: &Config,
    api_url: Option<&str>,
    image: &Path,
    content_type: Option<&str>,
) -> Result<Session> {
    let analyzer = HttpAnalyzer::from_config(config, api_url)?;
    let store = TempFilePreviewStore::new()?;
    let mut session = AnalysisSession::new(analyzer, store, config.stale_policy());

    let candidate = selection::candidate_from_path(image, content_type)?;
    session.select_file(Some(candidate));
    if let Some(err) = session.state().error {
        return Err(err.into());
    }
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, content_type, output, all } => {
            println!("🍎 fruit-lens - 画像解析\n");

            // 1. 画像選択
            println!("[1/2] 画像を読み込み中...");
            let mut session = open_session(&config, cli.api_url.as_deref(), &image, content_type.as_deref())?;
            if let Some(selected) = &session.state().selected {
                println!("✔ {} ({}, {} bytes)", selected.file_name(), selected.content_type(), selected.len());
            }
            if let Some(url) = session.preview_url() {
                println!("  プレビュー: {}", url);
            }
            println!();

            // 2. 解析
            println!("[2/2] AI解析中... ({})", session.analyzer().endpoint());
            view::submit_with_spinner(&mut session).await;
            if let Some(err) = session.state().error {
                return Err(err.into());
            }
            println!("✔ 解析完了: {}件\n", session.results().len());

            if session.results().is_empty() {
                println!("果物は検出されませんでした");
            } else if all {
                let share = session.share_percent().unwrap_or_default();
                for (i, result) in session.results().items().iter().enumerate() {
                    println!("--- {} / {} (Confidence: {}%) ---", i + 1, session.results().len(), share);
                    println!("{}", view::render_result(result));
                }
            } else {
                println!("{}", view::render_state(session.state()));
                if session.results().has_next() {
                    println!("（残り{}件は --all または browse で表示）", session.results().len() - 1);
                }
            }

            // 3. 結果保存
            if let Some(output) = output {
                let source = image.display().to_string();
                let report = report::AnalysisReport::new(&source, session.results());
                report::save_report(&output, &report)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Browse { image, content_type } => {
            println!("🍎 fruit-lens - 結果ブラウザ\n");

            let mut session = open_session(&config, cli.api_url.as_deref(), &image, content_type.as_deref())?;
            view::submit_with_spinner(&mut session).await;
            view::run_browser(&mut session).await?;
        }

        Commands::Config { set_api_url, set_timeout, keep_stale_results, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_api_url {
                config.set_api_base_url(url)?;
                changed = true;
            }
            if let Some(secs) = set_timeout {
                config.timeout_seconds = if secs == 0 { None } else { Some(secs) };
                changed = true;
            }
            if let Some(keep) = keep_stale_results {
                config.keep_stale_results = keep;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base_url);
                println!("  実効URL: {}", config.api_base_url());
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: クライアント既定"),
                }
                println!("  失敗時に前回結果を保持: {}", if config.keep_stale_results { "はい" } else { "いいえ" });
            }
        }
    }

    Ok(())
}
