//! ターミナル表示と対話ブラウザ

use crate::analyzer::Analyzer;
use crate::preview::PreviewStore;
use crate::session::AnalysisSession;
use dialoguer::Select;
use fruit_lens_common::{AnalysisResult, Phase, SessionState};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;
use std::time::Duration;

/// 果物1件を表示用文字列に
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.name_of_fruit);
    let _ = writeln!(out, "  Calories:      {}", result.calories_per_100g);
    let _ = writeln!(out, "  Carbohydrates: {}", result.carbohydrates);
    let _ = writeln!(out, "  Fiber:         {}", result.fiber);
    let _ = writeln!(out, "  Vitamins:");
    if result.vitamins.is_empty() {
        let _ = writeln!(out, "    (なし)");
    }
    for vitamin in &result.vitamins {
        let _ = writeln!(out, "    - {}", vitamin);
    }
    let _ = writeln!(out, "  Benefits:");
    let _ = writeln!(out, "    {}", result.benefits_for_human_body);
    out
}

/// 状態全体を表示用文字列に
pub fn render_state(state: &SessionState) -> String {
    let mut out = String::new();

    if let Some(image) = &state.selected {
        let _ = writeln!(out, "画像: {} ({})", image.file_name(), image.content_type());
    }
    if let Some(url) = &state.preview_url {
        let _ = writeln!(out, "プレビュー: {}", url);
    }

    match state.phase() {
        Phase::Idle => {
            let _ = writeln!(out, "状態: 待機中");
        }
        Phase::Loading => {
            let _ = writeln!(out, "状態: Analyzing...");
        }
        Phase::Error(err) => {
            let _ = writeln!(out, "✖ {}", err);
        }
        Phase::Ready => {}
    }

    if let Some(result) = state.current_result() {
        let position = state.results.position_label().unwrap_or_default();
        match state.results.share_percent() {
            Some(share) => {
                let _ = writeln!(out, "--- {} (Confidence: {}%) ---", position, share);
            }
            None => {
                let _ = writeln!(out, "--- {} ---", position);
            }
        }
        out.push_str(&render_result(result));
    }

    out
}

/// スピナーを出しながら解析
pub async fn submit_with_spinner<A: Analyzer, P: PreviewStore>(session: &mut AnalysisSession<A, P>) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    session.submit().await;

    spinner.finish_and_clear();
}

/// ブラウザの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    Prev,
    Next,
    Reanalyze,
    Quit,
}

impl BrowseAction {
    pub fn label(&self) -> &'static str {
        match self {
            BrowseAction::Prev => "prev",
            BrowseAction::Next => "next",
            BrowseAction::Reanalyze => "Analyze Image (再解析)",
            BrowseAction::Quit => "終了",
        }
    }
}

/// 現在の状態で選べる操作
///
/// 端では prev/next を出さない。ローディング中は再解析を出さない。
pub fn available_actions(state: &SessionState) -> Vec<BrowseAction> {
    let mut actions = Vec::new();
    if state.results.has_next() {
        actions.push(BrowseAction::Next);
    }
    if state.results.has_prev() {
        actions.push(BrowseAction::Prev);
    }
    if state.can_submit() {
        actions.push(BrowseAction::Reanalyze);
    }
    actions.push(BrowseAction::Quit);
    actions
}

/// 対話式で結果をページ送り
pub async fn run_browser<A: Analyzer, P: PreviewStore>(
    session: &mut AnalysisSession<A, P>,
) -> anyhow::Result<()> {
    loop {
        println!("\n{}", render_state(session.state()));

        let actions = available_actions(session.state());
        let labels: Vec<&str> = actions.iter().map(BrowseAction::label).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            BrowseAction::Prev => session.go_prev(),
            BrowseAction::Next => session.go_next(),
            BrowseAction::Reanalyze => submit_with_spinner(session).await,
            BrowseAction::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fruit_lens_common::{validate_candidate, Event, FileCandidate, Measure, ResultSet, SessionError};

    fn banana() -> AnalysisResult {
        AnalysisResult {
            name_of_fruit: "Banana".into(),
            calories_per_100g: Measure::from(89u32),
            carbohydrates: Measure::from(23u32),
            fiber: Measure::from("2.6 g"),
            vitamins: vec!["B6".into(), "C".into()],
            benefits_for_human_body: "Supports heart health".into(),
        }
    }

    fn selected_state() -> SessionState {
        let image =
            validate_candidate(Some(FileCandidate::new("banana.jpg", "image/jpeg", vec![1]))).unwrap();
        SessionState::default().apply(Event::FileAccepted {
            image,
            preview_url: Some("file:///tmp/preview-1.jpg".into()),
        })
    }

    #[test]
    fn test_render_result() {
        let text = render_result(&banana());
        assert!(text.starts_with("Banana\n"));
        assert!(text.contains("Calories:      89"));
        assert!(text.contains("Fiber:         2.6 g"));
        assert!(text.contains("    - B6\n    - C\n"));
        assert!(text.contains("Supports heart health"));
    }

    #[test]
    fn test_render_result_without_vitamins() {
        let result = AnalysisResult {
            name_of_fruit: "Lime".into(),
            ..Default::default()
        };
        assert!(render_result(&result).contains("(なし)"));
    }

    #[test]
    fn test_render_state_ready() {
        let state = selected_state()
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisSucceeded(ResultSet::new(vec![banana(), banana()])));
        let text = render_state(&state);
        assert!(text.contains("画像: banana.jpg (image/jpeg)"));
        assert!(text.contains("プレビュー: file:///tmp/preview-1.jpg"));
        assert!(text.contains("--- 1 / 2 (Confidence: 50%) ---"));
        assert!(text.contains("Banana"));
    }

    #[test]
    fn test_render_state_error() {
        let state = SessionState::default().apply(Event::SubmitWithoutFile);
        let text = render_state(&state);
        assert!(text.contains(&SessionError::NoFileSelected.to_string()));
    }

    #[test]
    fn test_render_state_loading() {
        let state = selected_state().apply(Event::SubmitStarted);
        assert!(render_state(&state).contains("Analyzing..."));
    }

    #[test]
    fn test_actions_initial() {
        assert_eq!(available_actions(&SessionState::default()), vec![BrowseAction::Quit]);
    }

    #[test]
    fn test_actions_at_edges() {
        let state = selected_state()
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisSucceeded(ResultSet::new(vec![banana(), banana()])));
        assert_eq!(
            available_actions(&state),
            vec![BrowseAction::Next, BrowseAction::Reanalyze, BrowseAction::Quit]
        );

        let state = state.apply(Event::Next);
        assert_eq!(
            available_actions(&state),
            vec![BrowseAction::Prev, BrowseAction::Reanalyze, BrowseAction::Quit]
        );
    }

    #[test]
    fn test_actions_while_loading() {
        let state = selected_state().apply(Event::SubmitStarted);
        assert!(!available_actions(&state).contains(&BrowseAction::Reanalyze));
    }
}
