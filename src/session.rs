//! 解析セッション
//!
//! 選択・送信・ページングの意図を受け取り、`SessionState` に反映する。
//! 失敗はすべて状態のエラーとして表に出し、呼び出し側には返さない。

use crate::analyzer::Analyzer;
use crate::error::Result;
use crate::preview::PreviewStore;
use crate::selection::SelectionManager;
use fruit_lens_common::{
    validate_candidate, AnalysisResult, Event, FileCandidate, ParsedResponse, ResultSet,
    SelectedImage, SessionState, StalePolicy,
};

pub struct AnalysisSession<A: Analyzer, P: PreviewStore> {
    state: SessionState,
    selection: SelectionManager<P>,
    analyzer: A,
}

impl<A: Analyzer, P: PreviewStore> AnalysisSession<A, P> {
    pub fn new(analyzer: A, preview_store: P, stale_policy: StalePolicy) -> Self {
        Self {
            state: SessionState::new(stale_policy),
            selection: SelectionManager::new(preview_store),
            analyzer,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn results(&self) -> &ResultSet {
        &self.state.results
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn preview_store(&self) -> &P {
        self.selection.store()
    }

    fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    /// 画像を選択
    ///
    /// 画像以外なら現在の選択とプレビューはそのまま
    pub fn select_file(&mut self, candidate: Option<FileCandidate>) {
        let event = match validate_candidate(candidate) {
            Ok(image) => {
                let preview_url = self.selection.issue_preview(&image);
                tracing::info!(
                    file = image.file_name(),
                    content_type = image.content_type(),
                    "画像を選択"
                );
                Event::FileAccepted { image, preview_url }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Event::FileRejected
            }
        };
        self.dispatch(event);
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.state.preview_url.as_deref()
    }

    /// 送信開始
    ///
    /// 未選択なら NoFileSelected にして None を返す（ローディングに入らない）
    pub fn begin_submit(&mut self) -> Option<SelectedImage> {
        let Some(image) = self.state.selected.clone() else {
            tracing::warn!("画像が未選択のまま送信");
            self.dispatch(Event::SubmitWithoutFile);
            return None;
        };
        self.dispatch(Event::SubmitStarted);
        Some(image)
    }

    /// 解析結果を反映
    pub fn complete_submit(&mut self, outcome: Result<ParsedResponse>) {
        match outcome {
            Ok(parsed) => {
                for rejected in &parsed.rejected {
                    tracing::warn!(key = %rejected.key, reason = %rejected.reason, "不正なエントリを除外");
                }
                tracing::info!(count = parsed.results.len(), "解析完了");
                self.dispatch(Event::AnalysisSucceeded(parsed.into_result_set()));
            }
            Err(e) => {
                tracing::error!(error = %e, "解析に失敗");
                self.dispatch(Event::AnalysisFailed);
            }
        }
    }

    /// 選択中の画像を解析
    ///
    /// `&mut self` を取るので同じセッションで送信が重なることはない。
    pub async fn submit(&mut self) {
        let Some(image) = self.begin_submit() else {
            return;
        };
        let outcome = self.analyzer.analyze(&image).await;
        self.complete_submit(outcome);
    }

    pub fn go_prev(&mut self) {
        self.dispatch(Event::Prev);
    }

    pub fn go_next(&mut self) {
        self.dispatch(Event::Next);
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.state.current_result()
    }

    /// 旧UIの信頼度表示（件数からの按分）
    pub fn share_percent(&self) -> Option<u32> {
        self.state.results.share_percent()
    }
}
