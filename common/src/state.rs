//! セッション状態と純粋な状態遷移
//!
//! `SessionState::apply(event)` は副作用を持たない。
//! プレビューURLの発行・破棄やHTTP送信は呼び出し側が行い、
//! その結果をイベントとして渡す。
//!
//! ## 旧挙動について
//! - 解析開始時にエラーは消すが、前回の結果は消さない
//! - 解析失敗時も前回の結果と現在位置はそのまま残る
//!
//! `StalePolicy::Clear` を選ぶと解析開始時に結果を破棄する。

use crate::error::SessionError;
use crate::results::{AnalysisResult, ResultSet};
use crate::selection::SelectedImage;

/// 前回結果の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// 前回結果を残す（旧UIと同じ）
    #[default]
    Keep,
    /// 解析開始時に前回結果を破棄する
    Clear,
}

/// 状態遷移イベント
#[derive(Debug, Clone)]
pub enum Event {
    /// 画像を受理（プレビューURLは発行済み、発行失敗なら None）
    FileAccepted {
        image: SelectedImage,
        preview_url: Option<String>,
    },
    /// 画像以外が選ばれた
    FileRejected,
    /// 画像未選択のまま送信
    SubmitWithoutFile,
    /// 送信開始
    SubmitStarted,
    /// 解析成功
    AnalysisSucceeded(ResultSet),
    /// 解析失敗（通信・ステータス・本文のいずれか）
    AnalysisFailed,
    Prev,
    Next,
}

/// 表示用のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Error(SessionError),
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub selected: Option<SelectedImage>,
    pub preview_url: Option<String>,
    pub loading: bool,
    pub error: Option<SessionError>,
    pub results: ResultSet,
    pub stale_policy: StalePolicy,
}

impl SessionState {
    pub fn new(stale_policy: StalePolicy) -> Self {
        Self {
            stale_policy,
            ..Default::default()
        }
    }

    /// イベントを適用して次の状態を返す
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::FileAccepted { image, preview_url } => {
                self.selected = Some(image);
                self.preview_url = preview_url;
                self.error = None;
            }
            Event::FileRejected => {
                self.error = Some(SessionError::InvalidFileType);
            }
            Event::SubmitWithoutFile => {
                self.error = Some(SessionError::NoFileSelected);
            }
            Event::SubmitStarted => {
                self.loading = true;
                self.error = None;
                if self.stale_policy == StalePolicy::Clear {
                    self.results = ResultSet::default();
                }
            }
            Event::AnalysisSucceeded(results) => {
                self.loading = false;
                self.results = ResultSet::new(results.into_items());
            }
            Event::AnalysisFailed => {
                self.loading = false;
                self.error = Some(SessionError::AnalysisRequestFailed);
            }
            Event::Prev => self.results.prev(),
            Event::Next => self.results.next(),
        }
        self
    }

    /// 送信ボタンを有効にできるか
    pub fn can_submit(&self) -> bool {
        !self.loading && self.selected.is_some()
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.results.current()
    }

    /// 表示用フェーズ
    ///
    /// エラーと前回結果は共存しうるが、表示上はエラーを優先する。
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if let Some(err) = self.error {
            Phase::Error(err)
        } else if !self.results.is_empty() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{validate_candidate, FileCandidate};

    fn image(name: &str) -> SelectedImage {
        validate_candidate(Some(FileCandidate::new(name, "image/jpeg", vec![1, 2, 3]))).unwrap()
    }

    fn fruits(names: &[&str]) -> ResultSet {
        ResultSet::new(
            names
                .iter()
                .map(|n| AnalysisResult {
                    name_of_fruit: n.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn ready_state(names: &[&str]) -> SessionState {
        SessionState::default()
            .apply(Event::FileAccepted {
                image: image("banana.jpg"),
                preview_url: Some("file:///tmp/preview".into()),
            })
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisSucceeded(fruits(names)))
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::default();
        assert!(state.selected.is_none());
        assert!(state.preview_url.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.results.is_empty());
        assert!(!state.can_submit());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_file_accepted_clears_error() {
        let state = SessionState::default()
            .apply(Event::FileRejected)
            .apply(Event::FileAccepted {
                image: image("banana.jpg"),
                preview_url: Some("file:///tmp/a".into()),
            });
        assert!(state.error.is_none());
        assert_eq!(state.preview_url.as_deref(), Some("file:///tmp/a"));
        assert!(state.can_submit());
    }

    #[test]
    fn test_file_rejected_keeps_previous_selection() {
        let state = SessionState::default()
            .apply(Event::FileAccepted {
                image: image("banana.jpg"),
                preview_url: Some("file:///tmp/a".into()),
            })
            .apply(Event::FileRejected);
        assert_eq!(state.selected.as_ref().unwrap().file_name(), "banana.jpg");
        assert_eq!(state.preview_url.as_deref(), Some("file:///tmp/a"));
        assert_eq!(state.error, Some(SessionError::InvalidFileType));
    }

    #[test]
    fn test_submit_without_file() {
        let state = SessionState::default().apply(Event::SubmitWithoutFile);
        assert_eq!(state.error, Some(SessionError::NoFileSelected));
        assert!(!state.loading);
    }

    #[test]
    fn test_submit_started_disables_submit() {
        let state = SessionState::default()
            .apply(Event::FileAccepted {
                image: image("banana.jpg"),
                preview_url: None,
            })
            .apply(Event::SubmitStarted);
        assert!(state.loading);
        assert!(!state.can_submit());
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn test_success_resets_index() {
        let mut state = ready_state(&["Banana", "Apple", "Kiwi"]);
        state = state.apply(Event::Next).apply(Event::Next);
        assert_eq!(state.results.current_index(), 2);

        let state = state
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisSucceeded(fruits(&["Mango", "Pear"])));
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.results.current_index(), 0);
        assert_eq!(state.current_result().unwrap().name_of_fruit, "Mango");
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_success_with_moved_set_still_starts_at_zero() {
        let mut moved = fruits(&["A", "B"]);
        moved.next();
        let state = ready_state(&["X"]).apply(Event::AnalysisSucceeded(moved));
        assert_eq!(state.results.current_index(), 0);
    }

    #[test]
    fn test_failure_keeps_stale_results() {
        // 旧挙動: 失敗しても前回の結果と位置は残る
        let before = ready_state(&["Banana", "Apple"]).apply(Event::Next);
        let after = before
            .clone()
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisFailed);

        assert_eq!(after.results, before.results);
        assert_eq!(after.results.current_index(), 1);
        assert_eq!(after.error, Some(SessionError::AnalysisRequestFailed));
        assert!(!after.loading);
        assert_eq!(after.phase(), Phase::Error(SessionError::AnalysisRequestFailed));
    }

    #[test]
    fn test_submit_start_keeps_stale_results() {
        let state = ready_state(&["Banana"]).apply(Event::SubmitStarted);
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn test_clear_policy_drops_results_on_submit() {
        let state = SessionState::new(StalePolicy::Clear)
            .apply(Event::FileAccepted {
                image: image("banana.jpg"),
                preview_url: None,
            })
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisSucceeded(fruits(&["Banana"])))
            .apply(Event::SubmitStarted);
        assert!(state.results.is_empty());

        let state = state.apply(Event::AnalysisFailed);
        assert!(state.results.is_empty());
        assert!(state.current_result().is_none());
    }

    #[test]
    fn test_prev_next_clamped() {
        let state = ready_state(&["A", "B"]).apply(Event::Prev);
        assert_eq!(state.results.current_index(), 0);
        let state = state.apply(Event::Next).apply(Event::Next).apply(Event::Next);
        assert_eq!(state.results.current_index(), 1);
    }

    #[test]
    fn test_prev_next_on_empty_is_noop() {
        let state = SessionState::default().apply(Event::Next).apply(Event::Prev);
        assert!(state.current_result().is_none());
        assert_eq!(state.results.current_index(), 0);
    }

    #[test]
    fn test_session_is_reenterable() {
        let state = ready_state(&["A"])
            .apply(Event::SubmitStarted)
            .apply(Event::AnalysisFailed)
            .apply(Event::SubmitStarted);
        assert!(state.error.is_none());
        let state = state.apply(Event::AnalysisSucceeded(fruits(&["B", "C"])));
        assert_eq!(state.current_result().unwrap().name_of_fruit, "B");
    }
}
