//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 画面に表示されるセッションエラー
///
/// メッセージ文字列のみが利用者に見える。構造化コードは持たない。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please select a valid image file")]
    InvalidFileType,

    #[error("Please select an image first")]
    NoFileSelected,

    #[error("Failed to analyze the image. Please try again.")]
    AnalysisRequestFailed,
}
