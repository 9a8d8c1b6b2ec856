use thiserror::Error;

#[derive(Error, Debug)]
pub enum FruitLensError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("プレビュー作成エラー: {0}")]
    Preview(String),

    #[error("API呼び出しエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APIがエラーを返しました (HTTP {status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] fruit_lens_common::Error),
}

pub type Result<T> = std::result::Result<T, FruitLensError>;
