//! 画像選択の検証ルール

use crate::error::SessionError;
use std::sync::Arc;

/// 選択候補のファイル（宣言されたMIMEタイプ付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// 受理された画像
///
/// 状態のクローンを安く保つためバイト列は共有する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `image/` で始まるMIMEタイプか
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// 選択候補を検証
///
/// 候補なし、または画像以外は `InvalidFileType`
pub fn validate_candidate(candidate: Option<FileCandidate>) -> Result<SelectedImage, SessionError> {
    match candidate {
        Some(c) if is_image_content_type(&c.content_type) => Ok(SelectedImage {
            file_name: c.file_name,
            content_type: c.content_type.trim().to_string(),
            bytes: c.bytes.into(),
        }),
        _ => Err(SessionError::InvalidFileType),
    }
}
