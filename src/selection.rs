//! 画像選択の管理
//!
//! 選択中の画像に対応するプレビューURLを1つだけ保持し、
//! 置き換え・破棄時に古いURLを解放する。

use crate::error::{FruitLensError, Result};
use crate::preview::PreviewStore;
use fruit_lens_common::{FileCandidate, SelectedImage};
use image::ImageFormat;
use std::path::Path;

/// imageクレートが知らない拡張子のMIMEタイプ
const OTHER_CONTENT_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("csv", "text/csv"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("svg", "image/svg+xml"),
];

pub struct SelectionManager<P: PreviewStore> {
    store: P,
    live_url: Option<String>,
}

impl<P: PreviewStore> SelectionManager<P> {
    pub fn new(store: P) -> Self {
        Self {
            store,
            live_url: None,
        }
    }

    /// 受理された画像のプレビューURLを発行し、以前のURLを破棄
    ///
    /// 発行に失敗した場合は None（画像自体は受理されたまま）
    pub fn issue_preview(&mut self, image: &SelectedImage) -> Option<String> {
        let issued = match self.store.create(image) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(file = image.file_name(), error = %e, "プレビューを作成できません");
                None
            }
        };

        if let Some(old) = self.live_url.take() {
            self.store.revoke(&old);
        }
        self.live_url = issued.clone();
        issued
    }

    /// 現在のプレビューURLを破棄
    pub fn release(&mut self) {
        if let Some(url) = self.live_url.take() {
            self.store.revoke(&url);
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

impl<P: PreviewStore> Drop for SelectionManager<P> {
    fn drop(&mut self) {
        self.release();
    }
}

/// 拡張子から宣言MIMEタイプを推定
pub fn guess_content_type(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    OTHER_CONTENT_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// ディスク上のファイルから選択候補を作る
pub fn candidate_from_path(path: &Path, content_type: Option<&str>) -> Result<FileCandidate> {
    if !path.is_file() {
        return Err(FruitLensError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let content_type = match content_type {
        Some(ct) => ct.to_string(),
        None => guess_content_type(path),
    };

    Ok(FileCandidate {
        file_name,
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("banana.jpg")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("banana.JPEG")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("kiwi.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("document.pdf")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("photo.heic")), "image/heic");
        assert_eq!(guess_content_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_candidate_from_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("banana.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let candidate = candidate_from_path(&path, None).unwrap();
        assert_eq!(candidate.file_name, "banana.jpg");
        assert_eq!(candidate.content_type, "image/jpeg");
        assert_eq!(candidate.bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_candidate_content_type_override() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, b"x").unwrap();

        let candidate = candidate_from_path(&path, Some("image/webp")).unwrap();
        assert_eq!(candidate.content_type, "image/webp");
    }

    #[test]
    fn test_candidate_missing_file() {
        let result = candidate_from_path(&PathBuf::from("/nonexistent/banana.jpg"), None);
        assert!(matches!(result, Err(FruitLensError::FileNotFound(_))));
    }
}
