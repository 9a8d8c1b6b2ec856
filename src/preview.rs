//! プレビューURL（表示用リソース）
//!
//! 発行したURLは置き換え時・終了時に必ず破棄する。

use crate::error::{FruitLensError, Result};
use fruit_lens_common::SelectedImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// プレビューURLの発行と破棄
pub trait PreviewStore {
    fn create(&mut self, image: &SelectedImage) -> Result<String>;
    fn revoke(&mut self, url: &str);
}

/// 一時ファイルに書き出して `file://` URLを返すストア
///
/// ストアを破棄すると一時ディレクトリごと消える。
pub struct TempFilePreviewStore {
    dir: TempDir,
    live: HashMap<String, PathBuf>,
    counter: u64,
}

impl TempFilePreviewStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("fruit-lens-preview-")
            .tempdir()
            .map_err(|e| FruitLensError::Preview(e.to_string()))?;
        Ok(Self {
            dir,
            live: HashMap::new(),
            counter: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// 未破棄のURL数
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn path_of(&self, url: &str) -> Option<&Path> {
        self.live.get(url).map(PathBuf::as_path)
    }
}

impl PreviewStore for TempFilePreviewStore {
    fn create(&mut self, image: &SelectedImage) -> Result<String> {
        self.counter += 1;
        let ext = Path::new(image.file_name())
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let path = self.dir.path().join(format!("preview-{}{}", self.counter, ext));
        std::fs::write(&path, image.bytes())
            .map_err(|e| FruitLensError::Preview(format!("{}: {}", path.display(), e)))?;

        let url = format!("file://{}", path.display());
        self.live.insert(url.clone(), path);
        Ok(url)
    }

    fn revoke(&mut self, url: &str) {
        if let Some(path) = self.live.remove(url) {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "プレビューの削除に失敗");
            }
        }
    }
}
