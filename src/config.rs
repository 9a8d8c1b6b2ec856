use crate::error::{FruitLensError, Result};
use fruit_lens_common::StalePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 解析APIのベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "FRUIT_LENS_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// None ならHTTPクライアントの既定値
    pub timeout_seconds: Option<u64>,
    /// 解析失敗時に前回結果を残すか
    pub keep_stale_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            timeout_seconds: None,
            keep_stale_results: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Config = serde_json::from_str(&content)?;
            // 0秒は「未設定」扱い（CLIの --set-timeout 0 と同じ）
            config.timeout_seconds = config.timeout_seconds.filter(|secs| *secs > 0);
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FruitLensError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fruit-lens").join("config.json"))
    }

    /// 実際に使うベースURL（環境変数を優先）
    pub fn api_base_url(&self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.api_base_url.clone(),
        }
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FruitLensError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_base_url = url;
        Ok(())
    }

    /// リクエストタイムアウト。None ならクライアント既定
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn stale_policy(&self) -> StalePolicy {
        if self.keep_stale_results {
            StalePolicy::Keep
        } else {
            StalePolicy::Clear
        }
    }
}
