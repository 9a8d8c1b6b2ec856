//! 解析APIへのmultipartアップロード

use super::Analyzer;
use crate::config::Config;
use crate::error::{FruitLensError, Result};
use fruit_lens_common::{parse_analysis_response, ParsedResponse, SelectedImage};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub const ANALYZE_PATH: &str = "/api/v1/analyze-image";

/// エラー本文をログに載せる上限
const MAX_ERROR_BODY: usize = 512;

/// ベースURLから解析エンドポイントを組み立てる
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), ANALYZE_PATH)
}

pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint_url(base_url),
        })
    }

    /// 設定から作成。`api_url` を渡すと設定・環境変数より優先
    pub fn from_config(config: &Config, api_url: Option<&str>) -> Result<Self> {
        let base_url = match api_url {
            Some(url) => url.to_string(),
            None => config.api_base_url(),
        };
        Self::new(&base_url, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, image: &SelectedImage) -> Result<ParsedResponse> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.content_type())?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file = image.file_name(),
            bytes = image.len(),
            "アップロード開始"
        );

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), len = body.len(), "レスポンス受信");

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(FruitLensError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(parse_analysis_response(&body)?)
    }
}
