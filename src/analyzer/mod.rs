mod http;

pub use http::{endpoint_url, HttpAnalyzer, ANALYZE_PATH};

use crate::error::Result;
use fruit_lens_common::{ParsedResponse, SelectedImage};

/// 画像解析サービス
///
/// 1回の呼び出しで1回だけアップロードする。リトライはしない。
#[allow(async_fn_in_trait)]
pub trait Analyzer {
    async fn analyze(&self, image: &SelectedImage) -> Result<ParsedResponse>;
}
