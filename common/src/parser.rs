//! APIレスポンスパーサー
//!
//! `/api/v1/analyze-image` のレスポンス
//! `{ "fruit_analysis": { <任意キー>: {...}, ... } }` を順序付きリストに正規化する。
//! キーは捨て、値をサーバーが返した順に並べる。

use crate::error::{Error, Result};
use crate::results::{AnalysisResult, ResultSet};
use serde_json::Value;

/// 結果マップのフィールド名
pub const FRUIT_ANALYSIS_FIELD: &str = "fruit_analysis";

/// 検証で弾かれたエントリ
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    pub key: String,
    pub reason: String,
}

/// 正規化済みレスポンス
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    pub results: Vec<AnalysisResult>,
    pub rejected: Vec<RejectedEntry>,
}

impl ParsedResponse {
    pub fn into_result_set(self) -> ResultSet {
        ResultSet::new(self.results)
    }
}

/// レスポンス本文をパース
///
/// 不正なエントリは個別に除外し、バッチ全体は失敗させない。
/// ただし空でないマップの全エントリが不正な場合は本文不正として扱う。
///
/// # Examples
/// ```
/// use fruit_lens_common::parse_analysis_response;
///
/// let body = r#"{"fruit_analysis": {"x": {"name_of_fruit": "Banana"}}}"#;
/// let parsed = parse_analysis_response(body).unwrap();
/// assert_eq!(parsed.results[0].name_of_fruit, "Banana");
/// ```
pub fn parse_analysis_response(body: &str) -> Result<ParsedResponse> {
    let value: Value = serde_json::from_str(body.trim())?;
    normalize_response(value)
}

/// パース済みJSONを正規化
pub fn normalize_response(value: Value) -> Result<ParsedResponse> {
    let Value::Object(mut root) = value else {
        return Err(Error::Parse("レスポンスがJSONオブジェクトではありません".into()));
    };

    let entries = match root.remove(FRUIT_ANALYSIS_FIELD) {
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(Error::Parse(format!(
                "{} がオブジェクトではありません",
                FRUIT_ANALYSIS_FIELD
            )))
        }
        None => {
            return Err(Error::Parse(format!(
                "{} がありません",
                FRUIT_ANALYSIS_FIELD
            )))
        }
    };

    let total = entries.len();
    let mut parsed = ParsedResponse::default();

    for (key, entry) in entries {
        match serde_json::from_value::<AnalysisResult>(entry) {
            Ok(result) => parsed.results.push(result),
            Err(e) => parsed.rejected.push(RejectedEntry {
                key,
                reason: e.to_string(),
            }),
        }
    }

    if total > 0 && parsed.results.is_empty() {
        return Err(Error::Parse(format!(
            "{} の全エントリ({}件)が不正です",
            FRUIT_ANALYSIS_FIELD, total
        )));
    }

    Ok(parsed)
}
