//! 解析結果の型定義
//!
//! - Measure: 数値または文字列で返る栄養値
//! - AnalysisResult: 1件の果物レコード
//! - ResultSet: 結果リストと現在位置（ページング）

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// `null` を既定値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 数値または文字列の栄養値
///
/// サーバーは `89` と `"89 kcal"` のどちらも返しうる。
/// 数値は元の表記のまま保持する（`2.6` は `2.6` のまま）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(serde_json::Number),
    Text(String),
}

impl Default for Measure {
    fn default() -> Self {
        Measure::Text(String::new())
    }
}

impl Measure {
    pub fn is_empty(&self) -> bool {
        matches!(self, Measure::Text(s) if s.trim().is_empty())
    }

}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Number(n) => write!(f, "{}", n),
            Measure::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for Measure {
    fn from(value: u32) -> Self {
        Measure::Number(value.into())
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Measure::Text(value.to_string())
    }
}

/// 果物1件の解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name_of_fruit: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub calories_per_100g: Measure,

    #[serde(default, deserialize_with = "null_as_default")]
    pub carbohydrates: Measure,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fiber: Measure,

    #[serde(default, deserialize_with = "null_as_default")]
    pub vitamins: Vec<String>,

    #[serde(default)]
    pub benefits_for_human_body: String,
}

/// 結果リスト + 現在位置
///
/// 不変条件: 空でなければ `current_index < len()`、空なら current は存在しない。
/// 新しい解析結果が来たら丸ごと置き換え、要素は書き換えない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    items: Vec<AnalysisResult>,
    current_index: usize,
}

impl ResultSet {
    pub fn new(items: Vec<AnalysisResult>) -> Self {
        Self {
            items,
            current_index: 0,
        }
    }

    pub fn items(&self) -> &[AnalysisResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.items.get(self.current_index)
    }

    pub fn has_prev(&self) -> bool {
        !self.is_empty() && self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.len()
    }

    /// 1つ前へ。先頭では何もしない（折り返さない）
    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current_index -= 1;
        }
    }

    /// 1つ次へ。末尾では何もしない（折り返さない）
    pub fn next(&mut self) {
        if self.has_next() {
            self.current_index += 1;
        }
    }

    /// "2 / 5" 形式の位置表示
    pub fn position_label(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{} / {}", self.current_index + 1, self.len()))
        }
    }

    /// 旧UIの「信頼度」表示: round(100 / 件数)
    ///
    /// モデルの信頼度ではなく件数からの按分にすぎない。
    pub fn share_percent(&self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        Some((100.0 / self.len() as f64).round() as u32)
    }

    pub fn into_items(self) -> Vec<AnalysisResult> {
        self.items
    }
}
