use anyhow::{Context, Result};
use chrono::Local;
use fruit_lens_common::{AnalysisResult, ResultSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 解析結果の保存形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source_file: String,
    pub analyzed_at: String,
    pub results: Vec<AnalysisResult>,
}

impl AnalysisReport {
    pub fn new(source_file: &str, results: &ResultSet) -> Self {
        Self {
            source_file: source_file.to_string(),
            analyzed_at: Local::now().to_rfc3339(),
            results: results.items().to_vec(),
        }
    }
}

pub fn save_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn load_report(path: &Path) -> Result<AnalysisReport> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let report = serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(report)
}
