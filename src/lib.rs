//! Fruit Lens
//!
//! 果物画像を解析APIへアップロードし、返ってきた結果をページ送りで表示する。

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod preview;
pub mod report;
pub mod selection;
pub mod session;
pub mod view;
