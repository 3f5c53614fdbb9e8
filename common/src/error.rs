//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 行単位のパース失敗やフィルタ結果が空の場合はエラーにならない
/// （[`crate::report::Diagnostic`] として返す）。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
