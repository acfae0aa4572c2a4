//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 破損した保存データはエラーにせず空列として読むため、
/// ここには現れない（queue::PendingScanStore::list 参照）。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage quota exceeded: {0}")]
    StorageQuota(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("History save failed: {0}")]
    HistorySave(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("No image selected")]
    EmptyImage,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
