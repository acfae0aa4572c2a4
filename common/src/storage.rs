//! ストレージバックエンド抽象
//!
//! ローカルストレージ相当のキー/値ストアを差し替え可能にする。
//! Web(WASM)側はlocalStorage、テストはMemoryStorageを注入する。

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// キー/値ストアの抽象
///
/// 書き込みは容量超過で失敗しうる（呼び出し側へ伝播させる）。
/// 読み出しは失敗しない。複数実行コンテキストから同じ媒体を共有した
/// 場合はlast-writer-winsとなる（許容済みの制限）。
pub trait StorageBackend {
    /// キーの値を取得（未設定ならNone）
    fn get(&self, key: &str) -> Option<String>;

    /// 値を書き込み。容量超過は `Error::StorageQuota`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// キーを削除（存在しなければ何もしない）
    fn remove(&self, key: &str);
}

/// インメモリ実装（テスト・非永続用途）
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    /// 擬似クォータ（バイト数）。Noneなら無制限
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// クォータ付きで作成（超過時のset失敗を再現する）
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota: Some(quota_bytes),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(Error::StorageQuota(key.to_string()));
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get() {
        let storage = MemoryStorage::new();
        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key"), Some("value".to_string()));
    }

    #[test]
    fn test_memory_storage_get_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing"), None);
    }

    #[test]
    fn test_memory_storage_remove() {
        let storage = MemoryStorage::new();
        storage.set("key", "value").unwrap();
        storage.remove("key");
        assert_eq!(storage.get("key"), None);

        // 存在しないキーの削除は何も起こらない
        storage.remove("key");
    }

    #[test]
    fn test_memory_storage_quota_exceeded() {
        let storage = MemoryStorage::with_quota(8);
        assert!(storage.set("key", "short").is_ok());

        let result = storage.set("key", "a value that is way too long");
        assert!(matches!(result, Err(Error::StorageQuota(_))));

        // 失敗した書き込みは以前の値を壊さない
        assert_eq!(storage.get("key"), Some("short".to_string()));
    }
}
