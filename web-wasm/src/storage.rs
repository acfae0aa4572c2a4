//! localStorageバックエンド
//!
//! 共通ストアのStorageBackendをブラウザのlocalStorageで実装する。
//! 複数タブが同じキーを書くとlast-writer-winsになる（許容済みの制限）。

use menu_lens_common::{
    CachedTranslationStore, Error, FavoritesStore, PendingScanStore, Result, StorageBackend,
};

/// APIキーの保存キー
pub const API_KEY_KEY: &str = "menuLens_apiKey";

/// localStorage実装
#[derive(Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let Some(storage) = self.storage() else {
            return Err(Error::Storage("localStorage unavailable".into()));
        };
        // setItemの失敗は実質QuotaExceededError
        storage
            .set_item(key, value)
            .map_err(|_| Error::StorageQuota(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// 保留スキャンストア（localStorage版）
pub fn pending_store() -> PendingScanStore<LocalStorageBackend> {
    PendingScanStore::new(LocalStorageBackend)
}

/// お気に入りストア（localStorage版）
pub fn favorites_store() -> FavoritesStore<LocalStorageBackend> {
    FavoritesStore::new(LocalStorageBackend)
}

/// 翻訳キャッシュストア（localStorage版）
pub fn cache_store() -> CachedTranslationStore<LocalStorageBackend> {
    CachedTranslationStore::new(LocalStorageBackend)
}

/// 保存済みAPIキーの読み出し
pub fn load_api_key() -> Option<String> {
    LocalStorageBackend.get(API_KEY_KEY)
}

/// APIキーの保存（クォータ超過は伝播）
pub fn save_api_key(api_key: &str) -> Result<()> {
    LocalStorageBackend.set(API_KEY_KEY, api_key)
}

/// APIキーの削除
pub fn clear_api_key() {
    LocalStorageBackend.remove(API_KEY_KEY);
}
