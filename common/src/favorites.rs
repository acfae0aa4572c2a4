//! お気に入り・翻訳キャッシュストア
//!
//! どちらも保留スキャンキューと同じストレージバックエンドに
//! JSON配列として保持する。料理の同一性は`original`の文字列一致。

use crate::error::Result;
use crate::storage::StorageBackend;
use crate::types::{CachedTranslation, MenuItem};

/// お気に入りの保存キー
pub const FAVORITES_KEY: &str = "menuLensFavorites";

/// 翻訳キャッシュの保存キー
pub const CACHED_TRANSLATIONS_KEY: &str = "restroGuide_cachedTranslations";

/// 翻訳キャッシュの保持件数（クォータ対策で最新のみ残す）
pub const MAX_CACHED_TRANSLATIONS: usize = 10;

/// お気に入りストア
pub struct FavoritesStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> FavoritesStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// 保存済みのお気に入り一覧（破損・未保存は空列）
    pub fn list(&self) -> Vec<MenuItem> {
        let Some(stored) = self.backend.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&stored).unwrap_or_default()
    }

    /// `original`一致で判定したお気に入り状態
    pub fn is_favorite(&self, original: &str) -> bool {
        self.list().iter().any(|fav| fav.original == original)
    }

    /// お気に入りの追加/削除をトグルし、トグル後の状態を返す
    ///
    /// 既にあれば除去、なければ末尾に追加。同名の別料理は区別できない
    /// （`original`一致が同一性の定義）。
    pub fn toggle(&self, item: &MenuItem) -> Result<bool> {
        let mut favorites = self.list();
        let exists = favorites.iter().any(|fav| fav.original == item.original);

        if exists {
            favorites.retain(|fav| fav.original != item.original);
        } else {
            favorites.push(item.clone());
        }
        self.persist(&favorites)?;
        Ok(!exists)
    }

    fn persist(&self, favorites: &[MenuItem]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.backend.set(FAVORITES_KEY, &json)
    }
}

/// 翻訳キャッシュストア（最新10件のみ保持）
pub struct CachedTranslationStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> CachedTranslationStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Vec<CachedTranslation> {
        let Some(stored) = self.backend.get(CACHED_TRANSLATIONS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&stored).unwrap_or_default()
    }

    /// 新しい結果を先頭に追加し、古い分は切り捨てて永続化
    pub fn save(
        &self,
        menu_items: &[MenuItem],
        image_data: &str,
        original_text: &str,
        translated_text: &str,
        now_ms: u64,
    ) -> Result<CachedTranslation> {
        let mut cache = self.list();
        let entry = CachedTranslation {
            id: format!("{}-{}", now_ms, cache.len()),
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            menu_items: menu_items.to_vec(),
            image_data: image_data.to_string(),
            timestamp: now_ms,
        };
        cache.insert(0, entry.clone());
        cache.truncate(MAX_CACHED_TRANSLATIONS);

        let json = serde_json::to_string(&cache)?;
        self.backend.set(CACHED_TRANSLATIONS_KEY, &json)?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn dish(original: &str) -> MenuItem {
        MenuItem {
            original: original.to_string(),
            translated: format!("{} (translated)", original),
            ..Default::default()
        }
    }

    // =============================================
    // FavoritesStore テスト
    // =============================================

    #[test]
    fn test_toggle_adds_then_removes() {
        let store = FavoritesStore::new(MemoryStorage::new());

        assert!(store.toggle(&dish("Laksa")).unwrap());
        assert!(store.is_favorite("Laksa"));
        assert_eq!(store.list().len(), 1);

        assert!(!store.toggle(&dish("Laksa")).unwrap());
        assert!(!store.is_favorite("Laksa"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_identity_is_original_text() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.toggle(&dish("Curry")).unwrap();

        // translatedが違っても originalが同じなら同一料理扱い
        let mut other = dish("Curry");
        other.translated = "カレー".to_string();
        assert!(!store.toggle(&other).unwrap());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_favorites_corrupt_data_reads_empty() {
        let backend = MemoryStorage::new();
        backend.set(FAVORITES_KEY, "not json").unwrap();

        let store = FavoritesStore::new(backend);
        assert!(store.list().is_empty());
    }

    // =============================================
    // CachedTranslationStore テスト
    // =============================================

    #[test]
    fn test_cache_keeps_last_ten() {
        let store = CachedTranslationStore::new(MemoryStorage::new());

        for i in 0..12 {
            store
                .save(&[dish("Dish")], "img", &format!("orig-{}", i), "trans", i as u64)
                .unwrap();
        }

        let cache = store.list();
        assert_eq!(cache.len(), MAX_CACHED_TRANSLATIONS);
        // 新しい順
        assert_eq!(cache[0].original_text, "orig-11");
        assert_eq!(cache[9].original_text, "orig-2");
    }

    #[test]
    fn test_cache_entry_contents() {
        let store = CachedTranslationStore::new(MemoryStorage::new());
        let entry = store
            .save(&[dish("Bibimbap")], "img-data", "비빔밥", "Bibimbap", 1_000)
            .unwrap();

        assert_eq!(entry.menu_items.len(), 1);
        assert_eq!(entry.original_text, "비빔밥");
        assert_eq!(entry.image_data, "img-data");
        assert_eq!(entry.timestamp, 1_000);
    }
}
