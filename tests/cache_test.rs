//! 解析結果キャッシュのテスト
//!
//! 保存・読み込み・ハッシュ照合・言語別ヒットの検証

use menu_lens::cache::{compute_file_hash, filter_cached_images, CacheFile};
use menu_lens::scanner::ImageInfo;
use menu_lens_common::MenuItem;
use tempfile::tempdir;

fn dish(original: &str) -> MenuItem {
    MenuItem {
        original: original.to_string(),
        translated: format!("{} (en)", original),
        ..Default::default()
    }
}

fn write_image(dir: &std::path::Path, name: &str, content: &[u8]) -> ImageInfo {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    ImageInfo {
        path,
        file_name: name.to_string(),
    }
}

/// 保存して読み戻すとエントリが残っている
#[test]
fn test_cache_roundtrip() {
    let dir = tempdir().unwrap();

    let mut cache = CacheFile::default();
    cache.insert(
        "hash-1".to_string(),
        "menu.jpg".to_string(),
        1024,
        "English".to_string(),
        vec![dish("Pho")],
    );
    cache.save(dir.path()).unwrap();

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);
    let items = loaded.get("hash-1", "English").unwrap();
    assert_eq!(items[0].original, "Pho");
}

/// キャッシュファイルが無ければ空
#[test]
fn test_cache_load_missing() {
    let dir = tempdir().unwrap();
    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// 破損したキャッシュファイルは空として読む
#[test]
fn test_cache_load_corrupt() {
    let dir = tempdir().unwrap();
    std::fs::write(CacheFile::cache_path(dir.path()), "{broken json").unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// 言語が違えばヒットしない
#[test]
fn test_cache_language_mismatch() {
    let mut cache = CacheFile::default();
    cache.insert(
        "hash-1".to_string(),
        "menu.jpg".to_string(),
        1024,
        "English".to_string(),
        vec![dish("Pho")],
    );

    assert!(cache.get("hash-1", "English").is_some());
    assert!(cache.get("hash-1", "Japanese").is_none());
    assert!(cache.get("hash-2", "English").is_none());
}

/// 同じ内容のファイルは同じハッシュになる
#[test]
fn test_compute_file_hash_stable() {
    let dir = tempdir().unwrap();
    let a = write_image(dir.path(), "a.jpg", b"same content");
    let b = write_image(dir.path(), "b.jpg", b"same content");
    let c = write_image(dir.path(), "c.jpg", b"other content");

    let hash_a = compute_file_hash(&a.path).unwrap();
    let hash_b = compute_file_hash(&b.path).unwrap();
    let hash_c = compute_file_hash(&c.path).unwrap();

    assert_eq!(hash_a, hash_b);
    assert_ne!(hash_a, hash_c);
    // SHA-256の16進表現
    assert_eq!(hash_a.len(), 64);
}

/// キャッシュ済み画像とそれ以外の振り分け
#[test]
fn test_filter_cached_images() {
    let dir = tempdir().unwrap();
    let cached_img = write_image(dir.path(), "cached.jpg", b"cached image");
    let fresh_img = write_image(dir.path(), "fresh.jpg", b"fresh image");

    let mut cache = CacheFile::default();
    let hash = compute_file_hash(&cached_img.path).unwrap();
    cache.insert(
        hash,
        "cached.jpg".to_string(),
        12,
        "English".to_string(),
        vec![dish("Ramen")],
    );

    let (cached, uncached) =
        filter_cached_images(&[cached_img, fresh_img], &cache, "English");

    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].0, "cached.jpg");
    assert_eq!(cached[0].1[0].original, "Ramen");

    assert_eq!(uncached.len(), 1);
    assert_eq!(uncached[0].0.file_name, "fresh.jpg");
    assert!(!uncached[0].1.is_empty()); // ハッシュ計算済み
}
