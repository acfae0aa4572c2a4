//! 解析結果キャッシュモジュール
//!
//! 画像のSHA-256ハッシュをキーにして解析結果をキャッシュし、
//! 同じメニュー写真の再解析をスキップする。翻訳先言語が違えば
//! 別の結果になるため、言語もエントリに持つ。

use crate::error::Result;
use crate::scanner::ImageInfo;
use menu_lens_common::MenuItem;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".menu-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → 解析結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// ファイル名
    pub file_name: String,
    /// ファイルサイズ
    pub file_size: u64,
    /// 翻訳先言語
    pub target_language: String,
    /// 解析結果
    pub items: Vec<MenuItem>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    /// キャッシュファイルを読み込み
    ///
    /// 破損・バージョン不一致は空キャッシュとして扱う。
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                if cache.version != Self::CURRENT_VERSION {
                    eprintln!("キャッシュバージョン不一致、再生成します");
                    return Self::default();
                }
                cache
            }
            Err(_) => Self::default(),
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let cache_path = Self::cache_path(folder);
        let file = File::create(cache_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュをルックアップ（言語一致のみヒット）
    pub fn get(&self, hash: &str, target_language: &str) -> Option<&[MenuItem]> {
        self.entries
            .get(hash)
            .filter(|e| e.target_language == target_language)
            .map(|e| e.items.as_slice())
    }

    /// キャッシュに追加
    pub fn insert(
        &mut self,
        hash: String,
        file_name: String,
        file_size: u64,
        target_language: String,
        items: Vec<MenuItem>,
    ) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                target_language,
                items,
            },
        );
    }

    /// キャッシュ件数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256ハッシュを計算
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}

/// キャッシュを使用して解析結果を取得
///
/// - キャッシュにある画像はキャッシュから取得
/// - ない画像のリスト（ハッシュ付き）を返す
pub fn filter_cached_images(
    images: &[ImageInfo],
    cache: &CacheFile,
    target_language: &str,
) -> (Vec<(String, Vec<MenuItem>)>, Vec<(ImageInfo, String)>) {
    let mut cached_results = Vec::new();
    let mut uncached_images = Vec::new();

    for img in images {
        let hash = match compute_file_hash(&img.path) {
            Ok(h) => h,
            Err(_) => {
                // ハッシュ計算失敗時は未キャッシュとして扱う
                uncached_images.push((img.clone(), String::new()));
                continue;
            }
        };

        if let Some(items) = cache.get(&hash, target_language) {
            cached_results.push((img.file_name.clone(), items.to_vec()));
        } else {
            uncached_images.push((img.clone(), hash));
        }
    }

    (cached_results, uncached_images)
}
