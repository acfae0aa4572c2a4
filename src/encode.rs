//! 画像の読み込み・縮小・Base64エンコード
//!
//! アップロード前に長辺をmax_size以下へ縮小し、JPEGで再エンコードする。
//! 複数枚はrayonで並列に処理する。

use crate::error::{MenuLensError, Result};
use crate::scanner::ImageInfo;
use base64::Engine;
use rayon::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// 1枚をBase64エンコード
pub fn encode_image(path: &Path, max_size: u32) -> Result<String> {
    let img = image::open(path)
        .map_err(|e| MenuLensError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let img = if img.width() > max_size || img.height() > max_size {
        img.resize(max_size, max_size, image::imageops::FilterType::Triangle)
    } else {
        img
    };

    let mut buffer = Vec::new();
    img.to_rgb8()
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Jpeg)
        .map_err(|e| MenuLensError::ImageLoad(e.to_string()))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(&buffer))
}

/// 複数枚を並列エンコード（入力順を保つ）
pub fn encode_images(images: &[ImageInfo], max_size: u32) -> Vec<(ImageInfo, Result<String>)> {
    images
        .par_iter()
        .map(|img| (img.clone(), encode_image(&img.path, max_size)))
        .collect()
}
