//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - TARGET_LANGUAGES: 翻訳先言語の定数
//! - build_menu_prompt: メニュー解析用プロンプト
//! - build_dish_info_prompt: 料理情報検索用プロンプト
//! - build_dish_video_prompt: 料理動画生成用プロンプト

use crate::dietary::{AllergenLabel, DietaryLabel};

/// 翻訳先言語（表示用の国旗付き）
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("English", "🇬🇧"),
    ("Spanish", "🇪🇸"),
    ("French", "🇫🇷"),
    ("German", "🇩🇪"),
    ("Hindi", "🇮🇳"),
    ("Chinese", "🇨🇳"),
    ("Japanese", "🇯🇵"),
    ("Korean", "🇰🇷"),
    ("Arabic", "🇸🇦"),
    ("Italian", "🇮🇹"),
];

/// メニュー解析プロンプト生成
///
/// dietary/allergensはプロンプト側で閉集合に制約する。判定器は
/// 完全一致しか見ないため、ここで語彙を固定しておく。
///
/// # Arguments
/// * `target_language` - 翻訳先言語（例: "English"）
///
/// # Returns
/// メニュー解析用のプロンプト文字列
pub fn build_menu_prompt(target_language: &str) -> String {
    let dietary_labels = DietaryLabel::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let allergen_labels = AllergenLabel::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a menu translator. Analyze this menu image and return ONLY a JSON array (no markdown, no explanation):

[
  {{
    "original": "dish name in source language",
    "translated": "dish name in {target_language}",
    "description": "2-3 sentence description with taste, preparation, origin",
    "ingredients": ["ingredient1", "ingredient2", "ingredient3"],
    "dietary": ["Vegetarian", "Vegan", "Gluten-Free"],
    "spiceLevel": "Mild/Medium/Hot",
    "category": "Appetizer/Main/Dessert/Beverage",
    "price": "$12",
    "allergens": ["dairy", "nuts"]
  }}
]

Rules:
- "dietary" may only contain labels the dish satisfies, from: {dietary_labels}
- "allergens" may only contain labels the dish contains, from: {allergen_labels}
- Use the exact spelling and casing above

Extract all menu items. If unclear, make best effort. Be culturally accurate."#
    )
}

/// 料理情報検索プロンプト生成（検索ツール併用前提）
pub fn build_dish_info_prompt(dish_name: &str) -> String {
    format!(
        "Find detailed information about the dish \"{dish_name}\" including its origin, \
         key ingredients, and cultural significance."
    )
}

/// 料理動画生成プロンプト生成
pub fn build_dish_video_prompt(translated: &str, description: &str) -> String {
    format!(
        "Cinematic shot of {translated}, {description}. \
         Professional food photography, 4k, highly detailed."
    )
}
