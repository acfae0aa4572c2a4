//! 解析結果のターミナル表示

use crate::normalizer::{normalize_price, normalize_spice_level};
use menu_lens_common::{evaluate, DietaryProfile, MenuItem};

/// 1品ぶんの表示行を組み立てる
fn format_item_lines(item: &MenuItem, profile: Option<&DietaryProfile>) -> Vec<String> {
    let mut lines = vec![format!("  {} / {}", item.translated, item.original)];

    let mut tags = Vec::new();
    if !item.category.is_empty() {
        tags.push(item.category.clone());
    }
    let price = normalize_price(&item.price);
    if !price.is_empty() {
        tags.push(price);
    }
    let spice = normalize_spice_level(&item.spice_level);
    if !spice.is_empty() && spice != "Mild" {
        tags.push(format!("🌶 {}", spice));
    }
    if !tags.is_empty() {
        lines.push(format!("    {}", tags.join(" | ")));
    }

    if !item.allergens.is_empty() {
        lines.push(format!("    アレルゲン: {}", item.allergens.join(", ")));
    }

    if let Some(profile) = profile {
        let verdict = evaluate(item, profile);
        if verdict.is_safe {
            lines.push("    ✓ プロファイル適合".to_string());
        } else {
            let reasons: Vec<&str> = verdict.violations.iter().map(|v| v.as_str()).collect();
            lines.push(format!("    ⚠ {}", reasons.join(", ")));
        }
    }

    lines
}

/// 1画像ぶんの解析結果を表示
pub fn print_results(file_name: &str, items: &[MenuItem], profile: Option<&DietaryProfile>) {
    println!("── {} ──", file_name);
    if items.is_empty() {
        println!("  （料理を検出できませんでした）");
        return;
    }

    for item in items {
        for line in format_item_lines(item, profile) {
            println!("{}", line);
        }
    }
    println!();
}

/// 全体サマリを表示
pub fn print_summary(items: &[MenuItem], profile: Option<&DietaryProfile>) {
    println!("検出数: {}品", items.len());
    if let Some(profile) = profile {
        let safe = items
            .iter()
            .filter(|item| evaluate(item, profile).is_safe)
            .count();
        println!("プロファイル適合: {}/{}品", safe, items.len());
    }
}
