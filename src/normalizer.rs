//! 表示用の正規化
//!
//! 価格・辛さ表記のゆれをレポート表示用に整える。
//! 保存データは変更しない（表示の直前でだけ使う）。

use regex::Regex;

/// 価格表記を「通貨記号+数値」に整える
///
/// 通貨が読み取れない場合や数値が無い場合は入力をそのまま返す。
pub fn normalize_price(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    lazy_static::lazy_static! {
        static ref PRICE_RE: Regex =
            Regex::new(r"([$€£¥₹])?\s*(\d[\d,]*(?:\.\d+)?)\s*([$€£¥₹]|円)?").unwrap();
    }

    let Some(caps) = PRICE_RE.captures(text) else {
        return text.trim().to_string();
    };

    let amount = &caps[2];
    let currency = caps
        .get(1)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");

    if currency == "円" {
        format!("{}円", amount)
    } else if currency.is_empty() {
        amount.to_string()
    } else {
        format!("{}{}", currency, amount)
    }
}

/// 辛さ表記をMild/Medium/Hotに寄せる
///
/// どれにも当たらない表記はそのまま返す。
pub fn normalize_spice_level(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return String::new();
    }
    if lower.contains("hot") || lower.contains("spicy") || lower.contains("辛") {
        return "Hot".to_string();
    }
    if lower.contains("medium") {
        return "Medium".to_string();
    }
    if lower.contains("mild") || lower.contains("none") {
        return "Mild".to_string();
    }
    text.trim().to_string()
}
