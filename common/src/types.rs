//! データモデルの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - MenuItem: 解析結果の1品
//! - PendingScan: オフライン時に退避したスキャン
//! - DietaryProfile: ユーザーの食事制限フラグ
//! - CachedTranslation: 直近の翻訳結果キャッシュ
//! - AuthUser / HistoryRecord: 外部サーバー連携用

use serde::{Deserialize, Serialize};

/// 解析結果の1品（リモート解析の出力）
///
/// AIが省略したフィールドはデフォルト値で埋める。
/// 同一料理の判定は `original` の文字列一致（原文名が同じ別料理は
/// 衝突するが、これは仕様上の同一性定義）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub original: String,
    pub translated: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub dietary: Vec<String>,
    pub spice_level: String,
    pub category: String,
    pub price: String,
    pub allergens: Vec<String>,
}

/// オフライン時に退避したスキャン
///
/// 作成時にid・タイムスタンプを採番し、ユーザーが読み戻した時点で
/// キューから除去される（その後の解析成否とは無関係）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingScan {
    pub id: String,
    pub image_data: String,
    /// 作成時刻（エポックからのミリ秒）
    pub timestamp: u64,
}

/// ユーザーの食事制限フラグ（全て独立したboolean）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietaryProfile {
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub has_nut_allergy: bool,
    pub has_dairy_allergy: bool,
}

/// 直近の翻訳結果キャッシュ（最新10件のみ保持）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CachedTranslation {
    pub id: String,
    pub original_text: String,
    pub translated_text: String,
    pub menu_items: Vec<MenuItem>,
    pub image_data: String,
    pub timestamp: u64,
}

/// Google OAuthで認証したユーザー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
}

/// 履歴サーバーの1行（カラム名はサーバーのsnake_caseのまま）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    pub id: i64,
    pub user_id: String,
    pub original_text: String,
    pub translated_text: String,
    pub image_data: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_default() {
        let item = MenuItem::default();
        assert_eq!(item.original, "");
        assert!(item.dietary.is_empty());
        assert!(item.allergens.is_empty());
    }

    #[test]
    fn test_menu_item_serialize() {
        let item = MenuItem {
            original: "Paneer Tikka".to_string(),
            translated: "パニールティッカ".to_string(),
            dietary: vec!["Vegetarian".to_string()],
            spice_level: "Medium".to_string(),
            allergens: vec!["dairy".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_string(&item).expect("シリアライズ失敗");
        assert!(json.contains("\"original\":\"Paneer Tikka\""));
        assert!(json.contains("\"spiceLevel\":\"Medium\""));
        assert!(json.contains("\"allergens\":[\"dairy\"]"));
    }

    #[test]
    fn test_menu_item_deserialize_missing_fields() {
        // AIがフィールドを省略してもデシリアライズできること
        let json = r#"{"original": "Pho", "translated": "フォー"}"#;

        let item: MenuItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item.original, "Pho");
        assert_eq!(item.translated, "フォー");
        assert_eq!(item.spice_level, ""); // デフォルト値
        assert!(item.ingredients.is_empty()); // デフォルト値
    }

    #[test]
    fn test_menu_item_roundtrip() {
        let original = MenuItem {
            original: "Moules frites".to_string(),
            translated: "ムール貝とフライドポテト".to_string(),
            description: "白ワイン蒸しのムール貝".to_string(),
            ingredients: vec!["mussels".to_string(), "potato".to_string()],
            dietary: vec![],
            spice_level: "Mild".to_string(),
            category: "Main".to_string(),
            price: "€18".to_string(),
            allergens: vec!["shellfish".to_string()],
        };

        let json = serde_json::to_string(&original).expect("シリアライズ失敗");
        let restored: MenuItem = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(original, restored);
    }

    #[test]
    fn test_pending_scan_serialize_camel_case() {
        // 保存形式はimageDataのcamelCase（既存の保存データと互換）
        let scan = PendingScan {
            id: "1700000000000-0".to_string(),
            image_data: "/9j/4AAQ".to_string(),
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&scan).expect("シリアライズ失敗");
        assert!(json.contains("\"imageData\":\"/9j/4AAQ\""));
        assert!(json.contains("\"timestamp\":1700000000000"));
    }

    #[test]
    fn test_dietary_profile_default_all_false() {
        let profile = DietaryProfile::default();
        assert!(!profile.is_vegetarian);
        assert!(!profile.is_vegan);
        assert!(!profile.is_gluten_free);
        assert!(!profile.has_nut_allergy);
        assert!(!profile.has_dairy_allergy);
    }

    #[test]
    fn test_dietary_profile_deserialize() {
        let json = r#"{"isVegan": true, "hasNutAllergy": true}"#;

        let profile: DietaryProfile = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(profile.is_vegan);
        assert!(profile.has_nut_allergy);
        assert!(!profile.is_vegetarian); // デフォルト値
    }

    #[test]
    fn test_history_record_deserialize_snake_case() {
        // サーバーはSELECT *の行をそのまま返すのでsnake_case
        let json = r#"{
            "id": 3,
            "user_id": "u-123",
            "original_text": "Ceviche",
            "translated_text": "セビーチェ",
            "created_at": "2026-08-06 12:00:00"
        }"#;

        let record: HistoryRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.id, 3);
        assert_eq!(record.user_id, "u-123");
        assert_eq!(record.image_data, ""); // デフォルト値
    }
}
