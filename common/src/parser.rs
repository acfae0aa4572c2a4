//! APIレスポンスパーサー
//!
//! Gemini APIのレスポンステキストからJSONを抽出し、
//! MenuItemの配列をパースする

use crate::error::{Error, Result};
use crate::types::MenuItem;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
///
/// # Arguments
/// * `response` - APIレスポンス文字列
///
/// # Returns
/// * `Ok(&str)` - 抽出されたJSON文字列
/// * `Err` - JSONが見つからない場合
///
/// # Examples
/// ```
/// use menu_lens_common::extract_json;
///
/// let response = "[{\"original\": \"Pho\"}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("Pho"));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の [...] を探す
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// メニュー解析レスポンスをパース
///
/// # Arguments
/// * `response` - 解析APIのレスポンステキスト
///
/// # Returns
/// * `Ok(Vec<MenuItem>)` - パース成功
/// * `Err` - JSONが見つからないかパース失敗
pub fn parse_menu_response(response: &str) -> Result<Vec<MenuItem>> {
    let json_str = extract_json(response)?;
    let items: Vec<MenuItem> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("メニューJSONパースエラー: {}", e)))?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here is the menu:
```json
[
  {"original": "Tacos al pastor", "translated": "Pork Tacos"}
]
```
Some additional text."#;

        let json = extract_json(response).unwrap();
        assert!(json.contains("original"));
        assert!(json.contains("Tacos al pastor"));
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"[{"original": "Pad Thai", "spiceLevel": "Medium"}]"#;

        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"[{"original": "Pad Thai", "spiceLevel": "Medium"}]"#);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Here is the result: [{"original": "Gyoza"}] and some more text."#;

        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"[{"original": "Gyoza"}]"#);
    }

    #[test]
    fn test_extract_json_error() {
        let response = "No JSON here, just plain text.";

        let result = extract_json(response);
        assert!(result.is_err());
        if let Err(Error::Parse(msg)) = result {
            assert!(msg.contains("JSONが見つかりません"));
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_extract_json_empty_response() {
        let result = extract_json("");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_json_nested_brackets() {
        let response = r#"[{"ingredients": ["rice", "egg"], "dietary": ["Vegetarian"]}]"#;

        let json = extract_json(response).unwrap();
        assert!(json.contains("ingredients"));
        assert!(json.contains("Vegetarian"));
    }

    // =============================================
    // parse_menu_response テスト
    // =============================================

    #[test]
    fn test_parse_menu_response() {
        let response = r#"```json
[
  {
    "original": "Saag Paneer",
    "translated": "ほうれん草とチーズのカレー",
    "description": "クリーミーなほうれん草カレー",
    "ingredients": ["spinach", "paneer", "cream"],
    "dietary": ["Vegetarian", "Gluten-Free"],
    "spiceLevel": "Medium",
    "category": "Main",
    "price": "$14",
    "allergens": ["dairy"]
  }
]
```"#;

        let items = parse_menu_response(response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original, "Saag Paneer");
        assert_eq!(items[0].dietary, vec!["Vegetarian", "Gluten-Free"]);
        assert_eq!(items[0].allergens, vec!["dairy"]);
        assert_eq!(items[0].spice_level, "Medium");
    }

    #[test]
    fn test_parse_menu_response_multiple() {
        let response = r#"[
  {"original": "Bruschetta", "category": "Appetizer"},
  {"original": "Tiramisu", "category": "Dessert"}
]"#;

        let items = parse_menu_response(response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].original, "Bruschetta");
        assert_eq!(items[1].original, "Tiramisu");
    }

    #[test]
    fn test_parse_menu_response_minimal_fields() {
        let response = r#"[{"original": "Som Tam"}]"#;

        let items = parse_menu_response(response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original, "Som Tam");
        assert_eq!(items[0].translated, ""); // デフォルト値
        assert!(items[0].allergens.is_empty()); // デフォルト値
    }

    #[test]
    fn test_parse_menu_response_empty_array() {
        let items = parse_menu_response("[]").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_menu_response_error() {
        let result = parse_menu_response("Invalid response without JSON");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_menu_response_malformed_json() {
        let result = parse_menu_response(r#"[{"original": }]"#);
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
