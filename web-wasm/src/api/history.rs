//! 履歴・認証サーバーAPIクライアント
//!
//! - POST /api/history: スキャンのサマリ保存（ベストエフォート）
//! - GET  /api/history?userId=: 履歴一覧（新しい順）
//! - GET  /api/auth/url: Google OAuthの認証URL

use super::fetch_json;
use menu_lens_common::{Error, HistoryRecord, HistorySink, Result};
use serde::{Deserialize, Serialize};

/// 履歴保存リクエスト（サーバーはcamelCaseボディを期待する）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveHistoryRequest<'a> {
    user_id: &'a str,
    original_text: &'a str,
    translated_text: &'a str,
    image_data: &'a str,
}

#[derive(Deserialize)]
struct SaveHistoryResponse {
    id: i64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AuthUrlResponse {
    url: String,
}

/// 履歴サーバークライアント
#[derive(Clone, Copy, Default)]
pub struct HistoryApi;

impl HistorySink for HistoryApi {
    /// サマリを履歴へ保存し、レコードidを返す
    async fn save(
        &self,
        user_id: &str,
        original_summary: &str,
        translated_summary: &str,
        image_data: &str,
    ) -> Result<String> {
        let body = serde_json::to_string(&SaveHistoryRequest {
            user_id,
            original_text: original_summary,
            translated_text: translated_summary,
            image_data,
        })?;

        let json = fetch_json("POST", "/api/history", Some(&body))
            .await
            .map_err(|e| Error::HistorySave(format!("{:?}", e)))?;
        let response: SaveHistoryResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|e| Error::HistorySave(e.to_string()))?;
        Ok(response.id.to_string())
    }
}

/// ログインユーザーの履歴一覧を取得（新しい順）
pub async fn fetch_history(user_id: &str) -> Result<Vec<HistoryRecord>> {
    let url = format!("/api/history?userId={}", user_id);
    let json = fetch_json("GET", &url, None)
        .await
        .map_err(|e| Error::Api(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(e.to_string()))
}

/// 認証URLを取得
///
/// サーバー側にGOOGLE_CLIENT_IDが無い場合は500が返るため、
/// 失敗は一律「未設定」として扱う。
pub async fn get_auth_url() -> Result<String> {
    const NOT_CONFIGURED: &str = "Authentication not configured. Please set GOOGLE_CLIENT_ID.";

    let json = fetch_json("GET", "/api/auth/url", None)
        .await
        .map_err(|_| Error::Config(NOT_CONFIGURED.into()))?;
    let response: AuthUrlResponse =
        serde_wasm_bindgen::from_value(json).map_err(|_| Error::Config(NOT_CONFIGURED.into()))?;

    if response.url.is_empty() {
        return Err(Error::Config(NOT_CONFIGURED.into()));
    }
    Ok(response.url)
}
