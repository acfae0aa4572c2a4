//! Gemini APIクライアント（CLI用）
//!
//! Web版と同じリクエスト形式をreqwestで直接叩く。
//! プロンプトとレスポンスのパースは共通ライブラリ側を使う。

use crate::error::{MenuLensError, Result};
use menu_lens_common::{build_menu_prompt, parse_menu_response, MenuItem};
use serde_json::json;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| MenuLensError::ApiCall(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// メニュー画像(Base64)を解析してMenuItemの配列を返す
    pub async fn analyze_menu(
        &self,
        image_base64: &str,
        target_language: &str,
    ) -> Result<Vec<MenuItem>> {
        let prompt = build_menu_prompt(target_language);
        let body = json!({
            "contents": [{
                "parts": [
                    { "text": prompt },
                    { "inline_data": { "mime_type": "image/jpeg", "data": image_base64 } }
                ]
            }],
            "generationConfig": {
                "temperature": 0.1,
                "responseMimeType": "application/json"
            }
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MenuLensError::ApiCall(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MenuLensError::ApiCall(format!(
                "status {}: {}",
                status, text
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MenuLensError::ApiParse(e.to_string()))?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| MenuLensError::ApiParse("レスポンスにテキストがありません".into()))?;

        Ok(parse_menu_response(text)?)
    }
}
