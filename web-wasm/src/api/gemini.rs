//! Gemini API連携
//!
//! - analyze_menu: メニュー画像解析（MenuAnalyzer実装）
//! - enhance_image: 画像編集（最初のinlineDataパートを返す）
//! - search_dish_info: 料理情報検索（googleSearchツール併用）
//! - generate_dish_video: 料理動画生成（長時間オペレーションをポーリング）

use super::fetch_json;
use gloo::timers::future::TimeoutFuture;
use menu_lens_common::{
    build_dish_info_prompt, build_menu_prompt, parse_menu_response, Error, MenuAnalyzer, MenuItem,
    Result,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Url};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// メニュー解析・検索に使うモデル
const ANALYZE_MODEL: &str = "gemini-3-flash-preview";
/// 画像編集に使うモデル
const IMAGE_EDIT_MODEL: &str = "gemini-2.5-flash-image";
/// 動画生成に使うモデル
const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// 動画オペレーションのポーリング間隔（ミリ秒）
const VIDEO_POLL_INTERVAL_MS: u32 = 5_000;

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: EmptyConfig,
}

#[derive(Serialize)]
struct EmptyConfig {}

/// Gemini APIレスポンス
#[derive(Deserialize, Default)]
#[serde(default)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// 動画生成リクエスト（predictLongRunning）
#[derive(Serialize)]
struct VideoRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Serialize)]
struct VideoInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    aspect_ratio: String,
    // 1080pは遅いので720p固定
    resolution: String,
}

/// 動画生成の長時間オペレーション
#[derive(Deserialize, Default)]
#[serde(default)]
struct VideoOperation {
    name: String,
    done: bool,
    response: Option<VideoOperationResponse>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct VideoOperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct GenerateVideoResponse {
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GeneratedSample {
    video: VideoFile,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct VideoFile {
    uri: String,
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
///
/// # Returns
/// MIMEタイプ（例: "image/jpeg"）、抽出失敗時は"image/jpeg"
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .unwrap_or("image/jpeg")
}

/// Geminiクライアント
///
/// APIキーは設定パネルから差し替えられるため内部可変にしておく。
pub struct GeminiClient {
    api_key: RefCell<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: RefCell::new(api_key.into()),
        }
    }

    pub fn set_api_key(&self, api_key: &str) {
        *self.api_key.borrow_mut() = api_key.to_string();
    }

    fn key(&self) -> String {
        self.api_key.borrow().clone()
    }

    /// generateContent呼び出し（共通処理）
    async fn call_generate(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE,
            model,
            self.key()
        );
        let body = serde_json::to_string(request)?;

        let json = fetch_json("POST", &url, Some(&body))
            .await
            .map_err(|e| Error::Api(format!("{:?}", e)))?;
        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(e.to_string()))
    }

    /// 画像を編集して新しいBase64画像を返す
    pub async fn enhance_image(&self, image_base64: &str, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: None,
            tools: None,
        };

        let response = self.call_generate(IMAGE_EDIT_MODEL, &request).await?;

        // レスポンスパーツから最初の画像を探す
        response
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.inline_data)
            .map(|d| d.data)
            .ok_or_else(|| Error::Api("No image generated".into()))
    }

    /// 料理の背景情報を検索ツール併用で取得
    pub async fn search_dish_info(&self, dish_name: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: build_dish_info_prompt(dish_name),
                }],
            }],
            // 検索ツールとresponseMimeType指定は併用できない
            generation_config: None,
            tools: Some(vec![Tool {
                google_search: EmptyConfig {},
            }]),
        };

        let response = self.call_generate(ANALYZE_MODEL, &request).await?;
        Ok(first_text(response).unwrap_or_else(|| "No information found.".to_string()))
    }

    /// 料理動画を生成してオブジェクトURLを返す
    ///
    /// predictLongRunningでオペレーションを開始し、完了までポーリングする。
    /// キャンセルはできない（画面を閉じても生成は続く）。
    pub async fn generate_dish_video(&self, prompt: &str) -> Result<String> {
        let request = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters {
                aspect_ratio: "16:9".to_string(),
                resolution: "720p".to_string(),
            },
        };

        let url = format!(
            "{}/models/{}:predictLongRunning?key={}",
            GEMINI_API_BASE,
            VIDEO_MODEL,
            self.key()
        );
        let body = serde_json::to_string(&request)?;
        let json = fetch_json("POST", &url, Some(&body))
            .await
            .map_err(|e| Error::Api(format!("{:?}", e)))?;
        let mut operation: VideoOperation =
            serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(e.to_string()))?;

        while !operation.done {
            TimeoutFuture::new(VIDEO_POLL_INTERVAL_MS).await;

            let url = format!("{}/{}?key={}", GEMINI_API_BASE, operation.name, self.key());
            let json = fetch_json("GET", &url, None)
                .await
                .map_err(|e| Error::Api(format!("{:?}", e)))?;
            operation =
                serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(e.to_string()))?;
        }

        let uri = operation
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .map(|s| s.video.uri)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| Error::Api("No video generated".into()))?;

        self.download_as_object_url(&uri).await
    }

    /// APIキー付きで動画をダウンロードし、オブジェクトURLにする
    async fn download_as_object_url(&self, uri: &str) -> Result<String> {
        let js_error = |e: JsValue| Error::Api(format!("{:?}", e));

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(uri, &opts).map_err(js_error)?;
        request
            .headers()
            .set("x-goog-api-key", &self.key())
            .map_err(js_error)?;

        let window = web_sys::window().unwrap();
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;
        if !resp.ok() {
            return Err(Error::Api(format!("Video download failed: {}", resp.status())));
        }

        let blob = JsFuture::from(resp.blob().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Url::create_object_url_with_blob(blob.unchecked_ref()).map_err(js_error)
    }
}

impl MenuAnalyzer for GeminiClient {
    /// メニュー画像を解析してMenuItemの配列を返す
    ///
    /// レスポンス不正・転送エラー・拒否は呼び出し側で一律に扱われる。
    async fn analyze(&self, image_data: &str, target_language: &str) -> Result<Vec<MenuItem>> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: build_menu_prompt(target_language),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: image_data.to_string(),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
            }),
            tools: None,
        };

        let response = self.call_generate(ANALYZE_MODEL, &request).await?;
        let text = first_text(response).ok_or_else(|| Error::Api("Empty response".into()))?;

        parse_menu_response(&text)
    }
}

/// 最初のテキストパートを取り出す
fn first_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .flat_map(|c| c.content.parts)
        .find_map(|p| p.text)
}
