//! 外部APIクライアント
//!
//! - gemini: 生成AIサービス（解析・画像編集・検索・動画）
//! - history: 履歴・認証サーバー（REST）

pub mod gemini;
pub mod history;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JSONリクエストを送ってJSONレスポンスを得る（共通処理）
pub(crate) async fn fetch_json(
    method: &str,
    url: &str,
    body: Option<&str>,
) -> Result<JsValue, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    JsFuture::from(resp.json()?).await
}
