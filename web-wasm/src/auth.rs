//! Google OAuthセッション管理
//!
//! 認証そのものは外部サーバーに委譲する。ここでやるのは
//! ポップアップを開くことと、サーバーがpostMessageで返す
//! OAUTH_AUTH_SUCCESSメッセージの受信、セッションの永続化だけ。

use crate::api::history::get_auth_url;
use crate::storage::LocalStorageBackend;
use gloo::events::EventListener;
use menu_lens_common::{AuthUser, Result, StorageBackend};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;

/// ログインユーザーの保存キー
pub const USER_KEY: &str = "menuLensUser";

/// 保存済みセッションの読み出し（未保存・破損はNone）
pub fn load_session() -> Option<AuthUser> {
    let stored = LocalStorageBackend.get(USER_KEY)?;
    serde_json::from_str(&stored).ok()
}

/// セッションの永続化
pub fn store_session(user: &AuthUser) {
    if let Ok(json) = serde_json::to_string(user) {
        let _ = LocalStorageBackend.set(USER_KEY, &json);
    }
}

/// ログアウト（セッション破棄）
pub fn clear_session() {
    LocalStorageBackend.remove(USER_KEY);
}

#[derive(Deserialize)]
struct AuthMessage {
    #[serde(rename = "type", default)]
    message_type: String,
    #[serde(default)]
    user: Option<AuthUser>,
}

/// 認証ポップアップからのメッセージ購読
///
/// OAUTH_AUTH_SUCCESS以外のメッセージは黙って無視する。
pub fn listen_for_auth(on_user: impl Fn(AuthUser) + 'static) {
    let window = web_sys::window().unwrap();
    EventListener::new(&window, "message", move |event| {
        let Some(event) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        let Ok(message) = serde_wasm_bindgen::from_value::<AuthMessage>(event.data()) else {
            return;
        };
        if message.message_type == "OAUTH_AUTH_SUCCESS" {
            if let Some(user) = message.user {
                store_session(&user);
                on_user(user);
            }
        }
    })
    .forget();
}

/// ログイン開始: 認証URLを取得してポップアップを開く
pub async fn begin_login() -> Result<()> {
    let url = get_auth_url().await?;

    let window = web_sys::window().unwrap();
    let width = 500.0;
    let height = 600.0;
    let (left, top) = match window.screen() {
        Ok(screen) => {
            let sw = screen.width().unwrap_or(0) as f64;
            let sh = screen.height().unwrap_or(0) as f64;
            (sw / 2.0 - width / 2.0, sh / 2.0 - height / 2.0)
        }
        Err(_) => (0.0, 0.0),
    };

    let features = format!("width={width},height={height},top={top},left={left}");
    let _ = window.open_with_url_and_target_and_features(&url, "google_oauth", &features);
    Ok(())
}
