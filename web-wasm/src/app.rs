//! メインアプリケーションコンポーネント
//!
//! 画面状態はすべてここのシグナルに集約する。送信のオーケストレーション
//! （オフライン退避・解析・履歴保存）は共通のScanControllerに委譲し、
//! このファイルは配線だけを持つ。

use crate::api::gemini::GeminiClient;
use crate::api::history::HistoryApi;
use crate::auth;
use crate::components::{
    dietary_profile::DietaryProfileSelector, dish_insights::DishInsightsModal,
    favorites_list::FavoritesList, header::Header, history_view::HistoryView,
    language_selector::LanguageSelector, menu_results::MenuResults, pending_scans::PendingScans,
    settings_panel::SettingsPanel, upload_area::UploadArea,
};
use crate::connectivity;
use crate::storage::{self, cache_store, favorites_store, pending_store};
use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_lens_common::{
    ConnectivityMonitor, DietaryProfile, Error, MenuItem, ScanController, SubmitOutcome,
    FALLBACK_ORIGINAL_SUMMARY, FALLBACK_TRANSLATED_SUMMARY,
};
use std::rc::Rc;
use wasm_bindgen::JsValue;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn console_warn(message: String) {
    web_sys::console::warn_1(&JsValue::from_str(&message));
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let (selected_language, set_selected_language) = signal("English".to_string());
    let (selected_image, set_selected_image) = signal(None::<String>);
    let (menu_items, set_menu_items) = signal(Vec::<MenuItem>::new());
    let (favorites, set_favorites) = signal(favorites_store().list());
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (show_favorites, set_show_favorites) = signal(false);
    let (show_history, set_show_history) = signal(false);
    let (is_online, set_is_online) = signal(connectivity::initial_online());
    let (pending_scans, set_pending_scans) = signal(pending_store().list());
    let (profile, set_profile) = signal(DietaryProfile::default());
    let (user, set_user) = signal(auth::load_session());
    let (api_key, set_api_key) = signal(storage::load_api_key().unwrap_or_default());
    let (api_key_status, set_api_key_status) = signal(String::new());
    let (is_editing, set_is_editing) = signal(false);
    let (edit_prompt, set_edit_prompt) = signal(String::new());
    let (is_enhancing, set_is_enhancing) = signal(false);
    let (insights_item, set_insights_item) = signal(None::<MenuItem>);

    // 接続状態イベントの配線（モニタ→シグナル）
    let monitor = Rc::new(ConnectivityMonitor::new(connectivity::initial_online()));
    monitor.subscribe(move |online| set_is_online.set(online));
    connectivity::wire_monitor(&monitor);

    // 認証ポップアップからの通知
    auth::listen_for_auth(move |user| set_user.set(Some(user)));

    let handle_clear = move |_: ()| {
        set_selected_image.set(None);
        set_menu_items.set(Vec::new());
        set_error.set(None);
        set_is_editing.set(false);
    };

    // 翻訳実行
    let on_translate = move |_| {
        // 送信中の多重トリガはここでも無視する（ボタンのdisabledと二重）
        if is_loading.get_untracked() {
            return;
        }
        let Some(image) = selected_image.get_untracked() else {
            return;
        };
        let language = selected_language.get_untracked();
        let key = api_key.get_untracked();
        let current_user = user.get_untracked();
        let online = is_online.get_untracked();

        set_is_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let controller = ScanController::new(
                Rc::new(ConnectivityMonitor::new(online)),
                pending_store(),
                GeminiClient::new(key),
                HistoryApi,
            );

            match controller
                .submit(&image, &language, current_user.as_ref(), now_ms())
                .await
            {
                Ok(SubmitOutcome::Queued(_)) => {
                    set_pending_scans.set(pending_store().list());
                    set_selected_image.set(None);
                    set_menu_items.set(Vec::new());
                    set_is_editing.set(false);
                    alert("You are offline. Scan saved to 'Pending Uploads'.");
                }
                Ok(SubmitOutcome::Completed {
                    items,
                    history_error,
                }) => {
                    if let Some(e) = history_error {
                        // 履歴保存の失敗は成功した結果に影響させない
                        console_warn(format!("{}", e));
                    }
                    let (original_summary, translated_summary) = items
                        .first()
                        .map(|i| (i.original.clone(), i.translated.clone()))
                        .unwrap_or_else(|| {
                            (
                                FALLBACK_ORIGINAL_SUMMARY.to_string(),
                                FALLBACK_TRANSLATED_SUMMARY.to_string(),
                            )
                        });
                    if let Err(e) = cache_store().save(
                        &items,
                        &image,
                        &original_summary,
                        &translated_summary,
                        now_ms(),
                    ) {
                        console_warn(format!("translation cache save failed: {}", e));
                    }
                    set_menu_items.set(items);
                }
                Ok(SubmitOutcome::Ignored) => {}
                Err(Error::StorageQuota(_)) => {
                    alert("Offline queue is full. Load or remove a pending scan first.");
                }
                Err(Error::EmptyImage) => {}
                Err(Error::Analysis(message)) => {
                    set_error.set(Some(message));
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    // 保留スキャンの読み戻し（この時点でキューから消える）
    let on_process_pending = move |id: String| {
        match pending_store().take(&id) {
            Ok(Some(scan)) => set_selected_image.set(Some(scan.image_data)),
            Ok(None) => {}
            Err(e) => console_warn(format!("pending scan removal failed: {}", e)),
        }
        set_pending_scans.set(pending_store().list());
    };

    let on_toggle_favorite = move |item: MenuItem| {
        if let Err(e) = favorites_store().toggle(&item) {
            alert("Could not save favorites: storage is full.");
            console_warn(format!("{}", e));
        }
        set_favorites.set(favorites_store().list());
    };

    // 画像編集
    let on_enhance = move |_| {
        let Some(image) = selected_image.get_untracked() else {
            return;
        };
        let prompt = edit_prompt.get_untracked();
        if prompt.is_empty() || is_enhancing.get_untracked() {
            return;
        }
        let key = api_key.get_untracked();
        set_is_enhancing.set(true);

        spawn_local(async move {
            let client = GeminiClient::new(key);
            match client.enhance_image(&image, &prompt).await {
                Ok(enhanced) => {
                    set_selected_image.set(Some(enhanced));
                    set_is_editing.set(false);
                    set_edit_prompt.set(String::new());
                }
                Err(e) => {
                    console_warn(format!("{}", e));
                    alert("Failed to edit image");
                }
            }
            set_is_enhancing.set(false);
        });
    };

    // 認証
    let on_login = move |_: ()| {
        spawn_local(async move {
            if let Err(e) = auth::begin_login().await {
                alert(&e.to_string());
            }
        });
    };
    let on_logout = move |_: ()| {
        auth::clear_session();
        set_user.set(None);
    };

    // APIキー
    let on_save_api_key = move |_: ()| match storage::save_api_key(&api_key.get_untracked()) {
        Ok(()) => set_api_key_status.set("API key saved".to_string()),
        Err(e) => set_api_key_status.set(e.to_string()),
    };
    let on_clear_api_key = move |_: ()| {
        storage::clear_api_key();
        set_api_key.set(String::new());
        set_api_key_status.set("API key cleared".to_string());
    };

    view! {
        <div class="container">
            <Show when=move || !is_online.get()>
                <div class="offline-banner">
                    "⚠ You are currently offline. Translations are disabled, but you can save scans for later."
                </div>
            </Show>

            <Header
                user=user
                favorites=favorites
                show_favorites=show_favorites
                on_login=on_login
                on_logout=on_logout
                on_show_history=move |_| set_show_history.set(true)
                on_toggle_favorites=move |_| set_show_favorites.update(|v| *v = !*v)
            />

            <Show when=move || show_history.get()>
                <HistoryView user=user on_close=move |_| set_show_history.set(false) />
            </Show>

            <Show
                when=move || show_favorites.get()
                fallback=move || {
                    view! {
                        <div class="layout-grid">
                            // サイドバー
                            <div class="sidebar">
                                <Show when=move || {
                                    !pending_scans.get().is_empty() && is_online.get()
                                }>
                                    <PendingScans
                                        pending_scans=pending_scans
                                        on_process=on_process_pending
                                    />
                                </Show>

                                <div class="panel">
                                    <h2 class="panel-title">"Configuration"</h2>
                                    <section>
                                        <label>"Target Language"</label>
                                        <LanguageSelector
                                            selected_language=selected_language
                                            set_selected_language=set_selected_language
                                        />
                                    </section>
                                    <section>
                                        <label>"Dietary Preferences"</label>
                                        <DietaryProfileSelector
                                            profile=profile
                                            set_profile=set_profile
                                        />
                                    </section>
                                    <SettingsPanel
                                        api_key=api_key
                                        set_api_key=set_api_key
                                        api_key_status=api_key_status
                                        on_save_api_key=on_save_api_key
                                        on_clear_api_key=on_clear_api_key
                                    />
                                </div>
                            </div>

                            // メインコンテンツ
                            <div class="main-content">
                                <section class="panel upload-panel">
                                    <UploadArea
                                        selected_image=selected_image
                                        on_image_selected=move |data| {
                                            set_selected_image.set(Some(data))
                                        }
                                        on_clear=handle_clear
                                    />

                                    <Show when=move || {
                                        selected_image.get().is_some() && menu_items.get().is_empty()
                                    }>
                                        <Show
                                            when=move || is_editing.get()
                                            fallback=move || {
                                                view! {
                                                    <button
                                                        class="link-button"
                                                        on:click=move |_| set_is_editing.set(true)
                                                    >
                                                        "✏ Edit / Enhance Photo"
                                                    </button>
                                                }
                                            }
                                        >
                                            <div class="edit-box">
                                                <div class="edit-box-header">
                                                    <label>"Edit Prompt"</label>
                                                    <button
                                                        class="btn btn-tertiary btn-small"
                                                        on:click=move |_| set_is_editing.set(false)
                                                    >
                                                        "✕"
                                                    </button>
                                                </div>
                                                <div class="edit-box-row">
                                                    <input
                                                        type="text"
                                                        placeholder="e.g., 'Make it brighter', 'Remove background'"
                                                        prop:value=move || edit_prompt.get()
                                                        on:input=move |ev| {
                                                            set_edit_prompt
                                                                .set(event_target_value(&ev))
                                                        }
                                                    />
                                                    <button
                                                        class="btn btn-primary btn-small"
                                                        disabled=move || {
                                                            is_enhancing.get()
                                                                || edit_prompt.get().is_empty()
                                                        }
                                                        on:click=on_enhance
                                                    >
                                                        {move || {
                                                            if is_enhancing.get() {
                                                                "..."
                                                            } else {
                                                                "✨"
                                                            }
                                                        }}
                                                    </button>
                                                </div>
                                            </div>
                                        </Show>

                                        <button
                                            class="btn btn-translate"
                                            class:offline=move || !is_online.get()
                                            disabled=move || is_loading.get()
                                            on:click=on_translate
                                        >
                                            {move || {
                                                if is_loading.get() {
                                                    "Translating Menu..."
                                                } else if !is_online.get() {
                                                    "☁ Save Scan for Later"
                                                } else {
                                                    "✨ Translate Menu"
                                                }
                                            }}
                                        </button>
                                    </Show>
                                </section>

                                {move || {
                                    error
                                        .get()
                                        .map(|message| {
                                            view! { <div class="error-banner">{message}</div> }
                                        })
                                }}

                                <Show when=move || !menu_items.get().is_empty()>
                                    <MenuResults
                                        items=menu_items
                                        favorites=favorites
                                        profile=profile
                                        on_toggle_favorite=on_toggle_favorite
                                        on_view_insights=move |item| {
                                            set_insights_item.set(Some(item))
                                        }
                                    />
                                </Show>
                            </div>
                        </div>
                    }
                }
            >
                <div class="favorites-view">
                    <div class="favorites-header">
                        <button
                            class="link-button"
                            on:click=move |_| set_show_favorites.set(false)
                        >
                            "← Back to Translator"
                        </button>
                        <h2>"Your Saved Dishes"</h2>
                    </div>
                    <FavoritesList
                        favorites=favorites
                        profile=profile
                        on_toggle_favorite=on_toggle_favorite
                        on_view_insights=move |item| set_insights_item.set(Some(item))
                    />
                </div>
            </Show>

            {move || {
                insights_item
                    .get()
                    .map(|item| {
                        view! {
                            <DishInsightsModal
                                item=item
                                api_key=api_key
                                on_close=move |_| set_insights_item.set(None)
                            />
                        }
                    })
            }}
        </div>
    }
}
