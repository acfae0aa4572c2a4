//! 履歴ビューコンポーネント
//!
//! サーバーに保存されたスキャン履歴（サマリのみ）の一覧。
//! 取得失敗はコンソールに残して空表示にする。

use crate::api::history::fetch_history;
use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_lens_common::{AuthUser, HistoryRecord};
use wasm_bindgen::JsValue;

#[component]
pub fn HistoryView<F>(user: ReadSignal<Option<AuthUser>>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let (records, set_records) = signal(Vec::<HistoryRecord>::new());
    let (is_loading, set_is_loading) = signal(true);

    // 表示時に一度だけ取得する
    if let Some(user) = user.get_untracked() {
        spawn_local(async move {
            match fetch_history(&user.id).await {
                Ok(history) => set_records.set(history),
                Err(e) => {
                    web_sys::console::error_1(&JsValue::from_str(&format!(
                        "history fetch failed: {}",
                        e
                    )));
                }
            }
            set_is_loading.set(false);
        });
    } else {
        set_is_loading.set(false);
    }

    view! {
        <div class="history-view">
            <div class="history-header">
                <h2>"Your Dining History"</h2>
                <button
                    class="btn btn-tertiary"
                    on:click={
                        let on_close = on_close.clone();
                        move |_| on_close(())
                    }
                >
                    "✕"
                </button>
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <div class="spinner">"Loading..."</div> }
            >
                <Show
                    when=move || !records.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="empty-state">
                                <p>"No history found. Start scanning menus!"</p>
                            </div>
                        }
                    }
                >
                    <div class="history-grid">
                        <For
                            each=move || records.get()
                            key=|record| record.id
                            children=move |record| {
                                let date_label = format_date(&record.created_at);
                                view! {
                                    <div class="history-card">
                                        <div class="history-thumbnail">
                                            <img src=record.image_data.clone() alt="Menu scan" />
                                            <p class="history-date">{date_label}</p>
                                        </div>
                                        <div class="history-summary">
                                            <h3>{record.translated_text.clone()}</h3>
                                            <p class="original-name">
                                                {record.original_text.clone()}
                                            </p>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

/// サーバーの日時文字列をローカル日付表記にする
fn format_date(created_at: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(created_at));
    if date.get_time().is_nan() {
        return created_at.to_string();
    }
    date.to_locale_date_string("en-US", &JsValue::UNDEFINED)
        .into()
}
