//! 料理インサイトモーダル
//!
//! 背景情報（検索ツール併用のテキスト）と動画生成の2タブ。
//! 背景情報は開いた時点で自動取得、動画は明示操作でのみ生成する。
//! どちらも失敗はコンソールに残して表示は空のままにする。

use crate::api::gemini::GeminiClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_lens_common::{build_dish_video_prompt, MenuItem};
use wasm_bindgen::JsValue;

#[component]
pub fn DishInsightsModal<F>(
    item: MenuItem,
    api_key: ReadSignal<String>,
    on_close: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let (active_tab, set_active_tab) = signal("context".to_string());
    let (search_info, set_search_info) = signal(None::<String>);
    let (is_search_loading, set_is_search_loading) = signal(true);
    let (video_url, set_video_url) = signal(None::<String>);
    let (is_video_loading, set_is_video_loading) = signal(false);

    // 開いた時点で背景情報を自動取得
    {
        let dish_name = item.original.clone();
        let key = api_key.get_untracked();
        spawn_local(async move {
            let client = GeminiClient::new(key);
            match client.search_dish_info(&dish_name).await {
                Ok(info) => set_search_info.set(Some(info)),
                Err(e) => {
                    web_sys::console::error_1(&JsValue::from_str(&format!(
                        "dish info search failed: {}",
                        e
                    )));
                }
            }
            set_is_search_loading.set(false);
        });
    }

    let on_generate_video = {
        let prompt = build_dish_video_prompt(&item.translated, &item.description);
        move |_| {
            if is_video_loading.get_untracked() || video_url.get_untracked().is_some() {
                return;
            }
            set_is_video_loading.set(true);
            let prompt = prompt.clone();
            let key = api_key.get_untracked();
            spawn_local(async move {
                let client = GeminiClient::new(key);
                match client.generate_dish_video(&prompt).await {
                    Ok(url) => set_video_url.set(Some(url)),
                    Err(e) => {
                        web_sys::console::error_1(&JsValue::from_str(&format!(
                            "video generation failed: {}",
                            e
                        )));
                    }
                }
                set_is_video_loading.set(false);
            });
        }
    };

    let ingredients = item.ingredients.clone();

    view! {
        <div
            class="modal-overlay"
            on:click={
                let on_close = on_close.clone();
                move |_| on_close(())
            }
        >
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <div>
                        <h2>{item.translated.clone()}</h2>
                        <p class="original-name">{item.original.clone()}</p>
                    </div>
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

                <div class="modal-tabs">
                    <button
                        class="modal-tab"
                        class:active=move || active_tab.get() == "context"
                        on:click=move |_| set_active_tab.set("context".to_string())
                    >
                        "🌐 Cultural Insights"
                    </button>
                    <button
                        class="modal-tab"
                        class:active=move || active_tab.get() == "visualize"
                        on:click=move |_| set_active_tab.set("visualize".to_string())
                    >
                        "🎬 Visual Experience"
                    </button>
                </div>

                <div class="modal-content">
                    <Show when=move || active_tab.get() == "context">
                        <div class="insights-box">
                            <h4>"Origins & History"</h4>
                            <Show
                                when=move || !is_search_loading.get()
                                fallback=|| {
                                    view! {
                                        <p class="text-muted">
                                            "Researching cultural context..."
                                        </p>
                                    }
                                }
                            >
                                <p>
                                    {move || {
                                        search_info
                                            .get()
                                            .unwrap_or_else(|| "No historical data found.".to_string())
                                    }}
                                </p>
                            </Show>
                        </div>
                        <div class="insights-box">
                            <h4>"Ingredients Breakdown"</h4>
                            <div class="tag-row">
                                {ingredients
                                    .iter()
                                    .map(|i| view! { <span class="tag">{i.clone()}</span> })
                                    .collect_view()}
                            </div>
                        </div>
                    </Show>

                    <Show when=move || active_tab.get() == "visualize">
                        {
                            let on_generate_video = on_generate_video.clone();
                            move || match video_url.get() {
                            Some(url) => {
                                view! {
                                    <video src=url controls=true autoplay=true class="dish-video" />
                                }
                                    .into_any()
                            }
                            None => {
                                let on_generate_video = on_generate_video.clone();
                                view! {
                                    <button
                                        class="btn btn-primary"
                                        disabled=move || is_video_loading.get()
                                        on:click=on_generate_video
                                    >
                                        {move || {
                                            if is_video_loading.get() {
                                                "Generating video... this can take a minute"
                                            } else {
                                                "🎬 Generate Dish Video"
                                            }
                                        }}
                                    </button>
                                }
                                    .into_any()
                            }
                            }
                        }
                    </Show>
                </div>
            </div>
        </div>
    }
}
