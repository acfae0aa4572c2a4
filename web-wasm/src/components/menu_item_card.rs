//! 料理カードコンポーネント
//!
//! 1品の翻訳・説明・タグと、食事プロファイル照合の結果バッジを表示する。
//! 判定は表示のたびに計算し直す（保存しない）。

use leptos::prelude::*;
use menu_lens_common::{evaluate, DietaryProfile, MenuItem};

#[component]
pub fn MenuItemCard<FT, FI>(
    item: MenuItem,
    favorites: ReadSignal<Vec<MenuItem>>,
    profile: ReadSignal<DietaryProfile>,
    on_toggle_favorite: FT,
    on_view_insights: FI,
) -> impl IntoView
where
    FT: Fn(MenuItem) + 'static + Clone + Send + Sync,
    FI: Fn(MenuItem) + 'static + Clone + Send + Sync,
{
    let verdict_item = item.clone();
    let verdict = Memo::new(move |_| evaluate(&verdict_item, &profile.get()));

    let is_favorite = {
        let original = item.original.clone();
        move || favorites.get().iter().any(|fav| fav.original == original)
    };

    let speech_text = format!("{}. {}", item.translated, item.description);
    let favorite_item = item.clone();
    let insights_item = item.clone();

    let dietary_tags = item.dietary.clone();
    let allergen_tags = item.allergens.clone();
    let spice_level = item.spice_level.clone();

    view! {
        <div class="menu-card" class:flagged=move || !verdict.get().is_safe>
            <div class="match-badge">
                {move || {
                    let verdict = verdict.get();
                    match verdict.headline() {
                        // 見出しは先頭の違反1件だけ
                        Some(warning) => {
                            view! { <span class="badge warning">"⚠ " {warning}</span> }
                                .into_any()
                        }
                        None => {
                            view! { <span class="badge safe">"✓ 100% Match"</span> }.into_any()
                        }
                    }
                }}
            </div>

            <h3>{item.translated.clone()}</h3>
            <p class="original-name">{item.original.clone()}</p>

            <div class="tag-row">
                <span class="tag category">{item.category.clone()}</span>
                <span class="tag price">{item.price.clone()}</span>
                <Show when={
                    let spice_level = spice_level.clone();
                    move || !spice_level.is_empty() && spice_level != "Mild"
                }>
                    <span class="tag spice">"🌶️ " {item.spice_level.clone()}</span>
                </Show>
            </div>

            <p class="description">{item.description.clone()}</p>

            <div class="tag-row">
                {dietary_tags
                    .iter()
                    .map(|d| view! { <span class="tag dietary">{d.clone()}</span> })
                    .collect_view()}
                {allergen_tags
                    .iter()
                    .map(|a| view! { <span class="tag allergen">"Contains " {a.clone()}</span> })
                    .collect_view()}
            </div>

            <div class="card-actions">
                <button
                    class="btn btn-secondary btn-small"
                    title="Read Aloud"
                    on:click=move |_| read_aloud(&speech_text)
                >
                    "🔊"
                </button>
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_view_insights = on_view_insights.clone();
                        move |_| on_view_insights(insights_item.clone())
                    }
                >
                    "View Insights"
                </button>
                <button
                    class="btn btn-favorite"
                    class:active=is_favorite
                    on:click={
                        let on_toggle_favorite = on_toggle_favorite.clone();
                        move |_| on_toggle_favorite(favorite_item.clone())
                    }
                >
                    "♥"
                </button>
            </div>
        </div>
    }
}

/// 翻訳名と説明を読み上げる
fn read_aloud(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(synth) = window.speech_synthesis() else {
        return;
    };
    synth.cancel();
    if let Ok(utterance) = web_sys::SpeechSynthesisUtterance::new_with_text(text) {
        synth.speak(&utterance);
    }
}
