//! 解析結果一覧コンポーネント
//!
//! カテゴリタブで絞り込みつつ料理カードを並べる。

use super::menu_item_card::MenuItemCard;
use leptos::prelude::*;
use menu_lens_common::{DietaryProfile, MenuItem};

#[component]
pub fn MenuResults<FT, FI>(
    items: ReadSignal<Vec<MenuItem>>,
    favorites: ReadSignal<Vec<MenuItem>>,
    profile: ReadSignal<DietaryProfile>,
    on_toggle_favorite: FT,
    on_view_insights: FI,
) -> impl IntoView
where
    FT: Fn(MenuItem) + 'static + Clone + Send + Sync,
    FI: Fn(MenuItem) + 'static + Clone + Send + Sync,
{
    let (selected_category, set_selected_category) = signal("All".to_string());

    // 出現順を保ったカテゴリ一覧（先頭は常にAll）
    let categories = Memo::new(move |_| {
        let mut categories = vec!["All".to_string()];
        for item in items.get() {
            if !item.category.is_empty() && !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    });

    let filtered_items = Memo::new(move |_| {
        let category = selected_category.get();
        if category == "All" {
            return items.get();
        }
        items
            .get()
            .into_iter()
            .filter(|item| item.category == category)
            .collect()
    });

    view! {
        <div class="menu-results">
            <div class="category-tabs">
                <For
                    each=move || categories.get()
                    key=|category| category.clone()
                    children=move |category| {
                        let label = category.clone();
                        let select_value = category.clone();
                        let active_value = category;
                        view! {
                            <button
                                class="category-tab"
                                class:active=move || selected_category.get() == active_value
                                on:click=move |_| set_selected_category.set(select_value.clone())
                            >
                                {label}
                            </button>
                        }
                    }
                />
            </div>

            <div class="results-grid">
                <For
                    each=move || filtered_items.get()
                    key=|item| item.original.clone()
                    children=move |item| {
                        let on_toggle_favorite = on_toggle_favorite.clone();
                        let on_view_insights = on_view_insights.clone();
                        view! {
                            <MenuItemCard
                                item=item
                                favorites=favorites
                                profile=profile
                                on_toggle_favorite=on_toggle_favorite
                                on_view_insights=on_view_insights
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}
