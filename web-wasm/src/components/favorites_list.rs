//! お気に入り一覧コンポーネント

use super::menu_item_card::MenuItemCard;
use leptos::prelude::*;
use menu_lens_common::{DietaryProfile, MenuItem};

#[component]
pub fn FavoritesList<FT, FI>(
    favorites: ReadSignal<Vec<MenuItem>>,
    profile: ReadSignal<DietaryProfile>,
    on_toggle_favorite: FT,
    on_view_insights: FI,
) -> impl IntoView
where
    FT: Fn(MenuItem) + 'static + Clone + Send + Sync,
    FI: Fn(MenuItem) + 'static + Clone + Send + Sync,
{
    view! {
        <Show
            when=move || !favorites.get().is_empty()
            fallback=|| {
                view! {
                    <div class="empty-state">
                        <p>"No saved dishes yet. Tap ♥ on a dish to keep it here."</p>
                    </div>
                }
            }
        >
            <div class="results-grid">
                <For
                    each=move || favorites.get()
                    key=|item| item.original.clone()
                    children={
                        let on_toggle_favorite = on_toggle_favorite.clone();
                        let on_view_insights = on_view_insights.clone();
                        move |item| {
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
                    }
                />
            </div>
        </Show>
    }
}
