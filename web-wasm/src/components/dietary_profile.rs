//! 食事プロファイルセレクタコンポーネント
//!
//! 5つの独立したトグル。状態はセッション内のみで永続化しない。

use leptos::prelude::*;
use menu_lens_common::DietaryProfile;

#[component]
pub fn DietaryProfileSelector(
    profile: ReadSignal<DietaryProfile>,
    set_profile: WriteSignal<DietaryProfile>,
) -> impl IntoView {
    let toggle = move |apply: fn(&mut DietaryProfile)| {
        set_profile.update(|p| apply(p));
    };

    view! {
        <div class="dietary-profile">
            <button
                class="dietary-toggle"
                class:active=move || profile.get().is_vegetarian
                on:click=move |_| toggle(|p| p.is_vegetarian = !p.is_vegetarian)
            >
                "🌿 Vegetarian"
            </button>
            <button
                class="dietary-toggle"
                class:active=move || profile.get().is_vegan
                on:click=move |_| toggle(|p| p.is_vegan = !p.is_vegan)
            >
                "🌱 Vegan"
            </button>
            <button
                class="dietary-toggle"
                class:active=move || profile.get().is_gluten_free
                on:click=move |_| toggle(|p| p.is_gluten_free = !p.is_gluten_free)
            >
                "🌾 Gluten-Free"
            </button>
            <button
                class="dietary-toggle"
                class:active=move || profile.get().has_nut_allergy
                on:click=move |_| toggle(|p| p.has_nut_allergy = !p.has_nut_allergy)
            >
                "🥜 Nut Allergy"
            </button>
            <button
                class="dietary-toggle"
                class:active=move || profile.get().has_dairy_allergy
                on:click=move |_| toggle(|p| p.has_dairy_allergy = !p.has_dairy_allergy)
            >
                "🥛 Dairy Allergy"
            </button>
        </div>
    }
}
