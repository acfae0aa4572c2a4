//! 翻訳先言語セレクタコンポーネント

use leptos::prelude::*;
use menu_lens_common::TARGET_LANGUAGES;

#[component]
pub fn LanguageSelector(
    selected_language: ReadSignal<String>,
    set_selected_language: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="language-grid">
            {TARGET_LANGUAGES
                .iter()
                .map(|(code, flag)| {
                    let code = *code;
                    let flag = *flag;
                    view! {
                        <button
                            class="language-button"
                            class:selected=move || selected_language.get() == code
                            on:click=move |_| set_selected_language.set(code.to_string())
                        >
                            <span class="language-flag">{flag}</span>
                            <span>{code}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
