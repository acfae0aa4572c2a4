//! ヘッダーコンポーネント
//!
//! タイトルと、サインイン/履歴/お気に入りの各操作を置く。

use leptos::prelude::*;
use menu_lens_common::{AuthUser, MenuItem};

#[component]
pub fn Header<FL, FO, FH, FF>(
    user: ReadSignal<Option<AuthUser>>,
    favorites: ReadSignal<Vec<MenuItem>>,
    show_favorites: ReadSignal<bool>,
    on_login: FL,
    on_logout: FO,
    on_show_history: FH,
    on_toggle_favorites: FF,
) -> impl IntoView
where
    FL: Fn(()) + 'static + Clone + Send + Sync,
    FO: Fn(()) + 'static + Clone + Send + Sync,
    FH: Fn(()) + 'static + Clone + Send + Sync,
    FF: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <div class="header-brand">
                <span class="header-logo">"🍽️"</span>
                <div>
                    <h1>"MenuLens"</h1>
                    <p class="text-muted">"Your Culinary Translator"</p>
                </div>
            </div>

            <div class="header-actions">
                <Show
                    when=move || user.get().is_some()
                    fallback={
                        let on_login = on_login.clone();
                        move || {
                            let on_login = on_login.clone();
                            view! {
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| on_login(())
                                >
                                    "Sign In"
                                </button>
                            }
                        }
                    }
                >
                    <div class="user-chip">
                        {move || {
                            user.get()
                                .map(|u| {
                                    if u.picture.is_empty() {
                                        let initial =
                                            u.name.chars().next().unwrap_or('?').to_string();
                                        view! { <span class="user-initial">{initial}</span> }
                                            .into_any()
                                    } else {
                                        view! { <img src=u.picture alt=u.name.clone() /> }
                                            .into_any()
                                    }
                                })
                        }}
                        <span class="user-name">
                            {move || user.get().map(|u| u.name).unwrap_or_default()}
                        </span>
                    </div>
                    <button
                        class="btn btn-secondary"
                        title="View History"
                        on:click={
                            let on_show_history = on_show_history.clone();
                            move |_| on_show_history(())
                        }
                    >
                        "History"
                    </button>
                    <button
                        class="btn btn-tertiary"
                        title="Logout"
                        on:click={
                            let on_logout = on_logout.clone();
                            move |_| on_logout(())
                        }
                    >
                        "Logout"
                    </button>
                </Show>

                <button
                    class="btn btn-favorites"
                    class:active=move || show_favorites.get()
                    on:click={
                        let on_toggle_favorites = on_toggle_favorites.clone();
                        move |_| on_toggle_favorites(())
                    }
                >
                    {move || format!("♥ Favorites ({})", favorites.get().len())}
                </button>
            </div>
        </header>
    }
}
