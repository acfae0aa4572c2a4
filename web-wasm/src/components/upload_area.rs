//! アップロードエリアコンポーネント
//!
//! メニュー写真を1枚選ぶ。FileReaderでData URLに読み、
//! Base64部分だけをアプリ状態に渡す。

use crate::api::gemini::extract_base64_from_data_url;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileReader};

#[component]
pub fn UploadArea<F, FC>(
    selected_image: ReadSignal<Option<String>>,
    on_image_selected: F,
    on_clear: FC,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_image_selected = on_image_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    if let Some(file) = files.get(0) {
                        read_file(file, on_image_selected.clone());
                    }
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let on_image_selected = on_image_selected.clone();
        move |_| {
            // ファイル選択ダイアログを開く
            let document = web_sys::window().unwrap().document().unwrap();
            let input: web_sys::HtmlInputElement = document
                .create_element("input")
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_type("file");
            input.set_accept("image/*");

            let on_image_selected = on_image_selected.clone();
            let input_clone = input.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(files) = input_clone.files() {
                    if let Some(file) = files.get(0) {
                        read_file(file, on_image_selected.clone());
                    }
                }
            }) as Box<dyn FnMut(_)>);

            input.set_onchange(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            input.click();
        }
    };

    view! {
        <Show
            when=move || selected_image.get().is_some()
            fallback=move || {
                let on_drop = on_drop.clone();
                let on_click = on_click.clone();
                view! {
                    <div
                        class="upload-area"
                        class:dragover=move || is_dragover.get()
                        on:drop=on_drop
                        on:dragover=on_dragover
                        on:dragleave=on_dragleave
                        on:click=on_click
                    >
                        <div class="upload-icon">"📷"</div>
                        <p>"Drag & drop a menu photo, or click to select"</p>
                        <p class="text-muted">"Supported: JPEG, PNG"</p>
                    </div>
                }
            }
        >
            <div class="image-preview">
                <img
                    src=move || {
                        selected_image
                            .get()
                            .map(|data| format!("data:image/jpeg;base64,{}", data))
                            .unwrap_or_default()
                    }
                    alt="Selected menu"
                />
                <button
                    class="btn btn-tertiary btn-small"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "✕ Clear"
                </button>
            </div>
        </Show>
    }
}

fn read_file<F>(file: File, on_image_selected: F)
where
    F: Fn(String) + 'static,
{
    let reader = FileReader::new().unwrap();

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                if let Some(base64_data) = extract_base64_from_data_url(&data_url) {
                    on_image_selected(base64_data.to_string());
                }
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    let _ = reader.read_as_data_url(&file);
}
