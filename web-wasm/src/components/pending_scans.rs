//! 保留スキャンウィジェット
//!
//! オフライン時に退避したスキャンの一覧。Loadで前面に読み戻す
//! （読み戻した時点でキューからは消える）。

use leptos::prelude::*;
use menu_lens_common::PendingScan;
use wasm_bindgen::JsValue;

#[component]
pub fn PendingScans<F>(pending_scans: ReadSignal<Vec<PendingScan>>, on_process: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="pending-scans">
            <h3>"☁ Pending Uploads"</h3>
            <For
                each=move || pending_scans.get()
                key=|scan| scan.id.clone()
                children=move |scan| {
                    let on_process = on_process.clone();
                    let scan_id = scan.id.clone();
                    let time_label = format_time(scan.timestamp);
                    view! {
                        <div class="pending-scan-row">
                            <img
                                src=format!("data:image/jpeg;base64,{}", scan.image_data)
                                alt="Saved scan"
                            />
                            <div class="pending-scan-info">
                                <p class="text-muted">{time_label}</p>
                                <p>"Saved Scan"</p>
                            </div>
                            <button
                                class="btn btn-primary btn-small"
                                on:click=move |_| on_process(scan_id.clone())
                            >
                                "Load"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// タイムスタンプ(ms)をローカル時刻表記にする
fn format_time(timestamp_ms: u64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(timestamp_ms as f64));
    date.to_locale_time_string("en-US").into()
}
