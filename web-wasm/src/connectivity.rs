//! 接続状態のイベント配線
//!
//! navigator.onLineで初期化し、windowのonline/offlineイベントを
//! 共通のConnectivityMonitorへ流し込む。ポーリングはしない。

use gloo::events::EventListener;
use menu_lens_common::ConnectivityMonitor;
use std::rc::Rc;

/// 起動時点の接続状態（windowが無い環境ではオンライン扱い）
pub fn initial_online() -> bool {
    web_sys::window()
        .map(|w| w.navigator().on_line())
        .unwrap_or(true)
}

/// online/offlineイベントをモニタへ接続する
///
/// リスナーはアプリ寿命ぶん生かしたままにする。
pub fn wire_monitor(monitor: &Rc<ConnectivityMonitor>) {
    let window = web_sys::window().unwrap();

    let online_monitor = Rc::clone(monitor);
    EventListener::new(&window, "online", move |_| online_monitor.set_online(true)).forget();

    let offline_monitor = Rc::clone(monitor);
    EventListener::new(&window, "offline", move |_| {
        offline_monitor.set_online(false)
    })
    .forget();
}
