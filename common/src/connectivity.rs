//! 接続状態モニタ
//!
//! 「いまネットワークに到達できるか」の単一booleanを保持する。
//! 初期値はプラットフォームの現在値、以後はonline/offline通知で
//! 更新する（ポーリングなし、last-writer-wins）。

use std::cell::{Cell, RefCell};

/// 接続状態モニタ
///
/// シングルスレッドのイベントループ前提。購読者には状態が
/// 変化したときだけ通知する。
pub struct ConnectivityMonitor {
    online: Cell<bool>,
    subscribers: RefCell<Vec<Box<dyn Fn(bool)>>>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        Self {
            online: Cell::new(initially_online),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// 現在の接続状態（同期取得）
    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// プラットフォーム通知による状態更新
    ///
    /// 同値への更新は通知しない。購読コールバック内からの再購読は
    /// 不可（購読リストを走査中のため）。
    pub fn set_online(&self, online: bool) {
        if self.online.replace(online) == online {
            return;
        }
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(online);
        }
    }

    /// 状態変化の購読を追加
    pub fn subscribe(&self, subscriber: impl Fn(bool) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_initial_state() {
        assert!(ConnectivityMonitor::new(true).is_online());
        assert!(!ConnectivityMonitor::new(false).is_online());
    }

    #[test]
    fn test_set_online_updates_state() {
        let monitor = ConnectivityMonitor::new(true);
        monitor.set_online(false);
        assert!(!monitor.is_online());
        monitor.set_online(true);
        assert!(monitor.is_online());
    }

    #[test]
    fn test_subscribers_notified_on_change() {
        let monitor = ConnectivityMonitor::new(true);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        monitor.subscribe(move |online| seen_clone.borrow_mut().push(online));

        monitor.set_online(false);
        monitor.set_online(true);
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_no_notification_without_change() {
        let monitor = ConnectivityMonitor::new(true);
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        monitor.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        monitor.set_online(true);
        monitor.set_online(true);
        assert_eq!(count.get(), 0);

        monitor.set_online(false);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        // online/offline通知の順序入れ替わりは最後の書き込みが勝つだけ
        let monitor = ConnectivityMonitor::new(false);
        monitor.set_online(true);
        monitor.set_online(false);
        monitor.set_online(true);
        assert!(monitor.is_online());
    }
}
