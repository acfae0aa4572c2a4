//! スキャン送信コントローラ
//!
//! 「翻訳する」操作のオーケストレーション。接続状態を見てから
//! リモート解析を呼ぶか保留キューへ退避するかを決める。
//! 解析器と履歴保存はトレイト境界で注入する（テストでは偽物に差し替え）。

use crate::connectivity::ConnectivityMonitor;
use crate::error::{Error, Result};
use crate::queue::PendingScanStore;
use crate::storage::StorageBackend;
use crate::types::{AuthUser, MenuItem, PendingScan};
use std::cell::Cell;
use std::rc::Rc;

/// 解析失敗時にユーザーへ見せる一律メッセージ
///
/// 一時的なネットワーク障害とリモート拒否は区別しない。
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to translate menu. Please try again or check your API key.";

/// 結果が空だったときの履歴サマリ
pub const FALLBACK_TRANSLATED_SUMMARY: &str = "Menu Scan";
pub const FALLBACK_ORIGINAL_SUMMARY: &str = "Original Menu";

/// リモート解析コラボレータ
///
/// 失敗理由（レスポンス不正・転送エラー・拒否）は呼び出し側では
/// 区別されない。
#[allow(async_fn_in_trait)]
pub trait MenuAnalyzer {
    async fn analyze(&self, image_data: &str, target_language: &str) -> Result<Vec<MenuItem>>;
}

/// 履歴保存コラボレータ（ベストエフォート）
#[allow(async_fn_in_trait)]
pub trait HistorySink {
    /// 保存したレコードのid（不透明値）を返す
    async fn save(
        &self,
        user_id: &str,
        original_summary: &str,
        translated_summary: &str,
        image_data: &str,
    ) -> Result<String>;
}

impl<T: MenuAnalyzer> MenuAnalyzer for Rc<T> {
    async fn analyze(&self, image_data: &str, target_language: &str) -> Result<Vec<MenuItem>> {
        (**self).analyze(image_data, target_language).await
    }
}

impl<T: HistorySink> HistorySink for Rc<T> {
    async fn save(
        &self,
        user_id: &str,
        original_summary: &str,
        translated_summary: &str,
        image_data: &str,
    ) -> Result<String> {
        (**self)
            .save(user_id, original_summary, translated_summary, image_data)
            .await
    }
}

/// 1回の送信の状態
///
/// QueuedはOfflineへの分岐でその送信については終端。再開は別操作
/// （process_pending → ユーザーによる再submit）であり自動再送はない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Queued,
    Succeeded,
    Failed,
}

/// submitの結果
#[derive(Debug)]
pub enum SubmitOutcome {
    /// オフラインだったため保留キューへ退避した
    Queued(PendingScan),
    /// 解析成功。履歴保存の失敗は成功結果に影響させず、ログ用に添える
    Completed {
        items: Vec<MenuItem>,
        history_error: Option<Error>,
    },
    /// 送信中の多重submitは無視した
    Ignored,
}

/// スキャン送信コントローラ
pub struct ScanController<A, H, S: StorageBackend> {
    monitor: Rc<ConnectivityMonitor>,
    queue: PendingScanStore<S>,
    analyzer: A,
    history: H,
    state: Cell<SubmissionState>,
}

impl<A: MenuAnalyzer, H: HistorySink, S: StorageBackend> ScanController<A, H, S> {
    pub fn new(
        monitor: Rc<ConnectivityMonitor>,
        queue: PendingScanStore<S>,
        analyzer: A,
        history: H,
    ) -> Self {
        Self {
            monitor,
            queue,
            analyzer,
            history,
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// 保留中のスキャン一覧（新しい順）
    pub fn pending(&self) -> Vec<PendingScan> {
        self.queue.list()
    }

    /// スキャンを送信する
    ///
    /// オフライン判定は解析呼び出しの前に行う（失敗後の退避ではなく、
    /// 既知のオフラインだけを退避対象にする）。クォータ超過による
    /// 退避失敗はそのまま伝播する。
    pub async fn submit(
        &self,
        image_data: &str,
        target_language: &str,
        user: Option<&AuthUser>,
        now_ms: u64,
    ) -> Result<SubmitOutcome> {
        if image_data.is_empty() {
            return Err(Error::EmptyImage);
        }
        if self.state.get() == SubmissionState::Submitting {
            return Ok(SubmitOutcome::Ignored);
        }

        if !self.monitor.is_online() {
            let scan = self.queue.save(image_data, now_ms)?;
            self.state.set(SubmissionState::Queued);
            return Ok(SubmitOutcome::Queued(scan));
        }

        self.state.set(SubmissionState::Submitting);
        let items = match self.analyzer.analyze(image_data, target_language).await {
            Ok(items) => items,
            Err(_) => {
                self.state.set(SubmissionState::Failed);
                return Err(Error::Analysis(ANALYSIS_FAILED_MESSAGE.into()));
            }
        };
        self.state.set(SubmissionState::Succeeded);

        let history_error = match user {
            Some(user) => {
                let (original, translated) = summarize(&items);
                self.history
                    .save(&user.id, original, translated, image_data)
                    .await
                    .err()
                    .map(|e| Error::HistorySave(e.to_string()))
            }
            None => None,
        };

        Ok(SubmitOutcome::Completed {
            items,
            history_error,
        })
    }

    /// 保留スキャンを読み戻す
    ///
    /// 一致するレコードを返し、キューからは無条件に除去する。
    /// 再送信はしない（ユーザーが改めてsubmitする）。
    pub fn process_pending(&self, id: &str) -> Result<Option<PendingScan>> {
        self.queue.take(id)
    }
}

/// 履歴サマリの導出（先頭の品、なければ固定文字列）
fn summarize(items: &[MenuItem]) -> (&str, &str) {
    match items.first() {
        Some(first) => (first.original.as_str(), first.translated.as_str()),
        None => (FALLBACK_ORIGINAL_SUMMARY, FALLBACK_TRANSLATED_SUMMARY),
    }
}
