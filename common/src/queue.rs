//! 保留スキャンキュー
//!
//! オフライン時に撮影したスキャンを後で解析するために退避しておく
//! ストア。固定キーの下にPendingScanのJSON配列を新しい順で保持する。

use crate::error::Result;
use crate::storage::StorageBackend;
use crate::types::PendingScan;

/// 保留スキャンの保存キー
pub const PENDING_SCANS_KEY: &str = "restroGuide_pendingScans";

/// 保留スキャンストア
///
/// 保存済みかつ未削除のスキャンだけを、新しい順で保持する。
/// 書き込み失敗（クォータ超過）は呼び出し側へ伝播する。
pub struct PendingScanStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> PendingScanStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// 新しいスキャンを先頭に追加して全列を永続化
    ///
    /// idは `<作成時刻ms>-<連番>`。既存idと衝突しない連番を選ぶため、
    /// 同一ミリ秒の連続保存でもremoveは常にちょうど1件だけを消せる。
    pub fn save(&self, image_data: &str, now_ms: u64) -> Result<PendingScan> {
        let mut scans = self.list();
        let mut seq = scans.len();
        let mut id = format!("{}-{}", now_ms, seq);
        while scans.iter().any(|s| s.id == id) {
            seq += 1;
            id = format!("{}-{}", now_ms, seq);
        }
        let scan = PendingScan {
            id,
            image_data: image_data.to_string(),
            timestamp: now_ms,
        };
        scans.insert(0, scan.clone());
        self.persist(&scans)?;
        Ok(scan)
    }

    /// 保存済みの列をそのまま返す（新しい順）
    ///
    /// 未保存・破損データは空列として読む。ここからエラーは出さない。
    pub fn list(&self) -> Vec<PendingScan> {
        let Some(stored) = self.backend.get(PENDING_SCANS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&stored).unwrap_or_default()
    }

    /// idの一致するスキャンを除外して永続化
    ///
    /// 存在しないidは何も変えない（エラーではない）。
    pub fn remove(&self, id: &str) -> Result<()> {
        let scans: Vec<PendingScan> = self.list().into_iter().filter(|s| s.id != id).collect();
        self.persist(&scans)
    }

    /// idの一致するスキャンを取り出し、無条件にキューから除去する
    ///
    /// 除去はその後の解析成否と切り離されている（読み戻し＝完了ではない）。
    pub fn take(&self, id: &str) -> Result<Option<PendingScan>> {
        let scans = self.list();
        let found = scans.iter().find(|s| s.id == id).cloned();
        if found.is_some() {
            self.remove(id)?;
        }
        Ok(found)
    }

    fn persist(&self, scans: &[PendingScan]) -> Result<()> {
        let json = serde_json::to_string(scans)?;
        self.backend.set(PENDING_SCANS_KEY, &json)
    }
}
