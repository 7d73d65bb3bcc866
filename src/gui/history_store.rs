//! 履歴ストア
//!
//! サーバー側の保存済みデザインのミラー。変更（作成・削除）のたびに
//! 一覧全体を取り直して置き換える（差分マージはしない）。

use crate::api::types::{HistoryEntry, HistoryId};

/// 履歴の1行
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub entry: HistoryEntry,
    /// 削除アニメーション中
    pub leaving: bool,
}

/// 履歴キャッシュ（バックエンドが返した順のまま保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    rows: Vec<HistoryRow>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 一覧全体を置き換える
    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>) {
        tracing::debug!("📚 履歴を置き換え: {}件", entries.len());
        self.rows = entries
            .into_iter()
            .map(|entry| HistoryRow {
                entry,
                leaving: false,
            })
            .collect();
    }

    /// IDで検索（件数は少ない前提の線形探索）
    pub fn find(&self, id: HistoryId) -> Option<&HistoryEntry> {
        self.rows
            .iter()
            .find(|row| row.entry.id == id)
            .map(|row| &row.entry)
    }

    pub fn contains(&self, id: HistoryId) -> bool {
        self.find(id).is_some()
    }

    /// 削除アニメーション開始。行が存在しなければfalse
    pub fn mark_leaving(&mut self, id: HistoryId) -> bool {
        match self.rows.iter_mut().find(|row| row.entry.id == id) {
            Some(row) => {
                row.leaving = true;
                true
            }
            None => false,
        }
    }

    /// 行を取り外す
    pub fn detach(&mut self, id: HistoryId) -> Option<HistoryEntry> {
        let index = self.rows.iter().position(|row| row.entry.id == id)?;
        Some(self.rows.remove(index).entry)
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
