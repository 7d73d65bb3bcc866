//! ロゴのダウンロード
//!
//! 画像はバックエンドのプロキシ経由で取得する（外部ホストの画像を直接保存できないため）。

use crate::api::types::BrandAnalysis;

use super::fonts::join_words;

/// 保存ファイル名: `logo_{最初のブランド名}.png`（空白は `_`）
pub fn logo_file_name(analysis: &BrandAnalysis) -> String {
    let name = analysis
        .primary_brand_name()
        .map(|name| join_words(name, "_"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "brand".to_string());
    format!("logo_{}.png", name)
}
