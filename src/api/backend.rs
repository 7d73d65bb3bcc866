//! バックエンドトレイト
//!
//! ダッシュボードが利用する6つのエンドポイントの抽象。
//! HTTP実装は [`super::http_client::HttpBackend`]、テストではスクリプト化した実装を差し込む。

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{BrandAnalysis, ChatReply, GeneratedBrand, HistoryEntry, HistoryId};

/// ブランド生成バックエンド
#[async_trait]
pub trait BrandBackend: Send + Sync {
    /// `GET /api/history`
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `DELETE /api/history/{id}`
    async fn delete_history(&self, id: HistoryId) -> Result<(), ApiError>;

    /// `POST /api/generate-brand`
    async fn generate_brand(
        &self,
        description: &str,
        language: &str,
    ) -> Result<GeneratedBrand, ApiError>;

    /// `POST /api/chat-with-persona`
    async fn chat_with_persona(
        &self,
        analysis: &BrandAnalysis,
        message: &str,
        language: &str,
    ) -> Result<ChatReply, ApiError>;

    /// `POST /api/tts` 音声バイト列を返す
    async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>, ApiError>;

    /// `GET /api/proxy-image?url=...` 画像バイト列を返す
    ///
    /// `image_src` は表示中の画像URL。同一オリジンの絶対URLならパスに直して渡す。
    async fn proxy_image(&self, image_src: &str) -> Result<Vec<u8>, ApiError>;

    /// サーバー相対URL（`/static/...` など）を表示用の絶対URLに解決
    fn resolve_url(&self, url: &str) -> String {
        url.to_string()
    }

    /// バックエンド名を取得
    fn name(&self) -> &'static str;
}
