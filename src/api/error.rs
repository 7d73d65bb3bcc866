//! バックエンドAPI用エラー型

use thiserror::Error;

/// APIエラー型
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTPリクエストに失敗しました: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx以外のステータス。`message` はレスポンス本文の `error` / `detail`
    #[error("server returned {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("JSONパースエラー: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("不正なバックエンドURL: {0}")]
    InvalidUrl(String),
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl ApiError {
    /// サーバーが返したエラーメッセージ（あれば）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// ユーザー向けの表示文。サーバーのメッセージを優先し、なければ `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}
