//! HTTPバックエンド実装
//!
//! reqwestで `/api/*` を呼び出す。タイムアウトは設定がある場合のみ付与し、
//! それ以外はトランスポート自身のエラー通知に任せる。

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::backend::BrandBackend;
use super::error::ApiError;
use super::types::{
    BrandAnalysis, ChatReply, ChatRequest, ErrorBody, GenerateRequest, GeneratedBrand,
    HistoryEntry, HistoryId, TtsRequest,
};

/// バックエンド接続設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// バックエンドのオリジン（例: `http://127.0.0.1:8000`）
    pub base_url: String,
    /// リクエストタイムアウト（秒）。Noneならタイムアウトなし
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// HTTPバックエンド
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    /// 新しいインスタンスを作成
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{} ({})", config.base_url, e)))?;

        tracing::debug!("🌐 HTTPバックエンド初期化: {}", base_url);
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.origin(), path)
    }

    /// `scheme://host[:port]`（末尾スラッシュなし）
    fn origin(&self) -> String {
        self.base_url
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string()
    }

    /// 同一オリジンの絶対URLをパスに変換（`/api/proxy-image` に渡す形）
    pub fn proxy_path(&self, image_src: &str) -> String {
        let origin = self.origin();
        match image_src.strip_prefix(&origin) {
            Some(path) if path.starts_with('/') => path.to_string(),
            _ => image_src.to_string(),
        }
    }

    /// 2xx以外ならエラー本文を読んで `ApiError::Status` にする
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message());

        tracing::warn!(
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "⚠️ API error response"
        );

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// 成功レスポンスをJSONとしてデコード
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BrandBackend for HttpBackend {
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self.client.get(self.endpoint("/api/history")).send().await?;
        Self::decode(response).await
    }

    async fn delete_history(&self, id: HistoryId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/history/{}", id)))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn generate_brand(
        &self,
        description: &str,
        language: &str,
    ) -> Result<GeneratedBrand, ApiError> {
        let request = GenerateRequest {
            description: description.to_string(),
            language: language.to_string(),
        };
        let response = self
            .client
            .post(self.endpoint("/api/generate-brand"))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn chat_with_persona(
        &self,
        analysis: &BrandAnalysis,
        message: &str,
        language: &str,
    ) -> Result<ChatReply, ApiError> {
        let request = ChatRequest::new(analysis, message, language)?;
        let response = self
            .client
            .post(self.endpoint("/api/chat-with-persona"))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>, ApiError> {
        let request = TtsRequest {
            text: text.to_string(),
        };
        let response = self
            .client
            .post(self.endpoint("/api/tts"))
            .json(&request)
            .send()
            .await?;
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn proxy_image(&self, image_src: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!(
            "{}?url={}",
            self.endpoint("/api/proxy-image"),
            urlencoding::encode(&self.proxy_path(image_src))
        );
        let response = self.client.get(url).send().await?;
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            self.endpoint(url)
        } else {
            url.to_string()
        }
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}
