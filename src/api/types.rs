//! バックエンドAPIのデータ型
//!
//! `/api/*` エンドポイントが返すJSONをそのまま表す型。

use serde::{Deserialize, Serialize};

/// 履歴エントリのID
pub type HistoryId = i64;

/// ブランド分析レポート（サーバー生成、受信後は不変）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandAnalysis {
    pub brand_personality: BrandPersonality,
    pub visual_identity: VisualIdentity,
    pub target_audience_persona: AudiencePersona,
    pub brand_names: Vec<String>,
    pub slogans: Vec<String>,
    pub brand_story: String,
    /// 画面では使わないがチャット送信時にそのまま返す項目
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BrandAnalysis {
    /// 見出し用フォント名
    pub fn heading_font(&self) -> &str {
        &self.visual_identity.font_pairing.heading.name
    }

    /// 本文用フォント名
    pub fn body_font(&self) -> &str {
        &self.visual_identity.font_pairing.body.name
    }

    /// 最初のブランド名（ダウンロードファイル名の元）
    pub fn primary_brand_name(&self) -> Option<&str> {
        self.brand_names.first().map(String::as_str)
    }
}

/// ブランドパーソナリティ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandPersonality {
    pub archetype: String,
    pub tone_of_voice: String,
    pub values: Vec<String>,
}

/// ビジュアルアイデンティティ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualIdentity {
    pub font_pairing: FontPairing,
    /// `color_palette` など
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontPairing {
    pub heading: FontChoice,
    pub body: FontChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontChoice {
    pub name: String,
    /// 採用理由などの補足（バックエンドによっては省略）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

/// ターゲット層のペルソナ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudiencePersona {
    pub name: String,
    pub age_range: String,
    pub occupation: String,
    pub interests: Vec<String>,
    pub pain_points: Vec<String>,
}

/// 履歴に保存された分析結果
///
/// サーバー側で壊れたJSONは `{"error": "..."}` に置き換えられて返るため、
/// 一覧全体を捨てずに行単位で扱えるようにしている。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StoredAnalysis {
    Ready(BrandAnalysis),
    Corrupt(serde_json::Value),
}

impl StoredAnalysis {
    pub fn as_ready(&self) -> Option<&BrandAnalysis> {
        match self {
            StoredAnalysis::Ready(analysis) => Some(analysis),
            StoredAnalysis::Corrupt(_) => None,
        }
    }
}

/// 履歴エントリ（サーバー所有、クライアントは読み取り専用キャッシュ）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub description: String,
    pub analysis: StoredAnalysis,
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// `POST /api/generate-brand` のリクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub description: String,
    pub language: String,
}

/// `POST /api/generate-brand` の成功レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedBrand {
    pub id: HistoryId,
    pub analysis: BrandAnalysis,
    pub logo_url: String,
}

/// `POST /api/chat-with-persona` のリクエスト
///
/// `analysis` は分析結果をJSON文字列化したもの。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub analysis: String,
    pub message: String,
    pub language: String,
}

impl ChatRequest {
    pub fn new(
        analysis: &BrandAnalysis,
        message: &str,
        language: &str,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            analysis: serde_json::to_string(analysis)?,
            message: message.to_string(),
            language: language.to_string(),
        })
    }
}

/// `POST /api/chat-with-persona` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/tts` のリクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TtsRequest {
    pub text: String,
}

/// エラーレスポンス本文
///
/// 独自の `error` とFastAPIの `detail` の両方を受け付ける。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        if let Some(error) = self.error.as_ref().filter(|e| !e.trim().is_empty()) {
            return Some(error.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}
