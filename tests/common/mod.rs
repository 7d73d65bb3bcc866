//! 統合テスト用の共通部品
//!
//! スクリプト化したバックエンドと、呼び出しを記録するプラットフォーム。

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use psydesign::api::types::{
    AudiencePersona, BrandAnalysis, BrandPersonality, ChatReply, ChatRequest, FontChoice, FontPairing,
    GeneratedBrand, HistoryEntry, HistoryId, StoredAnalysis, VisualIdentity,
};
use psydesign::api::{ApiError, BrandBackend};
use psydesign::gui::audio::AudioHandle;
use psydesign::gui::{Dashboard, Language, Platform, PlatformError, Session};
use tokio::sync::Notify;

pub const BACKEND_ORIGIN: &str = "http://backend.test";

pub fn analysis(archetype: &str, heading: &str, body: &str, brand: &str) -> BrandAnalysis {
    BrandAnalysis {
        brand_personality: BrandPersonality {
            archetype: archetype.to_string(),
            tone_of_voice: "Warm".to_string(),
            values: vec!["Care".to_string()],
        },
        visual_identity: VisualIdentity {
            font_pairing: FontPairing {
                heading: FontChoice {
                    name: heading.to_string(),
                    usage: None,
                },
                body: FontChoice {
                    name: body.to_string(),
                    usage: None,
                },
            },
            extra: Default::default(),
        },
        target_audience_persona: AudiencePersona {
            name: "Maya".to_string(),
            age_range: "25-34".to_string(),
            occupation: "Designer".to_string(),
            interests: vec!["Cycling".to_string()],
            pain_points: vec!["Greenwashing".to_string()],
        },
        brand_names: vec![brand.to_string()],
        slogans: vec!["Brewed for tomorrow.".to_string()],
        brand_story: "It started with a single bean.".to_string(),
        extra: Default::default(),
    }
}

pub fn coffee_analysis() -> BrandAnalysis {
    analysis("The Caregiver", "Playfair Display", "Lato", "Green Bean Co")
}

pub fn entry(id: HistoryId, description: &str, analysis: BrandAnalysis) -> HistoryEntry {
    HistoryEntry {
        id,
        description: description.to_string(),
        analysis: StoredAnalysis::Ready(analysis),
        logo_url: format!("/logos/{}.png", id),
        language: Some("en".to_string()),
        created_at: None,
    }
}

/// 失敗の指定（`ApiError` はCloneできないので都度作る）
#[derive(Debug, Clone)]
pub enum Failure {
    Status(u16, Option<String>),
    Malformed,
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::Status(status, message) => ApiError::Status {
                status: *status,
                message: message.clone(),
            },
            Failure::Malformed => serde_json::from_str::<GeneratedBrand>("{\"id\": 1}")
                .unwrap_err()
                .into(),
        }
    }
}

/// スクリプト化したバックエンド
pub struct ScriptedBackend {
    history: Mutex<Vec<HistoryEntry>>,
    next_id: Mutex<HistoryId>,
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
    pub generated_analysis: Mutex<BrandAnalysis>,
    pub generate_failure: Mutex<Option<Failure>>,
    pub delete_failure: Mutex<Option<Failure>>,
    pub list_failure: Mutex<Option<Failure>>,
    pub chat_result: Mutex<Result<ChatReply, Failure>>,
    pub tts_result: Mutex<Result<Vec<u8>, Failure>>,
    pub proxy_result: Mutex<Result<Vec<u8>, Failure>>,
    /// チャットで送られた分析結果（送信時と同じJSON文字列）
    pub chat_payloads: Mutex<Vec<String>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
            generated_analysis: Mutex::new(coffee_analysis()),
            generate_failure: Mutex::new(None),
            delete_failure: Mutex::new(None),
            list_failure: Mutex::new(None),
            chat_result: Mutex::new(Ok(ChatReply {
                reply: Some("We brew with care.".to_string()),
                error: None,
            })),
            tts_result: Mutex::new(Ok(b"RIFF....WAVE".to_vec())),
            proxy_result: Mutex::new(Ok(vec![0x89, b'P', b'N', b'G'])),
            chat_payloads: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedBackend {
    /// 既存の履歴（新しい順）
    pub fn with_history(entries: Vec<HistoryEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        let backend = Self::default();
        *backend.history.lock() = entries;
        *backend.next_id.lock() = next_id;
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn history_ids(&self) -> Vec<HistoryId> {
        self.history.lock().iter().map(|e| e.id).collect()
    }

    /// エンドポイントを保留にする。`release` するまで応答しない
    pub fn hold(&self, endpoint: &'static str) {
        self.gates.lock().insert(endpoint, Arc::new(Notify::new()));
    }

    pub fn release(&self, endpoint: &'static str) {
        if let Some(gate) = self.gates.lock().remove(endpoint) {
            gate.notify_one();
        }
    }

    async fn enter(&self, endpoint: &'static str, detail: String) {
        self.calls.lock().push(if detail.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}:{}", endpoint, detail)
        });
        let gate = self.gates.lock().get(endpoint).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl BrandBackend for ScriptedBackend {
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.enter("list", String::new()).await;
        if let Some(failure) = self.list_failure.lock().as_ref() {
            return Err(failure.to_error());
        }
        Ok(self.history.lock().clone())
    }

    async fn delete_history(&self, id: HistoryId) -> Result<(), ApiError> {
        self.enter("delete", id.to_string()).await;
        if let Some(failure) = self.delete_failure.lock().as_ref() {
            return Err(failure.to_error());
        }
        let mut history = self.history.lock();
        let before = history.len();
        history.retain(|e| e.id != id);
        if history.len() == before {
            return Err(ApiError::Status {
                status: 404,
                message: Some("History item not found".to_string()),
            });
        }
        Ok(())
    }

    async fn generate_brand(
        &self,
        description: &str,
        language: &str,
    ) -> Result<GeneratedBrand, ApiError> {
        self.enter("generate", format!("{}:{}", description, language))
            .await;
        if let Some(failure) = self.generate_failure.lock().as_ref() {
            return Err(failure.to_error());
        }

        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            *next_id
        };
        let analysis = self.generated_analysis.lock().clone();
        self.history
            .lock()
            .insert(0, entry(id, description, analysis.clone()));

        Ok(GeneratedBrand {
            id,
            analysis,
            logo_url: format!("/logos/{}.png", id),
        })
    }

    async fn chat_with_persona(
        &self,
        analysis: &BrandAnalysis,
        message: &str,
        language: &str,
    ) -> Result<ChatReply, ApiError> {
        let request = ChatRequest::new(analysis, message, language)?;
        self.chat_payloads.lock().push(request.analysis);
        self.enter("chat", format!("{}:{}", message, language)).await;
        self.chat_result.lock().clone().map_err(|f| f.to_error())
    }

    async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>, ApiError> {
        self.enter("tts", text.to_string()).await;
        self.tts_result.lock().clone().map_err(|f| f.to_error())
    }

    async fn proxy_image(&self, image_src: &str) -> Result<Vec<u8>, ApiError> {
        self.enter("proxy", image_src.to_string()).await;
        self.proxy_result.lock().clone().map_err(|f| f.to_error())
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", BACKEND_ORIGIN, url)
        } else {
            url.to_string()
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// 呼び出しを記録するプラットフォーム
pub struct RecordingPlatform {
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub confirm_answer: AtomicBool,
    pub copied: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
    pub cancel_save: AtomicBool,
    pub focused: Mutex<Vec<String>>,
    pub delays: Mutex<Vec<Duration>>,
    /// 音声の出来事（"play:1", "stop:1", "end:1"）
    pub audio_events: Mutex<Vec<String>>,
    /// 設定すると再生終了時にこのデコードエラーを返す
    pub playback_error: Mutex<Option<String>>,
    playing: Mutex<HashMap<u64, Arc<Notify>>>,
    next_handle: AtomicU64,
    delay_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
            copied: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            cancel_save: AtomicBool::new(false),
            focused: Mutex::new(Vec::new()),
            delays: Mutex::new(Vec::new()),
            audio_events: Mutex::new(Vec::new()),
            playback_error: Mutex::new(None),
            playing: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(0),
            delay_gate: Mutex::new(None),
        }
    }
}

impl RecordingPlatform {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn audio_events(&self) -> Vec<String> {
        self.audio_events.lock().clone()
    }

    /// 再生を自然終了させる
    pub fn finish_playback(&self, handle: u64) {
        if let Some(done) = self.playing.lock().get(&handle) {
            done.notify_one();
        }
    }

    pub fn is_playing(&self, handle: u64) -> bool {
        self.playing.lock().contains_key(&handle)
    }

    /// 以降の `delay` を `release_delay` まで止める
    pub fn hold_delays(&self) {
        *self.delay_gate.lock() = Some(Arc::new(Notify::new()));
    }

    /// 待っている `delay` を古い順に1つ進める
    pub fn release_delay(&self) {
        if let Some(gate) = self.delay_gate.lock().as_ref() {
            gate.notify_one();
        }
    }
}

#[async_trait(?Send)]
impl Platform for RecordingPlatform {
    async fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().push(message.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }

    async fn copy_text(&self, text: &str) -> Result<(), PlatformError> {
        self.copied.lock().push(text.to_string());
        Ok(())
    }

    async fn save_file(
        &self,
        suggested_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<PathBuf>, PlatformError> {
        if self.cancel_save.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.saved.lock().push((suggested_name.to_string(), bytes));
        Ok(Some(PathBuf::from(suggested_name)))
    }

    fn play_audio(&self, _bytes: Vec<u8>) -> Result<AudioHandle, PlatformError> {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        self.playing.lock().insert(id, Arc::new(Notify::new()));
        self.audio_events.lock().push(format!("play:{}", id));
        Ok(AudioHandle(id))
    }

    async fn wait_audio_end(&self, handle: AudioHandle) -> Result<(), PlatformError> {
        let done = self.playing.lock().get(&handle.0).cloned();
        if let Some(done) = done {
            done.notified().await;
        }
        self.playing.lock().remove(&handle.0);
        self.audio_events.lock().push(format!("end:{}", handle.0));
        match self.playback_error.lock().clone() {
            Some(message) => Err(PlatformError::AudioDecode(message)),
            None => Ok(()),
        }
    }

    fn stop_audio(&self, handle: AudioHandle) {
        self.audio_events.lock().push(format!("stop:{}", handle.0));
        if let Some(done) = self.playing.lock().get(&handle.0) {
            done.notify_one();
        }
    }

    async fn focus(&self, element_id: &str) {
        self.focused.lock().push(element_id.to_string());
    }

    async fn delay(&self, duration: Duration) {
        self.delays.lock().push(duration);
        let gate = self.delay_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

pub type TestDashboard = Dashboard<ScriptedBackend, RecordingPlatform>;

pub fn dashboard_with(backend: ScriptedBackend) -> TestDashboard {
    Dashboard::new(backend, RecordingPlatform::default(), Language::En)
}

/// 条件が成り立つまで他のタスクに処理を譲る
pub async fn wait_until(dashboard: &TestDashboard, condition: impl Fn(&Session) -> bool) {
    for _ in 0..10_000 {
        if condition(&dashboard.snapshot()) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition was never met");
}

/// 呼び出し記録の条件が成り立つまで待つ
pub async fn wait_for_call(dashboard: &TestDashboard, prefix: &str) {
    for _ in 0..10_000 {
        if dashboard.backend().count_calls(prefix) > 0 {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("backend call {} never happened", prefix);
}
