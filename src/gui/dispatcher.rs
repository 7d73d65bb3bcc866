//! インテントディスパッチャー
//!
//! ユーザー操作を [`Intent`] として受け取り、バックエンドとプラットフォームを
//! 呼び出してセッションを更新する。セッションのロックはawaitをまたいで保持しない。
//! そのため独立した操作（チャット送信中の履歴選択など）は並行して進む。
//!
//! 変更のたびにリビジョン番号を進め、UIは [`Dashboard::subscribe`] で再描画する。

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::backend::BrandBackend;
use crate::api::error::ApiError;
use crate::api::types::{HistoryId, StoredAnalysis};

use super::audio::AudioHandle;
use super::download::logo_file_name;
use super::i18n::Language;
use super::models::{ChatSender, InputField, MessageId, Transition, ViewState};
use super::state_management::Session;

/// 削除した履歴行のフェードアウト時間
pub const ROW_EXIT_DURATION: Duration = Duration::from_millis(300);

/// コピー完了表示の時間
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(1500);

/// チャット入力欄の要素ID
pub const CHAT_INPUT_ID: &str = "chat-input";

pub const MSG_EMPTY_DESCRIPTION: &str = "Please describe your brand concept.";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this design?";
pub const MSG_DELETE_FAILED: &str = "Could not delete the item.";
pub const MSG_CORRUPT_HISTORY: &str = "This design could not be displayed.";
pub const MSG_CHAT_NO_REPLY: &str = "Sorry, I could not respond.";
pub const MSG_CHAT_FAILED: &str = "An error occurred.";
pub const MSG_TTS_UNAVAILABLE: &str = "TTS feature is part of the full product.";
const SERVER_ERROR_FALLBACK: &str = "Server error.";
const MALFORMED_RESPONSE: &str = "Unexpected response from server.";

/// ユーザー操作
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// 入力中の説明文でブランドを生成
    Generate,
    EditDescription(String),
    SelectHistory(HistoryId),
    DeleteHistory(HistoryId),
    /// 入力フォームに戻る
    NewDesign,
    RefreshHistory,
    EditChatInput(String),
    SendChat,
    CopyMessage(MessageId),
    ToggleSpeak(MessageId),
    DownloadLogo,
    ChangeLanguage(Language),
    ToggleSidebar,
}

impl Intent {
    /// 入力欄の編集インテント
    pub fn edit(field: InputField, value: String) -> Self {
        match field {
            InputField::Description => Intent::EditDescription(value),
            InputField::ChatMessage => Intent::EditChatInput(value),
        }
    }
}

struct Shared<B, P> {
    session: Mutex<Session>,
    backend: B,
    platform: P,
    revision: watch::Sender<u64>,
}

/// ダッシュボード（セッション + バックエンド + プラットフォーム）
pub struct Dashboard<B, P> {
    inner: Arc<Shared<B, P>>,
}

impl<B, P> Clone for Dashboard<B, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

enum GenerateStep {
    Busy,
    Empty,
    Start {
        description: String,
        language: Language,
    },
}

enum SpeakStep {
    Stop(Option<AudioHandle>),
    Start {
        token: u64,
        text: String,
        previous: Option<AudioHandle>,
    },
    Ignore,
}

impl<B, P> Dashboard<B, P>
where
    B: BrandBackend + 'static,
    P: super::platform::Platform,
{
    pub fn new(backend: B, platform: P, language: Language) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Shared {
                session: Mutex::new(Session::new(language)),
                backend,
                platform,
                revision,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn platform(&self) -> &P {
        &self.inner.platform
    }

    /// 現在のセッションの複製
    pub fn snapshot(&self) -> Session {
        self.inner.session.lock().clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.inner.session.lock().view
    }

    /// 変更通知の購読
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.session.lock())
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let result = {
            let mut session = self.inner.session.lock();
            f(&mut session)
        };
        self.inner.revision.send_modify(|rev| *rev += 1);
        result
    }

    fn stop_stale_audio(&self, handle: Option<AudioHandle>) {
        if let Some(handle) = handle {
            self.inner.platform.stop_audio(handle);
        }
    }

    /// インテントを処理し、前後のビュー状態を返す
    pub async fn dispatch(&self, intent: Intent) -> Transition {
        let before = self.view_state();
        tracing::debug!("🎯 インテント: {:?}", intent);

        match intent {
            Intent::Generate => self.generate().await,
            Intent::EditDescription(text) => self.update(|s| s.description = text),
            Intent::SelectHistory(id) => self.select_history(id).await,
            Intent::DeleteHistory(id) => self.delete_history(id).await,
            Intent::NewDesign => {
                let stale = self.update(|s| s.show_input());
                self.stop_stale_audio(stale);
            }
            Intent::RefreshHistory => self.refresh_history().await,
            Intent::EditChatInput(text) => self.update(|s| s.chat.input = text),
            Intent::SendChat => self.send_chat().await,
            Intent::CopyMessage(id) => self.copy_message(id).await,
            Intent::ToggleSpeak(id) => self.toggle_speak(id).await,
            Intent::DownloadLogo => self.download_logo().await,
            Intent::ChangeLanguage(language) => self.change_language(language).await,
            Intent::ToggleSidebar => self.update(|s| s.toggle_sidebar()),
        }

        Transition {
            before,
            after: self.view_state(),
        }
    }

    /// 履歴を取り直して置き換える。失敗は記録のみ（一覧はそのまま）
    pub async fn refresh_history(&self) {
        match self.inner.backend.list_history().await {
            Ok(entries) => {
                tracing::info!("📚 履歴を読み込みました: {}件", entries.len());
                self.update(|s| s.history.replace_all(entries));
            }
            Err(e) => tracing::error!("❌ 履歴の読み込みに失敗: {}", e),
        }
    }

    async fn generate(&self) {
        let step = self.update(|s| {
            if s.generating {
                return GenerateStep::Busy;
            }
            let description = s.description.trim().to_string();
            if description.is_empty() {
                return GenerateStep::Empty;
            }
            s.begin_generation();
            GenerateStep::Start {
                description,
                language: s.language,
            }
        });

        let (description, language) = match step {
            GenerateStep::Busy => {
                tracing::warn!("⚠️ 生成中のため新しい生成要求を無視します");
                return;
            }
            GenerateStep::Empty => {
                self.inner.platform.alert(MSG_EMPTY_DESCRIPTION).await;
                return;
            }
            GenerateStep::Start {
                description,
                language,
            } => (description, language),
        };

        tracing::info!("🎨 ブランド生成を開始 ({})", language);

        match self
            .inner
            .backend
            .generate_brand(&description, language.code())
            .await
        {
            Ok(created) => {
                let logo_src = self.inner.backend.resolve_url(&created.logo_url);
                let stale = self.update(|s| s.show_results(created.analysis, logo_src));
                self.stop_stale_audio(stale);

                self.refresh_history().await;
                self.update(|s| s.set_active_history_item(Some(created.id)));
                tracing::info!("✅ ブランド生成完了: #{}", created.id);
            }
            Err(e) => {
                tracing::error!("❌ ブランド生成に失敗: {}", e);
                let message = format!(
                    "Failed to generate brand identity: {}",
                    describe_failure(&e, SERVER_ERROR_FALLBACK)
                );
                self.inner.platform.alert(&message).await;
                let stale = self.update(|s| s.show_input());
                self.stop_stale_audio(stale);
            }
        }

        self.update(|s| s.end_generation());
    }

    async fn select_history(&self, id: HistoryId) {
        let Some(entry) = self.read(|s| s.history.find(id).cloned()) else {
            tracing::debug!("履歴 #{} は一覧にありません", id);
            return;
        };

        match entry.analysis {
            StoredAnalysis::Ready(analysis) => {
                let logo_src = self.inner.backend.resolve_url(&entry.logo_url);
                let stale = self.update(|s| {
                    let stale = s.show_results(analysis, logo_src);
                    s.set_active_history_item(Some(id));
                    s.close_sidebar();
                    stale
                });
                self.stop_stale_audio(stale);
            }
            StoredAnalysis::Corrupt(raw) => {
                tracing::warn!("⚠️ 履歴 #{} の分析結果が壊れています: {}", id, raw);
                self.inner.platform.alert(MSG_CORRUPT_HISTORY).await;
            }
        }
    }

    async fn delete_history(&self, id: HistoryId) {
        if !self.inner.platform.confirm(MSG_CONFIRM_DELETE).await {
            tracing::debug!("🗑️ 削除をキャンセル: #{}", id);
            return;
        }

        if let Err(e) = self.inner.backend.delete_history(id).await {
            tracing::error!("❌ 履歴 #{} の削除に失敗: {}", id, e);
            self.inner.platform.alert(MSG_DELETE_FAILED).await;
            return;
        }

        tracing::info!("🗑️ 履歴を削除: #{}", id);
        self.update(|s| s.history.mark_leaving(id));
        self.inner.platform.delay(ROW_EXIT_DURATION).await;

        let stale = self.update(|s| {
            s.history.detach(id);
            // 取り外した時点でまだ表示中なら入力フォームへ
            if s.is_active_history_item(id) {
                s.show_input()
            } else {
                None
            }
        });
        self.stop_stale_audio(stale);

        self.refresh_history().await;
    }

    async fn send_chat(&self) {
        let prepared = self.update(|s| {
            let message = s.chat.input.trim().to_string();
            if message.is_empty() || s.chat.sending {
                return None;
            }
            let analysis = s.report.as_ref()?.analysis.clone();

            s.chat.push_user(message.clone());
            s.chat.input.clear();
            s.chat.sending = true;
            Some((message, analysis, s.chat.epoch(), s.language))
        });

        let Some((message, analysis, epoch, language)) = prepared else {
            return;
        };

        let reply = match self
            .inner
            .backend
            .chat_with_persona(&analysis, &message, language.code())
            .await
        {
            Ok(reply) => reply
                .reply
                .filter(|text| !text.is_empty())
                .or(reply.error.filter(|text| !text.is_empty()))
                .unwrap_or_else(|| MSG_CHAT_NO_REPLY.to_string()),
            Err(e) => {
                tracing::error!("❌ チャット送信に失敗: {}", e);
                MSG_CHAT_FAILED.to_string()
            }
        };

        let delivered = self.update(|s| {
            if s.chat.epoch() != epoch {
                return false;
            }
            s.chat.push_persona(reply);
            s.chat.sending = false;
            true
        });

        if delivered {
            self.inner.platform.focus(CHAT_INPUT_ID).await;
        } else {
            tracing::debug!("💬 表示中のレポートが変わったため返信を破棄");
        }
    }

    async fn copy_message(&self, id: MessageId) {
        let Some(text) = self.read(|s| s.chat.message(id).map(|m| m.text.clone())) else {
            return;
        };

        match self.inner.platform.copy_text(&text).await {
            Ok(()) => {
                let Some(token) = self.update(|s| s.chat.mark_copied(id)) else {
                    return;
                };
                self.inner.platform.delay(COPY_ACK_DURATION).await;
                self.update(|s| s.chat.clear_copied(id, token));
            }
            Err(e) => tracing::warn!("⚠️ コピーに失敗: {}", e),
        }
    }

    async fn toggle_speak(&self, id: MessageId) {
        let step = self.update(|s| {
            if s.audio.is_active(id) {
                return SpeakStep::Stop(s.audio.stop());
            }
            let Some(text) = s
                .chat
                .message(id)
                .filter(|m| m.sender == ChatSender::Persona)
                .map(|m| m.text.clone())
            else {
                return SpeakStep::Ignore;
            };
            let (token, previous) = s.audio.begin(id);
            SpeakStep::Start {
                token,
                text,
                previous,
            }
        });

        let (token, text) = match step {
            SpeakStep::Ignore => return,
            SpeakStep::Stop(handle) => {
                tracing::debug!("⏹️ 読み上げを停止");
                self.stop_stale_audio(handle);
                return;
            }
            SpeakStep::Start {
                token,
                text,
                previous,
            } => {
                self.stop_stale_audio(previous);
                (token, text)
            }
        };

        let bytes = match self.inner.backend.text_to_speech(&text).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("❌ 音声合成に失敗: {}", e);
                if self.read(|s| s.audio.is_current(token)) {
                    let message = match &e {
                        ApiError::Status { .. } => e.user_message(MSG_TTS_UNAVAILABLE),
                        _ => format!("Could not play audio: {}", e),
                    };
                    self.inner.platform.alert(&message).await;
                }
                self.update(|s| s.audio.finish(token));
                return;
            }
        };

        // 再生開始と登録を同じロック内で行い、停止済みなら再生しない
        let started = self.update(|s| {
            if !s.audio.is_current(token) {
                return None;
            }
            let result = self.inner.platform.play_audio(bytes);
            match &result {
                Ok(handle) => {
                    s.audio.attach(token, *handle);
                }
                Err(_) => s.audio.finish(token),
            }
            Some(result)
        });

        let handle = match started {
            None => {
                tracing::debug!("🔇 停止済みの読み上げ音声を破棄");
                return;
            }
            Some(Ok(handle)) => handle,
            Some(Err(e)) => {
                tracing::error!("❌ 再生に失敗: {}", e);
                self.inner
                    .platform
                    .alert(&format!("Could not play audio: {}", e))
                    .await;
                return;
            }
        };

        let ended = self.inner.platform.wait_audio_end(handle).await;
        let current = self.update(|s| {
            let current = s.audio.is_current(token);
            s.audio.finish(token);
            current
        });
        if let Err(e) = ended {
            tracing::error!("❌ 再生中にエラー: {}", e);
            if current {
                self.inner
                    .platform
                    .alert(&format!("Could not play audio: {}", e))
                    .await;
            }
        }
    }

    async fn download_logo(&self) {
        let prepared = self.update(|s| {
            if s.download_busy {
                return None;
            }
            let report = s.report.as_ref()?;
            let job = (report.logo_src.clone(), logo_file_name(&report.analysis));
            s.download_busy = true;
            Some(job)
        });

        let Some((logo_src, file_name)) = prepared else {
            return;
        };

        tracing::info!("⬇️ ロゴをダウンロード: {}", file_name);
        let result = match self.inner.backend.proxy_image(&logo_src).await {
            Ok(bytes) => self
                .inner
                .platform
                .save_file(&file_name, bytes)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Err(e) => Err(describe_failure(&e, SERVER_ERROR_FALLBACK)),
        };

        if let Err(message) = result {
            tracing::error!("❌ ロゴのダウンロードに失敗: {}", message);
            self.inner
                .platform
                .alert(&format!("Could not download the logo: {}", message))
                .await;
        }

        self.update(|s| s.download_busy = false);
    }

    /// 言語切り替え（セッションを作り直して履歴を再取得）
    async fn change_language(&self, language: Language) {
        let stale = self.update(|s| {
            let stale = s.audio.stop();
            let generating = s.generating;
            *s = Session::new(language);
            s.generating = generating;
            stale
        });
        self.stop_stale_audio(stale);
        tracing::info!("🌐 表示言語を変更: {}", language);
        self.refresh_history().await;
    }
}

/// ユーザー向けの失敗理由
fn describe_failure(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Status { .. } => error.user_message(fallback),
        ApiError::Decode(_) => MALFORMED_RESPONSE.to_string(),
        ApiError::Http(e) => e.to_string(),
        ApiError::InvalidUrl(url) => format!("invalid URL: {}", url),
    }
}
