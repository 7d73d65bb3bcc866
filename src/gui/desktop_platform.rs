//! デスクトップ（Dioxus WebView）向けのプラットフォーム実装

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use tokio::task::JoinHandle;

use super::platform::{AudioHandle, Platform, PlatformError};

const APP_TITLE: &str = "PsyDesign AI";

/// 停止フラグの確認間隔
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

struct PlaybackTask {
    stop: Arc<AtomicBool>,
    task: Option<JoinHandle<Result<(), PlatformError>>>,
}

/// デスクトップ実装
#[derive(Default)]
pub struct DesktopPlatform {
    playbacks: Mutex<HashMap<u64, PlaybackTask>>,
    next_handle: AtomicU64,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// 音声を再生（ブロッキング）。停止フラグが立ったら途中で止める
    fn play_blocking(bytes: Vec<u8>, stop: Arc<AtomicBool>) -> Result<(), PlatformError> {
        use rodio::{Decoder, OutputStream, Sink};

        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlatformError::AudioOutput(format!("音声出力の初期化に失敗: {}", e)))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| PlatformError::AudioOutput(format!("音声シンクの作成に失敗: {}", e)))?;

        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| PlatformError::AudioDecode(format!("音声デコードに失敗: {}", e)))?;

        sink.append(source);
        while !sink.empty() {
            if stop.load(Ordering::SeqCst) {
                sink.stop();
                tracing::debug!("⏹️ 再生を中断");
                break;
            }
            std::thread::sleep(STOP_POLL_INTERVAL);
        }

        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<(), PlatformError> {
        match dioxus::document::eval(script).await {
            Ok(_) => Ok(()),
            Err(e) => Err(PlatformError::Script(format!("{:?}", e))),
        }
    }
}

#[async_trait(?Send)]
impl Platform for DesktopPlatform {
    async fn alert(&self, message: &str) {
        tracing::debug!("💬 アラート: {}", message);
        AsyncMessageDialog::new()
            .set_title(APP_TITLE)
            .set_description(message)
            .set_level(MessageLevel::Info)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    }

    async fn confirm(&self, message: &str) -> bool {
        let result = AsyncMessageDialog::new()
            .set_title(APP_TITLE)
            .set_description(message)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::OkCancel)
            .show()
            .await;
        matches!(result, MessageDialogResult::Ok | MessageDialogResult::Yes)
    }

    async fn copy_text(&self, text: &str) -> Result<(), PlatformError> {
        // JSON文字列としてそのままJSリテラルに埋め込める
        let literal = serde_json::to_string(text)
            .map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        let script = format!("await navigator.clipboard.writeText({});", literal);
        self.eval(&script)
            .await
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    async fn save_file(
        &self,
        suggested_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<PathBuf>, PlatformError> {
        let Some(file_handle) = AsyncFileDialog::new()
            .set_title("ロゴの保存先を選択")
            .add_filter("PNG 画像", &["png"])
            .add_filter("すべてのファイル", &["*"])
            .set_file_name(suggested_name)
            .save_file()
            .await
        else {
            tracing::debug!("📁 保存ダイアログがキャンセルされました");
            return Ok(None);
        };

        let path = file_handle.path().to_path_buf();
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!("💾 ロゴを保存: {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(path))
    }

    fn play_audio(&self, bytes: Vec<u8>) -> Result<AudioHandle, PlatformError> {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let task = tokio::task::spawn_blocking(move || Self::play_blocking(bytes, flag));

        self.playbacks.lock().insert(
            id,
            PlaybackTask {
                stop,
                task: Some(task),
            },
        );
        tracing::debug!("🔊 再生開始: #{}", id);
        Ok(AudioHandle(id))
    }

    async fn wait_audio_end(&self, handle: AudioHandle) -> Result<(), PlatformError> {
        let task = self
            .playbacks
            .lock()
            .get_mut(&handle.0)
            .and_then(|playback| playback.task.take());

        let result = match task {
            Some(task) => task.await.unwrap_or_else(|e| {
                Err(PlatformError::AudioOutput(format!("再生タスクが異常終了: {}", e)))
            }),
            None => Ok(()),
        };

        self.playbacks.lock().remove(&handle.0);
        tracing::debug!("🔈 再生終了: #{}", handle.0);
        result
    }

    fn stop_audio(&self, handle: AudioHandle) {
        let mut playbacks = self.playbacks.lock();
        let Some(playback) = playbacks.get(&handle.0) else {
            return;
        };
        playback.stop.store(true, Ordering::SeqCst);
        // 終了を待つ側がいなければここで外す。タスクはフラグを見て終わる
        if playback.task.is_some() {
            playbacks.remove(&handle.0);
        }
    }

    async fn focus(&self, element_id: &str) {
        let literal = serde_json::to_string(element_id).unwrap_or_default();
        let script = format!("document.getElementById({})?.focus();", literal);
        if let Err(e) = self.eval(&script).await {
            tracing::warn!("⚠️ フォーカスに失敗: {}", e);
        }
    }

    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
