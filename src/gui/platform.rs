//! ホスト環境（ダイアログ・クリップボード・音声・ファイル保存）の抽象化
//!
//! ダッシュボードの処理はこのトレイト越しにしか外界へ触れない。
//! デスクトップ実装は `desktop_platform`、テストでは記録用の実装を使う。

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use super::audio::AudioHandle;

/// プラットフォーム操作のエラー型
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("クリップボードへのコピーに失敗しました: {0}")]
    Clipboard(String),

    #[error("音声出力エラー: {0}")]
    AudioOutput(String),

    #[error("音声デコードエラー: {0}")]
    AudioDecode(String),

    #[error("スクリプト実行エラー: {0}")]
    Script(String),

    #[error("ファイル書き込みエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// ホスト環境
///
/// WebViewの評価結果は `Send` でないため、`?Send` で定義している。
#[async_trait(?Send)]
pub trait Platform: 'static {
    /// 通知ダイアログ（閉じられるまで待つ）
    async fn alert(&self, message: &str);

    /// 確認ダイアログ。OKならtrue
    async fn confirm(&self, message: &str) -> bool;

    /// テキストをクリップボードへ
    async fn copy_text(&self, text: &str) -> Result<(), PlatformError>;

    /// ファイル保存。ユーザーがキャンセルしたら `Ok(None)`
    async fn save_file(
        &self,
        suggested_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<PathBuf>, PlatformError>;

    /// 音声の再生を開始する
    fn play_audio(&self, bytes: Vec<u8>) -> Result<AudioHandle, PlatformError>;

    /// 再生が終わる（または止められる）まで待つ
    async fn wait_audio_end(&self, handle: AudioHandle) -> Result<(), PlatformError>;

    /// 再生を止める。終了済みなら何もしない
    fn stop_audio(&self, handle: AudioHandle);

    /// 要素にフォーカスを当てる
    async fn focus(&self, element_id: &str);

    /// 表示用の待ち時間
    async fn delay(&self, duration: Duration);
}
