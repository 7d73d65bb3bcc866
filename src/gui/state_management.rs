//! ダッシュボードのセッション状態
//!
//! 画面上のすべての可変状態（ビュー、履歴、チャット、再生、フォント）を
//! 1つの `Session` にまとめる。ビュー切り替え（入力/ローディング/結果）もここで行う。

use crate::api::types::{BrandAnalysis, HistoryId};

use super::audio::{AudioHandle, AudioPlayback};
use super::chat_session::ChatSession;
use super::fonts::FontRegistry;
use super::history_store::HistoryStore;
use super::i18n::{Labels, Language};
use super::models::{DisplayedReport, ViewMode, ViewState};

/// アプリケーションの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub language: Language,
    pub view: ViewState,
    /// 入力フォームの説明文
    pub description: String,
    pub report: Option<DisplayedReport>,
    pub history: HistoryStore,
    pub chat: ChatSession,
    pub audio: AudioPlayback,
    pub fonts: FontRegistry,
    /// モバイル幅のサイドバー表示
    pub sidebar_open: bool,
    /// ロゴダウンロード中（ボタン無効化）
    pub download_busy: bool,
    /// 生成リクエストの応答待ち。入力フォームに戻っても応答までは立ったまま
    pub generating: bool,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode
    }

    /// 入力フォームを表示する
    ///
    /// 説明文・アクティブ表示・チャットをクリアする。
    /// 鳴っていた音声のハンドルを返すので呼び出し側で止めること。
    #[must_use]
    pub fn show_input(&mut self) -> Option<AudioHandle> {
        tracing::debug!("📝 入力フォームを表示");
        self.view = ViewState {
            mode: ViewMode::Input,
            active_history_id: None,
        };
        self.description.clear();
        self.report = None;
        self.download_busy = false;
        self.chat.reset();
        self.audio.stop()
    }

    /// ローディング表示に切り替える（他のパネルは隠れる）
    pub fn show_loading(&mut self) {
        tracing::debug!("⏳ ローディングを表示");
        self.view.mode = ViewMode::Loading;
    }

    /// 生成を開始してローディングを表示する。応答待ちが残っていれば何もせず `false`
    pub fn begin_generation(&mut self) -> bool {
        if self.generating {
            return false;
        }
        self.generating = true;
        self.show_loading();
        true
    }

    /// 生成の応答を受け取った後の後始末
    pub fn end_generation(&mut self) {
        self.generating = false;
        self.hide_loading();
    }

    /// ローディングが残っていれば入力フォームに戻す
    pub fn hide_loading(&mut self) {
        if self.view.mode == ViewMode::Loading {
            self.view.mode = if self.report.is_some() {
                ViewMode::Results
            } else {
                ViewMode::Input
            };
        }
    }

    /// レポートを表示する
    ///
    /// 見出し・本文フォントを登録し、チャットを作り直す。
    #[must_use]
    pub fn show_results(&mut self, analysis: BrandAnalysis, logo_src: String) -> Option<AudioHandle> {
        tracing::info!(
            "📊 レポートを表示: {} ({})",
            analysis.primary_brand_name().unwrap_or("-"),
            analysis.brand_personality.archetype
        );
        self.fonts.request(analysis.heading_font());
        self.fonts.request(analysis.body_font());

        self.report = Some(DisplayedReport { analysis, logo_src });
        self.view.mode = ViewMode::Results;
        self.download_busy = false;
        self.chat.reset();
        self.audio.stop()
    }

    /// アクティブな履歴を設定する（`None` で解除）
    pub fn set_active_history_item(&mut self, id: Option<HistoryId>) {
        self.view.active_history_id = id;
    }

    /// この行にアクティブ表示を付けるか
    pub fn is_active_history_item(&self, id: HistoryId) -> bool {
        self.view.active_history_id == Some(id)
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
