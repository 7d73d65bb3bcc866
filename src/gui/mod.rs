// Core modules
pub mod audio; // 読み上げ再生の状態
pub mod chat_session;
pub mod config_manager;
pub mod dispatcher; // インテント処理
pub mod download;
pub mod fonts;
pub mod history_store;
pub mod i18n; // 翻訳テーブル
pub mod models;
pub mod platform; // ホスト環境の抽象化
pub mod state_management;
pub mod utils;
pub mod view; // 型付き描画ツリー

// Dioxus UI components
pub mod components;
pub mod desktop_platform;
pub mod styles;

pub use components::MainWindow;
pub use dispatcher::{Dashboard, Intent};
pub use i18n::Language;
pub use models::{Transition, ViewMode, ViewState};
pub use platform::{Platform, PlatformError};
pub use state_management::Session;

/// デスクトップアプリで使うダッシュボード
pub type AppDashboard =
    Dashboard<crate::api::http_client::HttpBackend, desktop_platform::DesktopPlatform>;
