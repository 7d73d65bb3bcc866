//! 設定ファイル管理
//!
//! `config.toml`（XDG設定ディレクトリ）にバックエンド接続・表示言語・
//! ウィンドウ・ログの4セクションを保存する。欠けたセクションは既定値で補う。

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::api::http_client::BackendConfig;
use crate::gui::i18n::Language;

const CONFIG_FILE_NAME: &str = "config.toml";

/// ウィンドウの位置とサイズ（終了時に保存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 860,
            x: 100,
            y: 100,
            maximized: false,
        }
    }
}

/// ログ出力の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 出力先。未指定ならデータディレクトリ配下の `logs`
    pub log_dir: Option<PathBuf>,
    /// `RUST_LOG` が無いときのフィルタ
    pub log_level: String,
    pub enable_file_logging: bool,
    /// 日次ローテーションで残す世代数
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "info".to_string(),
            enable_file_logging: true,
            max_log_files: 14,
        }
    }
}

impl LogConfig {
    /// 実際に使うログディレクトリ
    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join("logs")))
    }
}

/// `config.toml` の内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    /// 最後に選んだ表示言語。未知のコードは英語として読む
    #[serde(default, with = "language_code")]
    pub language: Language,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// コマンドライン引数で上書き
    pub fn apply_overrides(&mut self, backend_url: Option<String>, language: Option<&str>) {
        if let Some(url) = backend_url {
            debug!("🔧 バックエンドURLを上書き: {}", url);
            self.backend.base_url = url;
        }
        if let Some(code) = language {
            self.language = Language::from_code(code);
        }
    }
}

/// 言語は表示名ではなくリクエストと同じコードで保存する
mod language_code {
    use super::Language;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(language: &Language, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(language.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Language, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Language::from_code(&code))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "psydesign", "psydesign")
}

/// 設定ファイルの読み書き
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリの `config.toml` を使う
    pub fn new() -> Result<Self> {
        let dirs = project_dirs().context("could not determine the XDG config directory")?;
        let config_path = dirs.config_dir().join(CONFIG_FILE_NAME);
        debug!("⚙️ 設定ファイル: {}", config_path.display());
        Ok(Self { config_path })
    }

    /// 任意のパスを使う（テスト・ポータブル運用向け）
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// 読み込み。ファイルが無ければ既定値
    pub fn load_config(&self) -> Result<AppConfig> {
        let raw = match fs::read_to_string(&self.config_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("⚙️ 設定ファイルが無いので既定値で起動します");
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("cannot read {}", self.config_path.display()))
            }
        };

        let config = toml::from_str(&raw)
            .with_context(|| format!("invalid TOML in {}", self.config_path.display()))?;
        info!("⚙️ 設定を読み込みました: {}", self.config_path.display());
        Ok(config)
    }

    /// 保存。一時ファイルに書いてから置き換えるので途中終了でも壊れない
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }

        let body = toml::to_string_pretty(config).context("cannot encode settings as TOML")?;
        let staging = self.config_path.with_extension("toml.tmp");
        fs::write(&staging, body)
            .with_context(|| format!("cannot write {}", staging.display()))?;
        fs::rename(&staging, &self.config_path)
            .with_context(|| format!("cannot replace {}", self.config_path.display()))?;

        info!("💾 設定を保存しました: {}", self.config_path.display());
        Ok(())
    }

    /// 読み込み → 一部変更 → 保存
    ///
    /// 読めないファイルは `config.toml.bak` に退避してから既定値で作り直す。
    /// 退避できなければ上書きせずにエラーを返す。
    pub fn update_config(&self, update: impl FnOnce(&mut AppConfig)) -> Result<AppConfig> {
        let mut config = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                let backup = self.backup_path();
                fs::rename(&self.config_path, &backup).with_context(|| {
                    format!("cannot move unreadable settings to {}", backup.display())
                })?;
                warn!(
                    "⚠️ 設定を読めないため {} に退避して既定値から保存し直します: {:#}",
                    backup.display(),
                    e
                );
                AppConfig::default()
            }
        };
        update(&mut config);
        self.save_config(&config)?;
        Ok(config)
    }

    /// 読めなかった設定ファイルの退避先
    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.bak")
    }
}

/// 表示言語をバックグラウンドで保存
pub fn save_language_async(language: Language) {
    tokio::task::spawn_blocking(move || {
        let result = ConfigManager::new()
            .and_then(|manager| manager.update_config(|config| config.language = language));
        match result {
            Ok(_) => debug!("🌐 表示言語を保存: {}", language),
            Err(e) => warn!("❌ 表示言語を保存できませんでした: {:#}", e),
        }
    });
}
