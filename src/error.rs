//! クレート共通のエラー型

use thiserror::Error;

use crate::api::error::ApiError;
use crate::gui::platform::PlatformError;

/// GUI層のエラー
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("設定エラー: {0}")]
    Configuration(String),

    #[error("プラットフォームエラー: {0}")]
    Platform(#[from] PlatformError),
}

/// PsyDesign全体のエラー
#[derive(Debug, Error)]
pub enum PsyDesignError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("GUI error: {0}")]
    Gui(#[from] GuiError),

    #[error(transparent)]
    General(#[from] anyhow::Error),
}

impl From<PlatformError> for PsyDesignError {
    fn from(err: PlatformError) -> Self {
        PsyDesignError::Gui(GuiError::Platform(err))
    }
}

pub type PsyDesignResult<T> = Result<T, PsyDesignError>;
