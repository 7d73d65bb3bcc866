pub mod api;
pub mod error;
pub mod gui;

// Re-export the main error types for convenience
pub use api::ApiError;
pub use error::{GuiError, PsyDesignError, PsyDesignResult};

// Re-export the dashboard core
pub use api::{BackendConfig, BrandBackend, HttpBackend};
pub use gui::{AppDashboard, Dashboard, Intent, Language, Platform, Session, ViewMode};
