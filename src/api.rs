pub mod backend; // バックエンドトレイト
pub mod error;
pub mod http_client; // reqwest実装
pub mod types; // エンドポイントのJSON型

pub use backend::BrandBackend;
pub use error::ApiError;
pub use http_client::{BackendConfig, HttpBackend};
