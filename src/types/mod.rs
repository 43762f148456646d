//! 型定義モジュール
//!
//! クレート全体で使用される共通的な型定義を管理します。
//! - エラー型: APIエラーと設定エラー
//! - 設定型: HTTPクライアントの接続設定

pub mod config;
pub mod error;

// 便利な再エクスポート
pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use error::{ApiError, ApiResult};
