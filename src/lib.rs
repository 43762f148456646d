//! `/wx/articles` APIの型付きクライアント
//!
//! - `domain::article`: 記事DTOと`ArticleApi`（一覧・詳細・前後移動・削除・クリーンアップ）
//! - `infra::api`: HTTPクライアントの抽象化と`reqwest`実装
//! - `types`: エラー型と接続設定

pub mod domain;
pub mod infra;
pub mod types;

pub use domain::article::{Article, ArticleApi, ArticleListParams, Navigation};
pub use types::{ApiError, ApiResult, ClientConfig};
