//! インフラストラクチャ層
//!
//! 外部との通信（HTTP）と、ドメインに依存しない変換処理を提供します。

pub mod api;
pub mod parser;
