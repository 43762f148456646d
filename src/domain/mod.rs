//! ドメイン層
//!
//! 記事リソースのDTOと、記事APIの各操作を提供します。

pub mod article;
