pub mod model;
pub mod service;

// 公開APIの再エクスポート

// model.rsから
pub use model::{
    Article, ArticleDetailResult, ArticleListParams, ArticleListResult, CleanSummary,
    MessageResult, Navigation, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

// service.rsから
pub use service::{
    article_path, detail_path, ArticleApi, ARTICLES_PATH, CLEAN_DUPLICATES_PATH, CLEAN_PATH,
};
