use super::model::{
    ArticleDetailResult, ArticleListParams, ArticleListResult, MessageResult, Navigation,
};
use crate::infra::api::{HttpClient, ReqwestHttpClient};
use crate::types::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 記事コレクションのエンドポイント
pub const ARTICLES_PATH: &str = "/wx/articles";
/// 全記事クリーンアップのエンドポイント
pub const CLEAN_PATH: &str = "/wx/articles/clean";
/// 重複記事クリーンアップのエンドポイント
pub const CLEAN_DUPLICATES_PATH: &str = "/wx/articles/clean_duplicate_articles";

/// 記事1件のエンドポイント
pub fn article_path(id: i64) -> String {
    format!("{}/{}", ARTICLES_PATH, id)
}

/// 移動方向に応じた記事詳細のエンドポイント
pub fn detail_path(id: i64, navigation: Navigation) -> String {
    match navigation {
        Navigation::Prev => format!("{}/prev", article_path(id)),
        Navigation::Next => format!("{}/next", article_path(id)),
        Navigation::Current => article_path(id),
    }
}

/// 記事APIクライアント
///
/// HTTPクライアントを注入して使用する。テスト時には
/// `MockHttpClient`を注入することで実際の通信を避けることができます。
/// 通信エラーは加工せずにそのまま呼び出し側へ返す。
pub struct ArticleApi<C: HttpClient = ReqwestHttpClient> {
    client: C,
}

impl ArticleApi<ReqwestHttpClient> {
    /// 環境変数の設定から本番用クライアントを作成
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(ReqwestHttpClient::from_env()?))
    }
}

impl<C: HttpClient> ArticleApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 記事一覧を取得
    pub async fn list(&self, params: &ArticleListParams) -> ApiResult<ArticleListResult> {
        let body = self.client.get_json(ARTICLES_PATH, &params.to_query()).await?;
        decode(ARTICLES_PATH, body)
    }

    /// 記事詳細を取得（前後の記事への移動を含む）
    pub async fn get_detail(
        &self,
        id: i64,
        navigation: Navigation,
    ) -> ApiResult<ArticleDetailResult> {
        let path = detail_path(id, navigation);
        let body = self.client.get_json(&path, &Vec::new()).await?;
        decode(&path, body)
    }

    /// 前の記事を取得
    pub async fn get_prev(&self, id: i64) -> ApiResult<ArticleDetailResult> {
        self.get_detail(id, Navigation::Prev).await
    }

    /// 次の記事を取得
    pub async fn get_next(&self, id: i64) -> ApiResult<ArticleDetailResult> {
        self.get_detail(id, Navigation::Next).await
    }

    /// 記事を削除
    pub async fn delete(&self, id: i64) -> ApiResult<MessageResult> {
        let path = article_path(id);
        let body = self.client.delete_json(&path).await?;
        decode(&path, body)
    }

    /// 全記事をクリーンアップ
    pub async fn clear_all(&self) -> ApiResult<MessageResult> {
        let body = self.client.delete_json(CLEAN_PATH).await?;
        decode(CLEAN_PATH, body)
    }

    /// 重複記事をクリーンアップ
    pub async fn clear_duplicates(&self) -> ApiResult<MessageResult> {
        let body = self.client.delete_json(CLEAN_DUPLICATES_PATH).await?;
        decode(CLEAN_DUPLICATES_PATH, body)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::decode(path, e))
}
