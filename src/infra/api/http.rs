use crate::types::{ApiError, ApiResult, ClientConfig};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

/// クエリパラメータ（キーと文字列化済みの値の組）
pub type Query = Vec<(&'static str, String)>;

/// HTTPクライアントの抽象化トレイト
///
/// このトレイトは、実際のHTTP通信とモック実装の両方を
/// 統一的に扱えるようにするためのインターフェースです。
/// ベースURL、認証ヘッダー、エラーの正規化は実装側の責務です。
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GETリクエストを送信し、レスポンスボディをJSONとして返す
    ///
    /// # Arguments
    /// * `path` - ベースURLからの相対パス（例: `/wx/articles`）
    /// * `query` - クエリパラメータ
    async fn get_json(&self, path: &str, query: &Query) -> ApiResult<Value>;

    /// DELETEリクエストを送信し、レスポンスボディをJSONとして返す
    async fn delete_json(&self, path: &str) -> ApiResult<Value>;
}

/// `reqwest` を使用した本番用のHTTPクライアント実装
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ReqwestHttpClient {
    /// 接続設定から新しいHTTPクライアントを作成
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// 環境変数の設定から新しいHTTPクライアントを作成
    pub fn from_env() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, query: &Query) -> ApiResult<Value> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "リクエスト送信");

        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request(method.as_str(), &url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request(method.as_str(), &url, e))?;

        // サーバーは一部の失敗を2xx + {"detail": {...}} で返す
        if !status.is_success() || is_error_body(&body) {
            tracing::warn!(method = %method, url = %url, status = status.as_u16(), "エラーレスポンス");
            return Err(normalize_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("{} {}", method, url), e))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_json(&self, path: &str, query: &Query) -> ApiResult<Value> {
        self.send(Method::GET, path, query).await
    }

    async fn delete_json(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::DELETE, path, &Vec::new()).await
    }
}

/// ベースURLとパスを`/`が重複しないように連結する
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// サーバーのエラーボディ: {"detail": {"code": 40401, "message": "..."}}
#[derive(Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: Option<i64>,
    message: Option<String>,
}

/// トップレベルに`detail`オブジェクトを持つサーバー形式のエラーボディかどうか
pub fn is_error_body(body: &str) -> bool {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => matches!(map.get("detail"), Some(Value::Object(_))),
        _ => false,
    }
}

/// エラーレスポンスを`ApiError::Status`に正規化する
///
/// サーバー形式のエラーボディでなければ、ボディ全文をメッセージとする。
pub fn normalize_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail }) => ApiError::status(
            status,
            detail.code,
            detail.message.unwrap_or_else(|| body.to_string()),
        ),
        Err(_) => ApiError::status(status, None, body.trim()),
    }
}

/// 記録されたリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// 指定キーのクエリ値を取得
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// テスト用のモックHTTPクライアント
///
/// この実装はテスト時にDIされ、実際のHTTPリクエストを行わずに
/// 定義済みのレスポンスやエラーを返します。送信されたリクエストは記録されます。
pub struct MockHttpClient {
    /// モック時に返すレスポンス内容
    pub mock_response: Value,
    /// モック時に返すステータス（成功/失敗の制御）
    pub should_succeed: bool,
    /// エラー時に返すメッセージ
    pub error_message: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    /// 成功レスポンスを返すモッククライアントを作成
    pub fn new_success(mock_response: Value) -> Self {
        Self {
            mock_response,
            should_succeed: true,
            error_message: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// エラーレスポンスを返すモッククライアントを作成
    pub fn new_error(error_message: &str) -> Self {
        Self {
            mock_response: Value::Null,
            should_succeed: false,
            error_message: Some(error_message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// これまでに記録されたリクエストの一覧
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// 最後に記録されたリクエスト
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    fn respond(&self, method: Method, path: &str, query: &Query) -> ApiResult<Value> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(RecordedRequest {
                method,
                path: path.to_string(),
                query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            });
        }

        if self.should_succeed {
            Ok(self.mock_response.clone())
        } else {
            let error_msg = self.error_message.as_deref().unwrap_or("Mock HTTP error");
            Err(ApiError::mock(error_msg))
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_json(&self, path: &str, query: &Query) -> ApiResult<Value> {
        self.respond(Method::GET, path, query)
    }

    async fn delete_json(&self, path: &str) -> ApiResult<Value> {
        self.respond(Method::DELETE, path, &Vec::new())
    }
}
