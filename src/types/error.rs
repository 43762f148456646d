use crate::types::ConfigError;
use thiserror::Error;

/// 記事APIクライアントのエラー型
/// 通信、HTTPステータス、レスポンスのデコードに関するエラーを定義
#[derive(Error, Debug)]
pub enum ApiError {
    /// リクエストの送信・受信に失敗
    #[error("HTTPリクエストエラー: {method} {url} - {source}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx以外のレスポンス
    #[error("サーバーエラー: HTTP {status} (code={code:?}) {message}")]
    Status {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// レスポンスJSONのデコードに失敗
    #[error("レスポンスのデコードエラー: {context} - {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTPクライアントの構築に失敗
    #[error("HTTPクライアントの初期化に失敗: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// モッククライアントが返すエラー
    #[error("モックHTTPエラー: {message}")]
    Mock { message: String },
}

impl ApiError {
    /// リクエストエラーを作成
    pub fn request<M: Into<String>, U: Into<String>>(
        method: M,
        url: U,
        source: reqwest::Error,
    ) -> Self {
        Self::Request {
            method: method.into(),
            url: url.into(),
            source,
        }
    }

    /// HTTPステータスエラーを作成
    pub fn status<M: Into<String>>(status: u16, code: Option<i64>, message: M) -> Self {
        Self::Status {
            status,
            code,
            message: message.into(),
        }
    }

    /// デコードエラーを作成
    pub fn decode<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// モックエラーを作成
    pub fn mock<M: Into<String>>(message: M) -> Self {
        Self::Mock {
            message: message.into(),
        }
    }

    /// サーバーが返したHTTPステータスコード（ステータスエラーの場合のみ）
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// APIエラーのResult型エイリアス
pub type ApiResult<T> = std::result::Result<T, ApiError>;
