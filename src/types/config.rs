use thiserror::Error;

/// 接続先APIのベースURLを指定する環境変数
pub const ENV_BASE_URL: &str = "WX_API_BASE_URL";
/// 認証トークン（Bearer）を指定する環境変数
pub const ENV_TOKEN: &str = "WX_API_TOKEN";
/// リクエストタイムアウト秒数を指定する環境変数
pub const ENV_TIMEOUT_SECS: &str = "WX_API_TIMEOUT_SECS";

/// タイムアウトのデフォルト値（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 設定関連のエラー型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// HTTPクライアントの接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 例: `http://localhost:8001/api/v1`
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// トークンなし・デフォルトタイムアウトで設定を作成
    pub fn new<U: Into<String>>(base_url: U) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// 認証トークンを設定
    pub fn with_token<T: Into<String>>(mut self, token: T) -> Self {
        self.token = Some(token.into());
        self
    }

    /// タイムアウト秒数を設定
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// プロセスの環境変数から設定を読み込む
    /// .envファイルの読み込みは呼び出し側（main）で行う
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_BASE_URL).ok_or_else(|| ConfigError::missing_env_var(ENV_BASE_URL))?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::invalid_value(format!(
                "{}はhttp://またはhttps://で始まる必要があります: {}",
                ENV_BASE_URL, base_url
            )));
        }

        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::invalid_value(format!(
                        "{}は正の整数である必要があります: {}",
                        ENV_TIMEOUT_SECS, raw
                    )))
                }
            },
        };

        Ok(Self {
            base_url,
            token: get(ENV_TOKEN),
            timeout_secs,
        })
    }
}
