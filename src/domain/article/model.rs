use crate::infra::parser::parse_date;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 1ページあたりのデフォルト件数
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// デフォルトのページ番号（0始まり）
pub const DEFAULT_PAGE: u32 = 0;

// 記事エンティティ（サーバーのスキーマをそのまま写したDTO）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// 数値、または数値の文字列として受け付ける
    #[serde(deserialize_with = "int_or_numeric_text")]
    pub id: i64,
    #[serde(default, deserialize_with = "text_or_number")]
    pub title: String,
    /// 一覧APIでは`has_content`を指定しない限り空
    #[serde(default, deserialize_with = "text_or_number")]
    pub content: String,
    /// 公众号名称
    #[serde(default, deserialize_with = "text_or_number")]
    pub mp_name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub publish_time: String,
    #[serde(
        default,
        deserialize_with = "opt_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub publish_at: Option<String>,
    #[serde(default)]
    pub status: i32,
    #[serde(default, deserialize_with = "text_or_number")]
    pub link: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub created_at: String,
}

impl Article {
    /// 記事の公開日時を取得
    /// `publish_at`を優先し、解析できなければ`publish_time`にフォールバックする
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.publish_at
            .as_deref()
            .and_then(|s| parse_date(s).ok())
            .or_else(|| parse_date(&self.publish_time).ok())
    }
}

fn int_or_numeric_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("整数のIDが必要です: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("数値に変換できないIDです: {}", s))),
        other => Err(de::Error::custom(format!("IDが不正です: {}", other))),
    }
}

// null・文字列・数値のいずれも文字列として受け取る
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text_or_number(deserializer)?.unwrap_or_default())
}

fn opt_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "文字列または数値が必要です: {}",
            other
        ))),
    }
}

/// 記事一覧の検索条件
///
/// 送信前に`offset = page * page_size`、`limit = page_size`へ変換される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListParams {
    /// 0始まりのページ番号
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub status: Option<i32>,
    /// 公众号ID
    pub mp_id: Option<String>,
    /// 記事本文を含めるかどうか
    pub has_content: Option<bool>,
}

impl ArticleListParams {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.unwrap_or(DEFAULT_PAGE)) * u64::from(self.limit())
    }

    /// 1ページあたりの件数（未指定または0ならデフォルト値）
    pub fn limit(&self) -> u32 {
        self.page_size
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// 送信用のクエリパラメータに変換する
    /// 未指定の絞り込み条件は送信しない
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("offset", self.offset().to_string()),
            ("limit", self.limit().to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(mp_id) = &self.mp_id {
            query.push(("mp_id", mp_id.clone()));
        }
        if let Some(has_content) = self.has_content {
            query.push(("has_content", has_content.to_string()));
        }
        query
    }
}

/// 詳細取得時の移動方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Navigation {
    /// 上一篇 (-1)
    Prev,
    /// 当前 (0)
    #[default]
    Current,
    /// 下一篇 (1)
    Next,
}

impl Navigation {
    /// 数値の指示子から変換する（-1と1以外はすべて`Current`）
    pub fn from_directive(directive: i32) -> Self {
        match directive {
            -1 => Self::Prev,
            1 => Self::Next,
            _ => Self::Current,
        }
    }

    pub fn directive(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Current => 0,
            Self::Next => 1,
        }
    }
}

impl From<i32> for Navigation {
    fn from(directive: i32) -> Self {
        Self::from_directive(directive)
    }
}

/// 記事一覧のレスポンス
///
/// `data`は記事の配列、または`{"list": [...], "total": n}`のどちらでも受け付ける。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawArticleListResult")]
pub struct ArticleListResult {
    pub code: i64,
    pub data: Vec<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

#[derive(Deserialize)]
struct RawArticleListResult {
    code: i64,
    #[serde(default)]
    data: Option<ArticlePage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticlePage {
    Plain(Vec<Article>),
    Paged {
        #[serde(default)]
        list: Vec<Article>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl From<RawArticleListResult> for ArticleListResult {
    fn from(raw: RawArticleListResult) -> Self {
        let (data, total) = match raw.data {
            Some(ArticlePage::Paged { list, total }) => (list, total),
            Some(ArticlePage::Plain(list)) => (list, None),
            None => (Vec::new(), None),
        };
        Self {
            code: raw.code,
            data,
            total,
        }
    }
}

/// 記事詳細のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetailResult {
    pub code: i64,
    pub data: Article,
}

/// 削除・クリーンアップ系のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResult {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// クリーンアップ結果の詳細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_count: u64,
}

impl MessageResult {
    /// クリーンアップAPIが返した詳細（`data`が該当形式でなければNone）
    pub fn clean_summary(&self) -> Option<CleanSummary> {
        match &self.data {
            Some(data @ Value::Object(_)) => serde_json::from_value(data.clone()).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_article_json(id: i64) -> Value {
        json!({
            "id": id,
            "title": "测试文章",
            "content": "<p>正文</p>",
            "mp_name": "测试公众号",
            "publish_time": "2024-05-01 08:00:00",
            "status": 1,
            "link": "https://mp.weixin.qq.com/s/abc",
            "created_at": "2024-05-01T09:00:00"
        })
    }

    mod pagination {
        use super::*;

        #[test]
        fn test_defaults_without_params() {
            let params = ArticleListParams::default();
            assert_eq!(params.offset(), 0);
            assert_eq!(params.limit(), 10);
            assert_eq!(
                params.to_query(),
                vec![("offset", "0".to_string()), ("limit", "10".to_string())]
            );
        }

        #[test]
        fn test_offset_is_page_times_page_size() {
            for page in [0u32, 1, 2, 7, 100] {
                for page_size in [1u32, 5, 10, 20, 100] {
                    let params = ArticleListParams {
                        page: Some(page),
                        page_size: Some(page_size),
                        ..Default::default()
                    };
                    assert_eq!(params.offset(), u64::from(page) * u64::from(page_size));
                    assert_eq!(params.limit(), page_size);
                }
            }
        }

        #[test]
        fn test_page_only_uses_default_page_size() {
            let params = ArticleListParams {
                page: Some(3),
                ..Default::default()
            };
            assert_eq!(params.offset(), 30);
            assert_eq!(params.limit(), 10);
        }

        #[test]
        fn test_zero_page_size_falls_back_to_default() {
            // サーバーはlimit < 1を受け付けない
            let params = ArticleListParams {
                page: Some(2),
                page_size: Some(0),
                ..Default::default()
            };
            assert_eq!(params.limit(), 10);
            assert_eq!(params.offset(), 20);
            assert_eq!(
                params.to_query(),
                vec![("offset", "20".to_string()), ("limit", "10".to_string())]
            );
        }

        #[test]
        fn test_large_values_do_not_overflow() {
            let params = ArticleListParams {
                page: Some(u32::MAX),
                page_size: Some(u32::MAX),
                ..Default::default()
            };
            assert_eq!(params.offset(), u64::from(u32::MAX) * u64::from(u32::MAX));
        }

        #[test]
        fn test_filters_are_sent_only_when_present() {
            let params = ArticleListParams {
                page: Some(1),
                page_size: Some(20),
                search: Some("rust".to_string()),
                status: Some(1),
                mp_id: Some("MP_WXS_123".to_string()),
                has_content: Some(true),
            };
            assert_eq!(
                params.to_query(),
                vec![
                    ("offset", "20".to_string()),
                    ("limit", "20".to_string()),
                    ("search", "rust".to_string()),
                    ("status", "1".to_string()),
                    ("mp_id", "MP_WXS_123".to_string()),
                    ("has_content", "true".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_navigation_from_directive() {
        assert_eq!(Navigation::from_directive(-1), Navigation::Prev);
        assert_eq!(Navigation::from_directive(1), Navigation::Next);
        for other in [0, 2, -2, i32::MIN, i32::MAX] {
            assert_eq!(Navigation::from(other), Navigation::Current);
        }
        assert_eq!(Navigation::default(), Navigation::Current);
        assert_eq!(Navigation::Prev.directive(), -1);
        assert_eq!(Navigation::Next.directive(), 1);
    }

    mod decode {
        use super::*;

        #[test]
        fn test_list_with_plain_array() {
            let result: ArticleListResult = serde_json::from_value(json!({
                "code": 0,
                "data": [sample_article_json(1), sample_article_json(2)]
            }))
            .unwrap();
            assert_eq!(result.code, 0);
            assert_eq!(result.data.len(), 2);
            assert_eq!(result.data[1].id, 2);
            assert_eq!(result.total, None);
        }

        #[test]
        fn test_list_with_paged_object() {
            let result: ArticleListResult = serde_json::from_value(json!({
                "code": 0,
                "message": "success",
                "data": {"list": [sample_article_json(7)], "total": 42}
            }))
            .unwrap();
            assert_eq!(result.data.len(), 1);
            assert_eq!(result.data[0].mp_name, "测试公众号");
            assert_eq!(result.total, Some(42));
        }

        #[test]
        fn test_list_with_null_data() {
            let result: ArticleListResult =
                serde_json::from_value(json!({"code": 0, "data": null})).unwrap();
            assert!(result.data.is_empty());
        }

        #[test]
        fn test_article_lenient_fields() {
            // 一覧APIはcontentを返さず、publish_timeが数値のことがある
            let article: Article = serde_json::from_value(json!({
                "id": 3,
                "title": "无正文",
                "publish_time": 1714550400,
                "publish_at": null,
                "status": 1,
                "link": null
            }))
            .unwrap();
            assert_eq!(article.content, "");
            assert_eq!(article.mp_name, "");
            assert_eq!(article.link, "");
            assert_eq!(article.publish_time, "1714550400");
            assert_eq!(article.publish_at, None);
            assert_eq!(
                article.published_at(),
                Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
            );
        }

        #[test]
        fn test_article_rejects_non_scalar_text() {
            let result = serde_json::from_value::<Article>(json!({
                "id": 1,
                "title": ["not", "text"]
            }));
            assert!(result.is_err());
        }

        #[test]
        fn test_article_id_accepts_numeric_text() {
            let mut json = sample_article_json(0);
            json["id"] = json!("128");
            let article: Article = serde_json::from_value(json).unwrap();
            assert_eq!(article.id, 128);

            let result: ArticleListResult = serde_json::from_value(json!({
                "code": 0,
                "data": [{"id": "9", "title": "a"}, {"id": 10, "title": "b"}]
            }))
            .unwrap();
            assert_eq!(
                result.data.iter().map(|a| a.id).collect::<Vec<_>>(),
                vec![9, 10]
            );
        }

        #[test]
        fn test_article_id_rejects_non_numeric() {
            for bad in [json!("abc"), json!(1.5), json!(null), json!(true)] {
                let result = serde_json::from_value::<Article>(json!({"id": bad, "title": "x"}));
                assert!(result.is_err(), "id={} はエラーになるべき", bad);
            }
        }

        #[test]
        fn test_envelopes_require_code() {
            // codeが欠けたボディを成功として扱わない
            let detail = json!({"detail": {"code": 50001, "message": "清理无效文章失败"}});
            assert!(serde_json::from_value::<MessageResult>(detail.clone()).is_err());
            assert!(serde_json::from_value::<ArticleListResult>(detail).is_err());
            assert!(serde_json::from_value::<ArticleDetailResult>(json!({
                "data": sample_article_json(1)
            }))
            .is_err());
        }

        #[test]
        fn test_detail_result() {
            let result: ArticleDetailResult =
                serde_json::from_value(json!({"code": 0, "data": sample_article_json(5)}))
                    .unwrap();
            assert_eq!(result.data.id, 5);
            assert_eq!(result.data.title, "测试文章");
        }

        #[test]
        fn test_message_result_with_clean_summary() {
            let result: MessageResult = serde_json::from_value(json!({
                "code": 0,
                "message": "success",
                "data": {"message": "清理无效文章成功", "deleted_count": 12}
            }))
            .unwrap();
            let summary = result.clean_summary().unwrap();
            assert_eq!(summary.deleted_count, 12);
            assert_eq!(summary.message.as_deref(), Some("清理无效文章成功"));
        }

        #[test]
        fn test_message_result_without_data() {
            let result: MessageResult = serde_json::from_value(json!({
                "code": 0,
                "message": "文章已标记为删除",
                "data": null
            }))
            .unwrap();
            assert_eq!(result.message, "文章已标记为删除");
            assert_eq!(result.clean_summary(), None);
        }
    }

    #[test]
    fn test_published_at_prefers_publish_at() {
        let mut article: Article = serde_json::from_value(sample_article_json(1)).unwrap();
        assert_eq!(
            article.published_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
        );

        article.publish_at = Some("2024-06-01T00:00:00Z".to_string());
        assert_eq!(
            article.published_at(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );

        // publish_atが解析できなければpublish_timeにフォールバック
        article.publish_at = Some("不明".to_string());
        assert_eq!(
            article.published_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
        );

        article.publish_time = String::new();
        assert_eq!(article.published_at(), None);
    }
}
