use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

/// 文字列を日付型に変換するヘルパー関数
///
/// `dateparser`クレートを利用して、記事APIが返す様々な形式の日時文字列を解析し、
/// `DateTime<Utc>`型に変換する。タイムゾーンを持たない文字列はUTCとして扱う。
///
/// # サポート形式の例
/// - "2025-01-15"
/// - "2025-01-15 10:00:00"
/// - "2025-01-15T10:00:00+08:00"
/// - "1736935200"（UNIX秒）
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("日付文字列が空です"));
    }
    // `dateparser`はタイムゾーンを持つ`DateTime`を返すため、UTCに変換する
    match dateparser::parse_with_timezone(trimmed, &Utc) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => Err(anyhow!("不正な日付形式: {}", date_str)),
    }
}
