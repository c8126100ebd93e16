use chrono::NaiveDate;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC calendar date.
///
/// Every business rule in the HR domain works on calendar dates;
/// time-of-day is never significant.
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
