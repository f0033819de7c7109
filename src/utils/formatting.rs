//! Display formatting utilities
//!
//! Functions for presenting amounts, timestamps and accounts the way the
//! banking UI shows them: Indian rupees with lakh/crore digit grouping and
//! `en-IN` style date-times. Formatting never fails; unusable input renders
//! as `"N/A"`.

use crate::api::Account;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Placeholder shown for missing or unparseable dates
pub const NOT_AVAILABLE: &str = "N/A";

const TIME_FORMAT: &str = "%Y, %I:%M:%S %P";

/// Formats an amount as Indian rupees
///
/// Uses `en-IN` grouping (the last three digits, then groups of two) and
/// always shows two fraction digits.
///
/// # Examples
/// - `1234567.5` → `₹12,34,567.50`
/// - `-50.0` → `-₹50.00`
/// - `0.125` → `₹0.13`
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "₹NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "₹∞" } else { "-₹∞" }.to_string();
    }

    let (negative, int_part, frac_part) = to_fixed_2(amount);
    let sign = if negative { "-" } else { "" };

    format!("{}₹{}.{}", sign, group_indian(&int_part), frac_part)
}

/// Splits a finite amount into sign, whole rupees and paise
///
/// Rounds half away from zero at the paisa, so `0.125` gives `0.13`.
/// The sign follows the input even when the rounded value is zero.
fn to_fixed_2(amount: f64) -> (bool, String, String) {
    let paise = (amount.abs() * 100.0).round();
    let digits = format!("{:03.0}", paise);
    let (int_part, frac_part) = digits.split_at(digits.len() - 2);
    (
        amount.is_sign_negative(),
        int_part.to_string(),
        frac_part.to_string(),
    )
}

/// Inserts `en-IN` thousands separators into a string of digits
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats a backend timestamp as `05 Jan 2024, 02:30:00 pm`
///
/// Accepts the shapes the backend produces:
/// - an array `[year, month, day, hour?, minute?, second?]`
/// - an object with `year`, `monthValue`/`month`, `dayOfMonth`/`day`,
///   `hour`, `minute`, `second`
/// - an ISO-8601 string, with or without offset and time
/// - epoch milliseconds
///
/// Anything else, including out-of-range components, yields `"N/A"`.
pub fn format_date(value: &Value) -> String {
    parse_date_value(value)
        .map(|dt| format_date_time(&dt))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `en-IN` abbreviates September as "Sept"; every other month is three letters
fn format_date_time(dt: &NaiveDateTime) -> String {
    let month = if dt.month() == 9 {
        "Sept".to_string()
    } else {
        dt.format("%b").to_string()
    };
    format!("{} {} {}", dt.format("%d"), month, dt.format(TIME_FORMAT))
}

/// Converts a backend timestamp to a local naive date-time
pub fn parse_date_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Null | Value::Bool(_) => None,
        Value::Array(parts) => from_array(parts),
        Value::Object(_) => from_object(value),
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            if millis == 0 {
                return None;
            }
            DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.with_timezone(&Local).naive_local())
        }
    }
}

fn from_array(parts: &[Value]) -> Option<NaiveDateTime> {
    let component = |i: usize, default: i64| -> Option<i64> {
        match parts.get(i) {
            Some(v) => v.as_i64(),
            None => Some(default),
        }
    };

    if parts.len() < 3 {
        return None;
    }
    build(
        component(0, 0)?,
        component(1, 1)?,
        component(2, 1)?,
        component(3, 0)?,
        component(4, 0)?,
        component(5, 0)?,
    )
}

fn from_object(value: &Value) -> Option<NaiveDateTime> {
    // Zero counts as missing, matching the JSON producer's convention.
    let field = |keys: &[&str], default: i64| -> i64 {
        keys.iter()
            .filter_map(|k| value.get(*k).and_then(Value::as_i64))
            .find(|n| *n != 0)
            .unwrap_or(default)
    };

    let year = value.get("year").and_then(Value::as_i64).filter(|y| *y != 0)?;
    build(
        year,
        field(&["monthValue", "month"], 1),
        field(&["dayOfMonth", "day"], 1),
        field(&["hour"], 0),
        field(&["minute"], 0),
        field(&["second"], 0),
    )
}

fn build(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    date.and_hms_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
    )
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    const LAYOUTS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    if let Some(dt) = LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    {
        return Some(dt);
    }

    // A bare date means midnight UTC, shown in local time.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().with_timezone(&Local).naive_local())
}

/// Label shown next to an account number in suggestion lists
///
/// `"Asha Rao - SAVINGS - ₹2500.50"`
pub fn account_option_label(account: &Account) -> String {
    let (negative, int_part, frac_part) = to_fixed_2(account.balance);
    format!(
        "{} - {} - ₹{}{}.{}",
        account.customer_name,
        account.account_type,
        if negative { "-" } else { "" },
        int_part,
        frac_part
    )
}
