use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

/// Every `NewsItem` carries its publication time in this local-convention
/// format (two-digit year, minute resolution).
pub const CANONICAL_FORMAT: &str = "%d.%m.%y %H:%M";

pub fn format_canonical(dt: NaiveDateTime) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

pub fn parse_canonical(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), CANONICAL_FORMAT).ok()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// RFC-822/2822 dates as found in RSS `pubDate` elements, converted to local
/// naive time. Some feeds emit slightly mangled variants, so a comma-stripped
/// retry is attempted before giving up.
pub fn parse_rfc822(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(&raw.replace(',', "")))
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// ISO-8601 timestamps from meta tags and `<time datetime>` attributes.
/// Full RFC-3339 (including the `Z` suffix) is converted to local time; bare
/// `YYYY-MM-DDTHH:MM:SS` prefixes are taken as-is, dropping any trailing
/// offset the way the sites' own markup is usually consumed.
pub fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    let prefix = raw.get(..19)?;
    NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Unix epoch seconds (VK `date` field) to local naive time.
pub fn from_unix(ts: i64) -> Option<NaiveDateTime> {
    Local.timestamp_opt(ts, 0).single().map(|dt| dt.naive_local())
}

// Month name stems; full names decline ("января", "апреля"), so prefixes are
// matched. "март" must be checked before "ма" so "марта" doesn't hit May.
const MONTH_STEMS: [&str; 12] = [
    "январ", "феврал", "март", "апрел", "ма", "июн", "июл", "август",
    "сентябр", "октябр", "ноябр", "декабр",
];

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_STEMS
        .iter()
        .position(|stem| lower.starts_with(stem))
        .map(|i| i as u32 + 1)
}

/// Dates with spelled-out Russian month names, e.g. "6 Апреля, 14:55" or
/// "6 апреля 2025, 14:55". A missing year defaults to the year of `now`.
pub fn parse_russian(s: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let re = Regex::new(r"(?i)(\d{1,2})\s+([а-яё]+)(?:\s+(\d{4}))?[,\s]+(\d{1,2}):(\d{2})")
        .unwrap();
    let caps = re.captures(s.trim())?;

    let day: u32 = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().ok()?,
        None => now.year(),
    };
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Best-effort parser for listing-page date snippets where the exact format
/// varies between sites.
pub fn parse_flexible(s: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let raw = s.trim();
    parse_canonical(raw)
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%d.%m.%Y %H:%M").ok())
        .or_else(|| parse_iso(raw))
        .or_else(|| parse_rfc822(raw))
        .or_else(|| parse_russian(raw, now))
}
