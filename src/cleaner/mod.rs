use crate::error::{ReportError, ReportResult};
use crate::models::{PageMetricRecord, PostRecord, RawPageRow, RawPostRow};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use tracing::debug;

pub const PAGE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const POST_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
const POST_DATE_FORMAT_24H: &str = "%m/%d/%Y %H:%M:%S";

// ── Coercion ──────────────────────────────────────────────────────────────────

/// Parse `raw` as `T`, falling back to `default` on any failure.
/// "12" → 12 | " 7 " → 7 | "" → default | "n/a" → default
pub fn parse_or<T: FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

/// Parse `raw` as `T` or report which cell was bad.
pub fn parse_strict<T: FromStr>(
    raw: &str,
    kind: &'static str,
    row: usize,
    field: &'static str,
) -> ReportResult<T> {
    raw.trim().parse().map_err(|_| ReportError::InvalidNumber {
        kind,
        row,
        field,
        value: raw.to_string(),
    })
}

// ── Dates ─────────────────────────────────────────────────────────────────────

/// Page export dates: "2015-06-01"
pub fn parse_page_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, PAGE_DATE_FORMAT).ok()
}

/// Post export timestamps: "06/01/2015 10:15:00 PM".
/// Exports that write a 24-hour clock next to the marker ("06/01/2015 22:15:00 PM")
/// are read as 24-hour time with the marker ignored.
/// This deliberately differs from the legacy `%H … %p` reading, which dropped
/// the marker for every hour ("01:00:00 PM" was 01:00).
pub fn parse_post_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(s, POST_DATE_FORMAT) {
        return Some(ts);
    }

    let bare = s
        .strip_suffix("AM")
        .or_else(|| s.strip_suffix("PM"))
        .or_else(|| s.strip_suffix("am"))
        .or_else(|| s.strip_suffix("pm"))
        .unwrap_or(s)
        .trim_end();

    NaiveDateTime::parse_from_str(bare, POST_DATE_FORMAT_24H).ok()
}

// ── Page CSV → PageMetricRecord ───────────────────────────────────────────────

fn required<'a>(
    cell: &'a Option<String>,
    kind: &'static str,
    row: usize,
    column: usize,
    field: &'static str,
) -> ReportResult<&'a str> {
    cell.as_deref().ok_or(ReportError::MissingColumn {
        kind,
        row,
        column,
        field,
    })
}

/// Build a page record. Numeric cells are tolerant (0 on failure); the date is not.
pub fn page_row_to_record(row: usize, raw: &RawPageRow) -> ReportResult<PageMetricRecord> {
    use crate::loader::PAGE_COLUMNS as C;
    const KIND: &str = "page";

    let date_str = required(&raw.date, KIND, row, C.date, "date")?;
    let date = parse_page_date(date_str).ok_or_else(|| ReportError::InvalidDate {
        kind: KIND,
        row,
        field: "date",
        value: date_str.to_string(),
        format: PAGE_DATE_FORMAT,
    })?;

    let record = PageMetricRecord {
        date,
        likes: parse_or(required(&raw.likes, KIND, row, C.likes, "likes")?, 0),
        engaged_users: parse_or(
            required(&raw.engaged_users, KIND, row, C.engaged_users, "engaged_users")?,
            0,
        ),
        reach: parse_or(required(&raw.reach, KIND, row, C.reach, "reach")?, 0),
        impressions: parse_or(
            required(&raw.impressions, KIND, row, C.impressions, "impressions")?,
            0,
        ),
    };

    debug!("Page row {}: {:?}", row, record);
    Ok(record)
}

// ── Post CSV → PostRecord ─────────────────────────────────────────────────────

/// Build a post record. Every field is strict.
pub fn post_row_to_record(row: usize, raw: &RawPostRow) -> ReportResult<PostRecord> {
    use crate::loader::POST_COLUMNS as C;
    const KIND: &str = "post";

    let pubdate_str = required(&raw.pubdate, KIND, row, C.pubdate, "pubdate")?;
    let pubdate = parse_post_timestamp(pubdate_str).ok_or_else(|| ReportError::InvalidDate {
        kind: KIND,
        row,
        field: "pubdate",
        value: pubdate_str.to_string(),
        format: POST_DATE_FORMAT,
    })?;

    let record = PostRecord {
        permalink: required(&raw.permalink, KIND, row, C.permalink, "permalink")?.to_string(),
        pubdate,
        message: required(&raw.message, KIND, row, C.message, "message")?.to_string(),
        totalreach: parse_strict(
            required(&raw.totalreach, KIND, row, C.totalreach, "totalreach")?,
            KIND,
            row,
            "totalreach",
        )?,
        impressions: parse_strict(
            required(&raw.impressions, KIND, row, C.impressions, "impressions")?,
            KIND,
            row,
            "impressions",
        )?,
    };

    debug!("Post row {}: {} reach={}", row, record.permalink, record.totalreach);
    Ok(record)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
