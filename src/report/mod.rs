//! Aggregation from parsed records to the data each report template consumes.

use crate::error::{ReportError, ReportResult};
use crate::models::{DateRange, PageMetricRecord, PostRecord, Series};
use serde::Serialize;

pub const CHART_LABEL_FORMAT: &str = "%m/%d/%Y";
const PAGE_DATE_DISPLAY: &str = "%Y-%m-%d";
const POST_DATE_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Earliest and latest key across `items`. Fails on an empty slice.
pub fn date_range<T, K, F>(items: &[T], kind: &'static str, key: F) -> ReportResult<DateRange<K>>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    let start = items.iter().map(&key).min();
    let end = items.iter().map(&key).max();

    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange { start, end }),
        _ => Err(ReportError::EmptyData { kind }),
    }
}

/// Sort by total reach, highest first, and keep the first `n`.
/// `sort_by` is stable, so equal-reach posts keep their file order.
pub fn top_posts(posts: &[PostRecord], n: usize) -> Vec<PostRecord> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| b.totalreach.cmp(&a.totalreach));
    ranked.truncate(n);
    ranked
}

// ── Page report ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PageReportContext {
    pub start_date: String,
    pub end_date: String,
    pub chart_labels: Vec<String>,
    pub reach: Series,
    pub impressions: Series,
    pub engaged: Series,
    pub likes: Series,
}

fn series<F>(records: &[PageMetricRecord], label: &'static str, f: F) -> Series
where
    F: Fn(&PageMetricRecord) -> u64,
{
    Series::new(label, records.iter().map(f).collect())
}

pub fn build_page_context(records: &[PageMetricRecord]) -> ReportResult<PageReportContext> {
    let range = date_range(records, "page", |r| r.date)?;

    Ok(PageReportContext {
        start_date: range.start.format(PAGE_DATE_DISPLAY).to_string(),
        end_date: range.end.format(PAGE_DATE_DISPLAY).to_string(),
        chart_labels: records
            .iter()
            .map(|r| r.date.format(CHART_LABEL_FORMAT).to_string())
            .collect(),
        reach: series(records, "Reach", |r| r.reach),
        impressions: series(records, "Impressions", |r| r.impressions),
        engaged: series(records, "Engaged Users", |r| r.engaged_users),
        likes: series(records, "Page Likes", |r| r.likes),
    })
}

// ── Post report ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TopPost {
    pub rank: usize,
    pub permalink: String,
    pub message: String,
    pub pubdate: String,
    pub totalreach: i64,
    pub impressions: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostReportContext {
    pub start_date: String,
    pub end_date: String,
    pub top_posts: Vec<TopPost>,
}

pub fn build_post_context(posts: &[PostRecord], n: usize) -> ReportResult<PostReportContext> {
    let range = date_range(posts, "post", |p| p.pubdate)?;

    let top_posts = top_posts(posts, n)
        .into_iter()
        .enumerate()
        .map(|(i, p)| TopPost {
            rank: i + 1,
            pubdate: p.pubdate.format(POST_DATE_DISPLAY).to_string(),
            permalink: p.permalink,
            message: p.message,
            totalreach: p.totalreach,
            impressions: p.impressions,
        })
        .collect();

    Ok(PostReportContext {
        start_date: range.start.format(POST_DATE_DISPLAY).to_string(),
        end_date: range.end.format(POST_DATE_DISPLAY).to_string(),
        top_posts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32, likes: u64) -> PageMetricRecord {
        PageMetricRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            likes,
            engaged_users: likes / 10,
            reach: likes * 3,
            impressions: likes * 5,
        }
    }

    fn post(id: &str, day: u32, reach: i64) -> PostRecord {
        PostRecord {
            permalink: format!("https://fb.com/p/{}", id),
            pubdate: NaiveDate::from_ymd_opt(2015, 6, day)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            message: format!("post {}", id),
            totalreach: reach,
            impressions: reach * 2,
        }
    }

    #[test]
    fn page_context_from_two_days() {
        let records = vec![day(2015, 6, 1, 100), day(2015, 6, 3, 200)];
        let ctx = build_page_context(&records).unwrap();

        assert_eq!(ctx.start_date, "2015-06-01");
        assert_eq!(ctx.end_date, "2015-06-03");
        assert_eq!(ctx.chart_labels, vec!["06/01/2015", "06/03/2015"]);
        assert_eq!(
            serde_json::to_value(ctx.likes.labeled()).unwrap(),
            json!(["Page Likes", 100, 200])
        );
        assert_eq!(ctx.reach.values, vec![300, 600]);
        assert_eq!(ctx.engaged.label, "Engaged Users");
    }

    #[test]
    fn series_have_one_entry_per_row_plus_label() {
        let records: Vec<_> = (1..=7).map(|d| day(2015, 7, d, d as u64)).collect();
        let ctx = build_page_context(&records).unwrap();

        for s in [&ctx.reach, &ctx.impressions, &ctx.engaged, &ctx.likes] {
            assert_eq!(s.labeled().len(), records.len() + 1);
        }
        assert_eq!(ctx.likes.values, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn range_is_min_max_not_first_last() {
        let records = vec![day(2015, 6, 5, 1), day(2015, 6, 2, 1), day(2015, 6, 9, 1), day(2015, 6, 4, 1)];
        let range = date_range(&records, "page", |r| r.date).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2015, 6, 2).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2015, 6, 9).unwrap());
    }

    #[test]
    fn empty_input_is_an_explicit_error() {
        let err = build_page_context(&[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptyData { kind: "page" }));

        let err = build_post_context(&[], 10).unwrap_err();
        assert!(matches!(err, ReportError::EmptyData { kind: "post" }));
    }

    #[test]
    fn top_posts_is_stable_and_descending() {
        let posts = vec![
            post("a", 1, 10),
            post("b", 2, 50),
            post("c", 3, 10),
            post("d", 4, 50),
            post("e", 5, 30),
        ];
        let ids: Vec<_> = top_posts(&posts, 10)
            .into_iter()
            .map(|p| p.message)
            .collect();
        assert_eq!(ids, vec!["post b", "post d", "post e", "post a", "post c"]);
    }

    #[test]
    fn top_posts_truncates_to_n() {
        let posts: Vec<_> = (1..=14).map(|i| post(&i.to_string(), i, i as i64 * 7 % 11)).collect();
        let top = top_posts(&posts, 10);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].totalreach >= w[1].totalreach));
        assert_eq!(top_posts(&posts[..3], 10).len(), 3);
    }

    #[test]
    fn post_context_ranks_and_formats() {
        let posts = vec![post("a", 3, 5), post("b", 1, 9)];
        let ctx = build_post_context(&posts, 10).unwrap();

        assert_eq!(ctx.start_date, "2015-06-01 09:30:00");
        assert_eq!(ctx.end_date, "2015-06-03 09:30:00");
        assert_eq!(ctx.top_posts[0].rank, 1);
        assert_eq!(ctx.top_posts[0].permalink, "https://fb.com/p/b");
        assert_eq!(ctx.top_posts[1].rank, 2);
        assert_eq!(ctx.top_posts[1].pubdate, "2015-06-03 09:30:00");
    }

    #[test]
    fn post_range_uses_timestamp() {
        let early: NaiveDateTime = NaiveDate::from_ymd_opt(2015, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut a = post("a", 1, 1);
        a.pubdate = early;
        let b = post("b", 1, 1);

        let range = date_range(&[b, a], "post", |p| p.pubdate).unwrap();
        assert_eq!(range.start, early);
    }
}
