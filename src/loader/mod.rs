//! CSV loader for the page-metrics and post-engagement exports.
//!
//! Both exports carry two leading rows (column titles plus a description row)
//! that are skipped unconditionally. Cells are picked by fixed column position.

use crate::cleaner::{page_row_to_record, post_row_to_record};
use crate::error::{ReportError, ReportResult};
use crate::models::{PageMetricRecord, PostRecord, RawPageRow, RawPostRow};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

const HEADER_ROWS: usize = 2;

// ── Schemas ───────────────────────────────────────────────────────────────────

/// Zero-based positions of the page export columns we read.
#[derive(Debug, Clone, Copy)]
pub struct PageColumns {
    pub date: usize,
    pub likes: usize,
    pub engaged_users: usize,
    pub reach: usize,
    pub impressions: usize,
}

pub const PAGE_COLUMNS: PageColumns = PageColumns {
    date: 0,
    likes: 1,
    engaged_users: 6,
    reach: 26,
    impressions: 35,
};

/// Zero-based positions of the post export columns we read.
#[derive(Debug, Clone, Copy)]
pub struct PostColumns {
    pub permalink: usize,
    pub message: usize,
    pub pubdate: usize,
    pub totalreach: usize,
    pub impressions: usize,
}

pub const POST_COLUMNS: PostColumns = PostColumns {
    permalink: 1,
    message: 2,
    pubdate: 6,
    totalreach: 7,
    impressions: 10,
};

// ── Reading ───────────────────────────────────────────────────────────────────

fn cell(record: &StringRecord, idx: usize) -> Option<String> {
    record.get(idx).map(|s| s.to_string())
}

/// Read every data row of `path`, after the two header rows.
/// The header rows are counted as physical lines, blank ones included.
fn read_data_rows(path: &Path, kind: &'static str) -> ReportResult<Vec<StringRecord>> {
    let csv_err = |source| ReportError::Csv { kind, source };
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut input = BufReader::new(File::open(path).map_err(io_err)?);
    let mut line = Vec::new();
    for seen in 0..HEADER_ROWS {
        line.clear();
        if input.read_until(b'\n', &mut line).map_err(io_err)? == 0 {
            return Err(ReportError::TooFewRows { kind, found: seen });
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;
    debug!("{}: {} data rows in {:?}", kind, rows.len(), path);
    Ok(rows)
}

/// Parse a page-metrics export into per-day records, in file order.
pub fn load_page_csv(path: &Path) -> ReportResult<Vec<PageMetricRecord>> {
    let c = PAGE_COLUMNS;
    let records = read_data_rows(path, "page")?
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let raw = RawPageRow {
                date: cell(r, c.date),
                likes: cell(r, c.likes),
                engaged_users: cell(r, c.engaged_users),
                reach: cell(r, c.reach),
                impressions: cell(r, c.impressions),
            };
            page_row_to_record(i + 1, &raw)
        })
        .collect::<ReportResult<Vec<_>>>()?;

    info!("page: {} records loaded from {:?}", records.len(), path);
    Ok(records)
}

/// Parse a post-engagement export into per-post records, in file order.
pub fn load_post_csv(path: &Path) -> ReportResult<Vec<PostRecord>> {
    let c = POST_COLUMNS;
    let records = read_data_rows(path, "post")?
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let raw = RawPostRow {
                permalink: cell(r, c.permalink),
                message: cell(r, c.message),
                pubdate: cell(r, c.pubdate),
                totalreach: cell(r, c.totalreach),
                impressions: cell(r, c.impressions),
            };
            post_row_to_record(i + 1, &raw)
        })
        .collect::<ReportResult<Vec<_>>>()?;

    info!("post: {} records loaded from {:?}", records.len(), path);
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A page export row with the five read columns set and the rest blank.
    pub(crate) fn page_line(date: &str, likes: &str, engaged: &str, reach: &str, impr: &str) -> String {
        let mut cells = vec![String::new(); 36];
        cells[PAGE_COLUMNS.date] = date.to_string();
        cells[PAGE_COLUMNS.likes] = likes.to_string();
        cells[PAGE_COLUMNS.engaged_users] = engaged.to_string();
        cells[PAGE_COLUMNS.reach] = reach.to_string();
        cells[PAGE_COLUMNS.impressions] = impr.to_string();
        cells.join(",")
    }

    /// A post export row; `message` is quoted so it may contain commas.
    pub(crate) fn post_line(permalink: &str, message: &str, pubdate: &str, reach: &str, impr: &str) -> String {
        let mut cells = vec![String::new(); 11];
        cells[0] = "123_456".to_string();
        cells[POST_COLUMNS.permalink] = permalink.to_string();
        cells[POST_COLUMNS.message] = format!("\"{}\"", message.replace('"', "\"\""));
        cells[POST_COLUMNS.pubdate] = pubdate.to_string();
        cells[POST_COLUMNS.totalreach] = reach.to_string();
        cells[POST_COLUMNS.impressions] = impr.to_string();
        cells.join(",")
    }

    pub(crate) fn write_csv(lines: &[String]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(f, "{}", line).unwrap();
        }
        f.flush().unwrap();
        f
    }

    fn headers() -> Vec<String> {
        vec!["Date,Lifetime Total Likes".to_string(), ",The total number of people".to_string()]
    }

    #[test]
    fn loads_page_rows_in_file_order() {
        let mut lines = headers();
        lines.push(page_line("2015-06-03", "200", "4", "50", "70"));
        lines.push(page_line("2015-06-01", "100", "3", "40", "60"));
        let f = write_csv(&lines);

        let records = load_page_csv(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].likes, 200);
        assert_eq!(records[0].engaged_users, 4);
        assert_eq!(records[0].reach, 50);
        assert_eq!(records[0].impressions, 70);
        assert_eq!(records[1].likes, 100);
    }

    #[test]
    fn non_numeric_likes_become_zero() {
        let mut lines = headers();
        lines.push(page_line("2015-06-01", "oops", "3", "40", "60"));
        let f = write_csv(&lines);

        let records = load_page_csv(f.path()).unwrap();
        assert_eq!(records[0].likes, 0);
        assert_eq!(records[0].reach, 40);
    }

    #[test]
    fn header_only_file_has_no_records() {
        let f = write_csv(&headers());
        assert!(load_page_csv(f.path()).unwrap().is_empty());
    }

    #[test]
    fn blank_header_row_still_counts_as_a_row() {
        let lines = vec![
            "Date,Lifetime Total Likes".to_string(),
            String::new(),
            page_line("2015-06-01", "100", "3", "40", "60"),
            page_line("2015-06-02", "110", "4", "41", "61"),
        ];
        let f = write_csv(&lines);

        let records = load_page_csv(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].likes, 100);
        assert_eq!(records[1].likes, 110);
    }

    #[test]
    fn single_row_file_is_too_short() {
        let f = write_csv(&["Date".to_string()]);
        let err = load_page_csv(f.path()).unwrap_err();
        assert!(matches!(err, ReportError::TooFewRows { found: 1, .. }));
    }

    #[test]
    fn loads_post_rows_with_quoted_messages() {
        let mut lines = headers();
        lines.push(post_line(
            "https://fb.com/p/1",
            "Hello, \"world\"",
            "06/01/2015 09:00:00 AM",
            "1500",
            "2000",
        ));
        let f = write_csv(&lines);

        let posts = load_post_csv(f.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].message, "Hello, \"world\"");
        assert_eq!(posts[0].permalink, "https://fb.com/p/1");
        assert_eq!(posts[0].totalreach, 1500);
    }

    #[test]
    fn bad_post_reach_reports_row() {
        let mut lines = headers();
        lines.push(post_line("a", "m", "06/01/2015 09:00:00 AM", "10", "1"));
        lines.push(post_line("b", "m", "06/02/2015 09:00:00 AM", "ten", "1"));
        let f = write_csv(&lines);

        let err = load_post_csv(f.path()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidNumber { row: 2, .. }));
    }
}
