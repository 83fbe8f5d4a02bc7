use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

// ── Page metrics ──────────────────────────────────────────────────────────────

/// One day of page-level statistics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageMetricRecord {
    pub date: NaiveDate,
    pub likes: u64,
    pub engaged_users: u64,
    pub reach: u64,
    pub impressions: u64,
}

// ── Post metrics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostRecord {
    pub permalink: String,
    pub pubdate: NaiveDateTime,
    pub message: String,
    pub totalreach: i64,
    pub impressions: i64,
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Inclusive span between the earliest and latest key of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange<T> {
    pub start: T,
    pub end: T,
}

/// A named chart series. Values keep file row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: &'static str,
    pub values: Vec<u64>,
}

impl Series {
    pub fn new(label: &'static str, values: Vec<u64>) -> Self {
        Self { label, values }
    }

    /// Chart column form: `[label, v1, v2, …]`.
    pub fn labeled(&self) -> Vec<Value> {
        std::iter::once(Value::from(self.label))
            .chain(self.values.iter().map(|v| Value::from(*v)))
            .collect()
    }
}

impl Serialize for Series {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Series", 3)?;
        s.serialize_field("label", self.label)?;
        s.serialize_field("values", &self.values)?;
        s.serialize_field("columns", &self.labeled())?;
        s.end()
    }
}

// ── Raw CSV rows ──────────────────────────────────────────────────────────────

/// Page export cells, picked by column position. `None` means the row was too short.
#[derive(Debug, Clone, Default)]
pub struct RawPageRow {
    pub date: Option<String>,
    pub likes: Option<String>,
    pub engaged_users: Option<String>,
    pub reach: Option<String>,
    pub impressions: Option<String>,
}

/// Post export cells, picked by column position.
#[derive(Debug, Clone, Default)]
pub struct RawPostRow {
    pub permalink: Option<String>,
    pub message: Option<String>,
    pub pubdate: Option<String>,
    pub totalreach: Option<String>,
    pub impressions: Option<String>,
}
