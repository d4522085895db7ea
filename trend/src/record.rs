/// Record module for the Trend analysis system
///
/// This module defines the data structures shared between the runner and the
/// analysis components: individual database result rows and the date range
/// an analysis is scoped to.
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A single analyzable result row loaded from the database
///
/// # Fields
/// * `id` - Row identifier from the source table
/// * `timestamp` - When the reading was taken
/// * `value` - The measured value for this reading
#[derive(Debug, Clone, PartialEq)]
pub struct DbRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Inclusive date range an analysis run is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range is reversed when its start date lies after its end date.
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        date >= self.start && date <= self.end
    }
}
