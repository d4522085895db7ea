use crate::record::{DateRange, DbRecord};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Outcome code produced by a single analysis run.
///
/// The runner maps each variant to exactly one completion handler call, and
/// the mapping is an exhaustive match. Adding a variant here forces every
/// dispatch site to be updated before the crate compiles again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The analysis ran to completion.
    Complete,
    /// No records fell inside the analyzable range.
    NoData,
    /// The configured start date lies after the end date.
    DatesReversed,
}

/// Contract for the analysis operation driven by the runner.
///
/// Implementations receive the configured dataset and output target, perform
/// their work synchronously from the runner's point of view, and report one
/// `Outcome`. They are expected not to spawn background work of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analysis: Send + Sync {
    async fn analyze(&self, records: &[DbRecord], target: &str) -> Outcome;
}

/// How much work a `TrendAnalysis` run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Summary statistics plus a per-day breakdown.
    #[default]
    Normal,
    /// Summary statistics only.
    SummaryOnly,
    /// Analyze every record regardless of the configured range.
    FullRange,
}

/// Summary statistics over the selected records.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    fn compute(records: &[&DbRecord]) -> Self {
        let count = records.len();
        let sum: f64 = records.iter().map(|r| r.value).sum();
        let min = records.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
        let max = records
            .iter()
            .map(|r| r.value)
            .fold(f64::NEG_INFINITY, f64::max);
        Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        }
    }
}

/// Trend analysis over a configured date range.
///
/// Validates the range, selects the records inside it, and computes summary
/// statistics for the eventual report identified by the output target. Report
/// rendering and export are handled elsewhere; this component only decides
/// whether a run can produce a report and logs what it found.
pub struct TrendAnalysis {
    range: DateRange,
    mode: AnalysisMode,
}

impl TrendAnalysis {
    pub fn new(range: DateRange, mode: AnalysisMode) -> Self {
        Self { range, mode }
    }

    fn select<'a>(&self, records: &'a [DbRecord]) -> Vec<&'a DbRecord> {
        match self.mode {
            AnalysisMode::FullRange => records.iter().collect(),
            _ => records
                .iter()
                .filter(|r| self.range.contains(r.timestamp))
                .collect(),
        }
    }

    fn log_daily_breakdown(&self, selected: &[&DbRecord]) {
        let mut days: BTreeMap<chrono::NaiveDate, (usize, f64)> = BTreeMap::new();
        for record in selected {
            let entry = days.entry(record.timestamp.date_naive()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += record.value;
        }
        for (day, (count, sum)) in days {
            tracing::debug!("{}: {} readings, mean {:.2}", day, count, sum / count as f64);
        }
    }
}

#[async_trait]
impl Analysis for TrendAnalysis {
    async fn analyze(&self, records: &[DbRecord], target: &str) -> Outcome {
        if self.mode != AnalysisMode::FullRange && self.range.is_reversed() {
            tracing::warn!(
                "range {} to {} is reversed, analysis skipped",
                self.range.start,
                self.range.end
            );
            return Outcome::DatesReversed;
        }

        let selected = self.select(records);
        if selected.is_empty() {
            tracing::info!("no records selected for {}", target);
            return Outcome::NoData;
        }

        let summary = Summary::compute(&selected);
        tracing::info!(
            "analysis for {}: {} readings, mean {:.2}, min {:.2}, max {:.2}",
            target,
            summary.count,
            summary.mean,
            summary.min,
            summary.max
        );

        if self.mode == AnalysisMode::Normal {
            self.log_daily_breakdown(&selected);
        }

        Outcome::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u64, y: i32, m: u32, d: u32, value: f64) -> DbRecord {
        DbRecord {
            id,
            timestamp: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            value,
        }
    }

    fn january() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    #[tokio::test]
    async fn test_reversed_range_aborts_analysis() {
        let range = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));
        let analysis = TrendAnalysis::new(range, AnalysisMode::Normal);
        let records = vec![record(1, 2024, 1, 10, 5.4)];

        let outcome = analysis.analyze(&records, "report.xlsx").await;

        assert_eq!(outcome, Outcome::DatesReversed);
    }

    #[tokio::test]
    async fn test_empty_dataset_has_no_data() {
        let analysis = TrendAnalysis::new(january(), AnalysisMode::Normal);

        let outcome = analysis.analyze(&[], "report.xlsx").await;

        assert_eq!(outcome, Outcome::NoData);
    }

    #[tokio::test]
    async fn test_records_outside_range_have_no_data() {
        let analysis = TrendAnalysis::new(january(), AnalysisMode::Normal);
        let records = vec![record(1, 2024, 3, 5, 5.4), record(2, 2024, 3, 6, 6.1)];

        let outcome = analysis.analyze(&records, "report.xlsx").await;

        assert_eq!(outcome, Outcome::NoData);
    }

    #[tokio::test]
    async fn test_records_in_range_complete() {
        let analysis = TrendAnalysis::new(january(), AnalysisMode::SummaryOnly);
        let records = vec![record(1, 2024, 1, 10, 5.4), record(2, 2024, 3, 6, 6.1)];

        let outcome = analysis.analyze(&records, "report.xlsx").await;

        assert_eq!(outcome, Outcome::Complete);
    }

    #[tokio::test]
    async fn test_full_range_mode_ignores_reversed_range() {
        let range = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));
        let analysis = TrendAnalysis::new(range, AnalysisMode::FullRange);
        let records = vec![record(1, 2023, 6, 1, 4.9)];

        let outcome = analysis.analyze(&records, "report.xlsx").await;

        assert_eq!(outcome, Outcome::Complete);
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![
            record(1, 2024, 1, 10, 4.0),
            record(2, 2024, 1, 11, 6.0),
            record(3, 2024, 1, 12, 8.0),
        ];
        let refs: Vec<&DbRecord> = records.iter().collect();

        let summary = Summary::compute(&refs);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.min, 4.0);
        assert_eq!(summary.max, 8.0);
    }
}
