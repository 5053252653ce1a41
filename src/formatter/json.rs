use serde::Serialize;

use crate::collector::{DeviceReport, InterfaceRecord, SkippedRow};
use crate::config::profile::Columns;

/// JSON document emitted for one polled device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReportJson {
    pub target: String,
    pub profile: String,
    pub columns: Columns,
    pub timestamp: String,
    pub summary: ReportSummary,
    pub interfaces: Vec<InterfaceRecord>,
    pub skipped: Vec<SkippedRowJson>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_rows: usize,
    pub decoded_rows: usize,
    pub skipped_rows: usize,
    pub total_in_octets: u64,
    pub total_out_octets: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRowJson {
    pub index: u32,
    pub field: String,
    pub error: String,
}

/// Renders device reports as JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_report(report: &DeviceReport) -> DeviceReportJson {
        let summary = ReportSummary {
            total_rows: report.interfaces.len() + report.skipped.len(),
            decoded_rows: report.interfaces.len(),
            skipped_rows: report.skipped.len(),
            total_in_octets: report
                .interfaces
                .iter()
                .fold(0u64, |sum, i| sum.saturating_add(i.in_octets)),
            total_out_octets: report
                .interfaces
                .iter()
                .fold(0u64, |sum, i| sum.saturating_add(i.out_octets)),
        };

        DeviceReportJson {
            target: report.target.clone(),
            profile: report.profile.clone(),
            columns: report.columns.clone(),
            timestamp: report.polled_at.to_rfc3339(),
            summary,
            interfaces: report.interfaces.clone(),
            skipped: report.skipped.iter().map(Self::format_skipped).collect(),
        }
    }

    fn format_skipped(row: &SkippedRow) -> SkippedRowJson {
        SkippedRowJson {
            index: row.index,
            field: row.error.field().to_string(),
            error: row.error.to_string(),
        }
    }

    /// Pretty-printed document
    pub fn to_json_string(report: &DeviceReport) -> anyhow::Result<String> {
        let json = Self::format_report(report);
        serde_json::to_string_pretty(&json)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report for {}: {}", report.target, e))
    }

    /// Single-line document, one per device
    pub fn to_json_compact(report: &DeviceReport) -> anyhow::Result<String> {
        let json = Self::format_report(report);
        serde_json::to_string(&json)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report for {}: {}", report.target, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::error::DecodeError;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn report() -> DeviceReport {
        DeviceReport {
            target: "10.0.0.1".to_string(),
            profile: "if-table".to_string(),
            columns: Profile::if_table().columns,
            polled_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            interfaces: vec![
                InterfaceRecord {
                    index: 1,
                    name: "eth0".to_string(),
                    in_octets: 100,
                    out_octets: 200,
                },
                InterfaceRecord {
                    index: 2,
                    name: "eth1".to_string(),
                    in_octets: 300,
                    out_octets: 400,
                },
            ],
            skipped: vec![SkippedRow {
                index: 3,
                error: DecodeError::InvalidField {
                    field: "in-octets",
                    value: "n/a".to_string(),
                },
            }],
        }
    }

    #[test]
    fn summary_counts_rows_and_octets() {
        let json = JsonFormatter::format_report(&report());
        assert_eq!(json.summary.total_rows, 3);
        assert_eq!(json.summary.decoded_rows, 2);
        assert_eq!(json.summary.skipped_rows, 1);
        assert_eq!(json.summary.total_in_octets, 400);
        assert_eq!(json.summary.total_out_octets, 600);
    }

    #[test]
    fn document_shape() {
        let text = JsonFormatter::to_json_compact(&report()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["target"], "10.0.0.1");
        assert_eq!(doc["timestamp"], "2026-01-02T03:04:05+00:00");
        assert_eq!(doc["interfaces"][1]["name"], "eth1");
        assert_eq!(doc["interfaces"][1]["out_octets"], 400);
        assert_eq!(doc["skipped"][0]["index"], 3);
        assert_eq!(doc["skipped"][0]["field"], "in-octets");
    }

    #[test]
    fn document_names_walked_columns() {
        let text = JsonFormatter::to_json_compact(&report()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["columns"]["description"], "1.3.6.1.2.1.2.2.1.2");
        assert_eq!(doc["columns"]["in_octets"], "1.3.6.1.2.1.2.2.1.10");
        assert_eq!(doc["columns"]["out_octets"], "1.3.6.1.2.1.2.2.1.16");
    }

    #[test]
    fn pretty_output_is_multiline() {
        let text = JsonFormatter::to_json_string(&report()).unwrap();
        assert!(text.lines().count() > 10);
    }
}
