use tracing::info;

use crate::collector::{DeviceReport, InterfaceRecord};

/// Logs one line per decoded interface
pub struct TextReporter;

impl TextReporter {
    pub fn report(report: &DeviceReport) {
        for record in &report.interfaces {
            info!(device = %report.target, "{}", Self::line(record));
        }
    }

    pub fn line(record: &InterfaceRecord) -> String {
        format!(
            "Interface {} ({}) statistics: ifInOctets={}, ifOutOctets={}",
            record.index, record.name, record.in_octets, record.out_octets
        )
    }
}
