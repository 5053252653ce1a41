use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::profile::Columns;
use crate::error::DecodeError;
use crate::snmp::SnmpValue;

/// Semantic column of the interface table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Description,
    InOctets,
    OutOctets,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Description => "name",
            Field::InOctets => "in-octets",
            Field::OutOctets => "out-octets",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells of one table row, keyed by the column they were walked from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: BTreeMap<Field, SnmpValue>,
}

impl Row {
    /// Stores a cell; a later value for the same column replaces the earlier one
    pub fn insert(&mut self, field: Field, value: SnmpValue) {
        self.cells.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&SnmpValue> {
        self.cells.get(&field)
    }
}

/// Assembled table: row index -> row, iterated in ascending index order
pub type Table = BTreeMap<u32, Row>;

/// Decoded counters of one interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    pub index: u32,
    pub name: String,
    pub in_octets: u64,
    pub out_octets: u64,
}

/// A row dropped because one of its fields failed to decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub index: u32,
    pub error: DecodeError,
}

/// Result of polling one device
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub target: String,
    pub profile: String,
    /// Base OIDs the interfaces were read from
    pub columns: Columns,
    pub polled_at: DateTime<Utc>,
    pub interfaces: Vec<InterfaceRecord>,
    pub skipped: Vec<SkippedRow>,
}
