use tracing::warn;

use super::types::{Field, InterfaceRecord, Row, SkippedRow, Table};
use crate::error::DecodeError;
use crate::snmp::SnmpValue;

/// Extracts typed interface records from assembled rows
pub struct RowDecoder;

impl RowDecoder {
    /// Decodes one row. The index comes from the walked OIDs, not from the row values.
    pub fn decode(index: u32, row: &Row) -> Result<InterfaceRecord, DecodeError> {
        let name = Self::field(row, Field::Description, SnmpValue::as_text)?;
        let in_octets = Self::field(row, Field::InOctets, SnmpValue::as_counter)?;
        let out_octets = Self::field(row, Field::OutOctets, SnmpValue::as_counter)?;

        Ok(InterfaceRecord {
            index,
            name,
            in_octets,
            out_octets,
        })
    }

    /// Decodes every row in index order; failed rows are logged and returned separately
    pub fn decode_table(table: &Table) -> (Vec<InterfaceRecord>, Vec<SkippedRow>) {
        let mut records = Vec::with_capacity(table.len());
        let mut skipped = Vec::new();

        for (&index, row) in table {
            match Self::decode(index, row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!("Skipping interface {}: {}", index, error);
                    skipped.push(SkippedRow { index, error });
                }
            }
        }

        (records, skipped)
    }

    fn field<T>(
        row: &Row,
        field: Field,
        decode: impl FnOnce(&SnmpValue) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let value = row.get(field).ok_or(DecodeError::MissingField {
            field: field.name(),
        })?;

        decode(value).ok_or_else(|| DecodeError::InvalidField {
            field: field.name(),
            value: value.to_string(),
        })
    }
}
