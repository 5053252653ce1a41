use tracing::debug;

use super::types::{Field, Table};
use crate::error::PollError;
use crate::snmp::{Oid, Varbind, WalkSession, row_index};

/// Builds a row-indexed table out of parallel column walks
pub struct TableAssembler;

impl TableAssembler {
    /// Walks each column in order and groups the values by row index
    pub async fn assemble<'a, S, I>(session: &mut S, columns: I) -> Result<Table, PollError>
    where
        S: WalkSession + ?Sized,
        I: IntoIterator<Item = (Field, &'a Oid)>,
    {
        let columns: Vec<(Field, &Oid)> = columns.into_iter().collect();
        let mut walked = Vec::new();

        for (field, root) in columns {
            let varbinds = session.walk(root).await.map_err(|source| PollError::Walk {
                oid: root.to_string(),
                source,
            })?;
            debug!("Walked {} ({}): {} values", root, field, varbinds.len());
            walked.extend(varbinds.into_iter().map(|varbind| (field, varbind)));
        }

        Self::group(walked)
    }

    /// Groups walked values by the last OID component, keeping the column of each value.
    /// One malformed index fails the whole table.
    pub fn group(walked: impl IntoIterator<Item = (Field, Varbind)>) -> Result<Table, PollError> {
        let mut table = Table::new();

        for (field, Varbind { oid, value }) in walked {
            let index = row_index(&oid).map_err(|source| PollError::IndexParse {
                oid: oid.clone(),
                source,
            })?;
            table.entry(index).or_default().insert(field, value);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::snmp::SnmpValue;
    use crate::snmp::mock::{MockDevice, octets};

    fn varbind(oid: &str, value: SnmpValue) -> Varbind {
        Varbind::new(oid, value)
    }

    #[test]
    fn groups_columns_by_trailing_index() {
        let table = TableAssembler::group([
            (Field::Description, varbind("1.3.6.1.2.1.2.2.1.2.1", octets("eth0"))),
            (Field::Description, varbind("1.3.6.1.2.1.2.2.1.2.2", octets("eth1"))),
            (Field::InOctets, varbind("1.3.6.1.2.1.2.2.1.10.2", SnmpValue::Counter32(300))),
            (Field::InOctets, varbind("1.3.6.1.2.1.2.2.1.10.1", SnmpValue::Counter32(100))),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[&1].get(Field::Description), Some(&octets("eth0")));
        assert_eq!(table[&1].get(Field::InOctets), Some(&SnmpValue::Counter32(100)));
        assert_eq!(table[&2].get(Field::InOctets), Some(&SnmpValue::Counter32(300)));
        assert_eq!(table[&2].get(Field::OutOctets), None);
    }

    #[test]
    fn later_value_for_same_cell_wins() {
        let table = TableAssembler::group([
            (Field::InOctets, varbind("1.3.6.1.2.1.2.2.1.10.4", SnmpValue::Counter32(1))),
            (Field::InOctets, varbind("1.3.6.1.2.1.2.2.1.10.4", SnmpValue::Counter32(2))),
        ])
        .unwrap();

        assert_eq!(table[&4].get(Field::InOctets), Some(&SnmpValue::Counter32(2)));
    }

    #[test]
    fn malformed_index_aborts_whole_table() {
        let err = TableAssembler::group([
            (Field::Description, varbind("1.3.6.1.2.1.2.2.1.2.1", octets("eth0"))),
            (Field::Description, varbind("1.3.6.1.2.1.2.2.1.2.lo", octets("lo"))),
            (Field::Description, varbind("1.3.6.1.2.1.2.2.1.2.3", octets("eth2"))),
        ])
        .unwrap_err();

        match err {
            PollError::IndexParse { oid, .. } => assert_eq!(oid, "1.3.6.1.2.1.2.2.1.2.lo"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn walks_columns_in_profile_order() {
        let profile = Profile::if_table();
        let columns = &profile.columns;
        let mut device = MockDevice::new()
            .leaf(&columns.description, "1", octets("eth0"))
            .leaf(&columns.in_octets, "1", SnmpValue::Counter32(100))
            .leaf(&columns.out_octets, "1", SnmpValue::Counter32(200));

        let table = TableAssembler::assemble(&mut device, columns.iter()).await.unwrap();

        assert_eq!(table[&1].get(Field::OutOctets), Some(&SnmpValue::Counter32(200)));
        assert_eq!(
            device.walked(),
            ["1.3.6.1.2.1.2.2.1.2", "1.3.6.1.2.1.2.2.1.10", "1.3.6.1.2.1.2.2.1.16"]
        );
    }

    #[tokio::test]
    async fn empty_walks_give_empty_table() {
        let profile = Profile::if_table();
        let mut device = MockDevice::new();

        let table = TableAssembler::assemble(&mut device, profile.columns.iter()).await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn walk_failure_names_base_oid() {
        let profile = Profile::if_table();
        let columns = &profile.columns;
        let mut device = MockDevice::new()
            .leaf(&columns.description, "1", octets("eth0"))
            .failing(&columns.in_octets);

        let err = TableAssembler::assemble(&mut device, columns.iter()).await.unwrap_err();

        assert_eq!(err.stage(), "walk");
        match err {
            PollError::Walk { oid, .. } => assert_eq!(oid, "1.3.6.1.2.1.2.2.1.10"),
            other => panic!("unexpected error: {other}"),
        }
        // the out-octets column is never reached
        assert_eq!(device.walked().len(), 2);
    }
}
