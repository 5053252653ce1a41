use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::settings::ConnectionSettings;
use crate::collector::Field;
use crate::snmp::Oid;

/// IF-MIB::ifDescr
pub const IF_DESCR: &[u64] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 2];
/// IF-MIB::ifInOctets
pub const IF_IN_OCTETS: &[u64] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 10];
/// IF-MIB::ifOutOctets
pub const IF_OUT_OCTETS: &[u64] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 16];

/// IF-MIB::ifName
pub const IF_NAME: &[u64] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 1];
/// IF-MIB::ifHCInOctets
pub const IF_HC_IN_OCTETS: &[u64] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 6];
/// IF-MIB::ifHCOutOctets
pub const IF_HC_OUT_OCTETS: &[u64] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 10];

/// Base OIDs of the three walked columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub description: Oid,
    pub in_octets: Oid,
    pub out_octets: Oid,
}

impl Columns {
    /// Columns in walk order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &Oid)> {
        [
            (Field::Description, &self.description),
            (Field::InOctets, &self.in_octets),
            (Field::OutOctets, &self.out_octets),
        ]
        .into_iter()
    }
}

/// Which table to walk and how to reach the device
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub columns: Columns,
    #[serde(default)]
    pub connection: ConnectionSettings,
}

impl Profile {
    /// ifTable: ifDescr with 32-bit ifInOctets / ifOutOctets
    pub fn if_table() -> Self {
        Self::builtin("if-table", IF_DESCR, IF_IN_OCTETS, IF_OUT_OCTETS)
    }

    /// ifXTable: ifName with 64-bit ifHCInOctets / ifHCOutOctets
    pub fn if_x_table() -> Self {
        Self::builtin("if-x-table", IF_NAME, IF_HC_IN_OCTETS, IF_HC_OUT_OCTETS)
    }

    fn builtin(name: &str, description: &[u64], in_octets: &[u64], out_octets: &[u64]) -> Self {
        Self {
            name: name.to_string(),
            columns: Columns {
                description: Oid::from(description),
                in_octets: Oid::from(in_octets),
                out_octets: Oid::from(out_octets),
            },
            connection: ConnectionSettings::default(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;

        Self::from_yaml(&content).with_context(|| format!("Invalid profile: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let profile: Profile = serde_yml::from_str(content).context("Failed to parse YAML")?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<()> {
        let columns: Vec<_> = self.columns.iter().collect();
        for (field, oid) in &columns {
            if oid.components().is_empty() {
                anyhow::bail!("Profile '{}': empty OID for {} column", self.name, field);
            }
        }
        for (i, (field, oid)) in columns.iter().enumerate() {
            for (other, other_oid) in &columns[i + 1..] {
                if oid.starts_with(other_oid) || other_oid.starts_with(oid) {
                    anyhow::bail!(
                        "Profile '{}': {} and {} columns overlap ({} / {})",
                        self.name,
                        field,
                        other,
                        oid,
                        other_oid
                    );
                }
            }
        }
        if self.connection.timeout == 0 {
            anyhow::bail!("Profile '{}': timeout must be at least 1 second", self.name);
        }
        Ok(())
    }
}
