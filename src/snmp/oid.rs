use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SessionError;

/// Object identifier parsed into its numeric components
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u64>);

impl Oid {
    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// True when `self` lies inside the subtree rooted at `root` (or equals it)
    pub fn starts_with(&self, root: &Oid) -> bool {
        self.0.starts_with(&root.0)
    }

    /// Converts into the `snmp2` representation used on the wire
    pub fn to_snmp(&self) -> Result<snmp2::Oid<'static>, SessionError> {
        snmp2::Oid::from(&self.0).map_err(|e| SessionError::InvalidOid {
            oid: self.to_string(),
            reason: format!("{e:?}"),
        })
    }
}

impl From<&[u64]> for Oid {
    fn from(components: &[u64]) -> Self {
        Self(components.to_vec())
    }
}

impl FromStr for Oid {
    type Err = std::num::ParseIntError;

    /// Accepts `1.3.6.1` as well as the `.1.3.6.1` form used by net-snmp
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(parts))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid OID '{s}': {e}")))
    }
}

/// Returns the row index encoded in the last component of a walked OID
pub fn row_index(oid: &str) -> Result<u32, std::num::ParseIntError> {
    let last = oid.rsplit('.').next().unwrap_or(oid);
    last.trim().parse::<u32>()
}
