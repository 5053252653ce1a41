use std::fmt;

use snmp2::Value;

/// Owned copy of a varbind value, detached from the response buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Boolean(bool),
    Null,
    Integer(i64),
    OctetString(Vec<u8>),
    ObjectIdentifier(String),
    IpAddress([u8; 4]),
    Counter32(u32),
    Unsigned32(u32),
    Timeticks(u32),
    Opaque(Vec<u8>),
    Counter64(u64),
    EndOfMibView,
    NoSuchObject,
    NoSuchInstance,
    Other(String),
}

impl SnmpValue {
    /// Exception values returned in place of data at the end of a subtree
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            SnmpValue::EndOfMibView | SnmpValue::NoSuchObject | SnmpValue::NoSuchInstance
        )
    }

    /// Decodes the value as a non-negative counter
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            SnmpValue::Counter32(v) | SnmpValue::Unsigned32(v) | SnmpValue::Timeticks(v) => {
                Some(u64::from(*v))
            }
            SnmpValue::Counter64(v) => Some(*v),
            SnmpValue::Integer(v) => u64::try_from(*v).ok(),
            SnmpValue::OctetString(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
            _ => None,
        }
    }

    /// Decodes the value as display text, `None` for exceptions and nulls
    pub fn as_text(&self) -> Option<String> {
        match self {
            SnmpValue::Null => None,
            v if v.is_exception() => None,
            v => Some(v.to_string()),
        }
    }
}

impl fmt::Display for SnmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpValue::Boolean(v) => write!(f, "{v}"),
            SnmpValue::Null => f.write_str("NULL"),
            SnmpValue::Integer(v) => write!(f, "{v}"),
            SnmpValue::OctetString(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                f.write_str(text.trim_end_matches('\0'))
            }
            SnmpValue::ObjectIdentifier(oid) => f.write_str(oid),
            SnmpValue::IpAddress([a, b, c, d]) => write!(f, "{a}.{b}.{c}.{d}"),
            SnmpValue::Counter32(v) | SnmpValue::Unsigned32(v) | SnmpValue::Timeticks(v) => {
                write!(f, "{v}")
            }
            SnmpValue::Opaque(bytes) => {
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            SnmpValue::Counter64(v) => write!(f, "{v}"),
            SnmpValue::EndOfMibView => f.write_str("endOfMibView"),
            SnmpValue::NoSuchObject => f.write_str("noSuchObject"),
            SnmpValue::NoSuchInstance => f.write_str("noSuchInstance"),
            SnmpValue::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<Value<'_>> for SnmpValue {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Boolean(v) => SnmpValue::Boolean(v),
            Value::Null => SnmpValue::Null,
            Value::Integer(v) => SnmpValue::Integer(v),
            Value::OctetString(bytes) => SnmpValue::OctetString(bytes.to_vec()),
            Value::ObjectIdentifier(oid) => SnmpValue::ObjectIdentifier(oid.to_string()),
            Value::IpAddress(addr) => SnmpValue::IpAddress(addr),
            Value::Counter32(v) => SnmpValue::Counter32(v),
            Value::Unsigned32(v) => SnmpValue::Unsigned32(v),
            Value::Timeticks(v) => SnmpValue::Timeticks(v),
            Value::Opaque(bytes) => SnmpValue::Opaque(bytes.to_vec()),
            Value::Counter64(v) => SnmpValue::Counter64(v),
            Value::EndOfMibView => SnmpValue::EndOfMibView,
            Value::NoSuchObject => SnmpValue::NoSuchObject,
            Value::NoSuchInstance => SnmpValue::NoSuchInstance,
            other => SnmpValue::Other(format!("{other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_decode_from_numeric_types() {
        assert_eq!(SnmpValue::Counter32(100).as_counter(), Some(100));
        assert_eq!(SnmpValue::Counter64(u64::MAX).as_counter(), Some(u64::MAX));
        assert_eq!(SnmpValue::Unsigned32(7).as_counter(), Some(7));
        assert_eq!(SnmpValue::Integer(42).as_counter(), Some(42));
        assert_eq!(SnmpValue::OctetString(b" 300 ".to_vec()).as_counter(), Some(300));
    }

    #[test]
    fn counters_reject_non_numeric() {
        assert_eq!(SnmpValue::Integer(-1).as_counter(), None);
        assert_eq!(SnmpValue::OctetString(b"lots".to_vec()).as_counter(), None);
        assert_eq!(SnmpValue::NoSuchInstance.as_counter(), None);
        assert_eq!(SnmpValue::Null.as_counter(), None);
    }

    #[test]
    fn octet_strings_render_as_text() {
        let v = SnmpValue::OctetString(b"GigabitEthernet0/1\0".to_vec());
        assert_eq!(v.as_text().as_deref(), Some("GigabitEthernet0/1"));
        assert_eq!(SnmpValue::IpAddress([10, 0, 0, 1]).to_string(), "10.0.0.1");
    }

    #[test]
    fn exceptions_have_no_text() {
        assert!(SnmpValue::EndOfMibView.is_exception());
        assert_eq!(SnmpValue::NoSuchObject.as_text(), None);
        assert_eq!(SnmpValue::Null.as_text(), None);
    }
}
