use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Failures raised by an SNMP session while connecting or walking
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SNMP error: {0}")]
    Snmp(#[from] snmp2::Error),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("agent returned error status {status} (index {index})")]
    ErrorStatus { status: u32, index: u32 },
    #[error("OIDs not increasing: {current} after {previous}")]
    OidsNotIncreasing { previous: String, current: String },
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("invalid OID '{oid}': {reason}")]
    InvalidOid { oid: String, reason: String },
}

/// Fatal failures of one device poll; each variant names the stage that failed
#[derive(Error, Debug)]
pub enum PollError {
    #[error("IP address is required")]
    MissingTarget,
    #[error("failed to connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: SessionError,
    },
    #[error("failed to walk OID {oid}: {source}")]
    Walk {
        oid: String,
        #[source]
        source: SessionError,
    },
    #[error("failed to parse row index of OID {oid}: {source}")]
    IndexParse {
        oid: String,
        #[source]
        source: ParseIntError,
    },
    #[error("poll aborted: {0}")]
    Aborted(String),
}

impl PollError {
    /// Short name of the pipeline stage the error came from
    pub fn stage(&self) -> &'static str {
        match self {
            PollError::MissingTarget => "config",
            PollError::Connection { .. } => "connect",
            PollError::Walk { .. } => "walk",
            PollError::IndexParse { .. } => "assemble",
            PollError::Aborted(_) => "task",
        }
    }
}

/// Per-row decode failure; the row is skipped and polling continues
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing {field} column")]
    MissingField { field: &'static str },
    #[error("failed to parse {field} from '{value}'")]
    InvalidField { field: &'static str, value: String },
}

impl DecodeError {
    pub fn field(&self) -> &'static str {
        match self {
            DecodeError::MissingField { field } | DecodeError::InvalidField { field, .. } => field,
        }
    }
}
