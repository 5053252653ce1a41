use async_trait::async_trait;

use crate::error::SessionError;

pub mod client;
#[cfg(test)]
pub mod mock;
pub mod oid;
pub mod value;

pub use client::SnmpConnector;
pub use oid::{Oid, row_index};
pub use value::SnmpValue;

/// One walked leaf: the OID as returned by the agent and its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Varbind {
    pub oid: String,
    pub value: SnmpValue,
}

impl Varbind {
    pub fn new(oid: impl Into<String>, value: SnmpValue) -> Self {
        Self {
            oid: oid.into(),
            value,
        }
    }
}

/// An open session able to walk an OID subtree
#[async_trait]
pub trait WalkSession: Send {
    /// Returns every leaf under `root`, in the order the agent produced them
    async fn walk(&mut self, root: &Oid) -> Result<Vec<Varbind>, SessionError>;
}

/// Opens sessions to a target device
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: WalkSession;

    async fn connect(&self, target: &str) -> Result<Self::Session, SessionError>;
}
