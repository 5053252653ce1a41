//! In-memory agents for exercising the poll pipeline without a network.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{Connector, Oid, SnmpValue, Varbind, WalkSession};
use crate::error::SessionError;

/// Walk responses of one simulated device
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    walks: HashMap<Oid, Vec<Varbind>>,
    failing: HashSet<Oid>,
    walked: Arc<Mutex<Vec<String>>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one leaf under `root`; the leaf OID is `root.suffix`
    pub fn leaf(mut self, root: &Oid, suffix: &str, value: SnmpValue) -> Self {
        self.walks
            .entry(root.clone())
            .or_default()
            .push(Varbind::new(format!("{root}.{suffix}"), value));
        self
    }

    /// Makes every walk of `root` time out
    pub fn failing(mut self, root: &Oid) -> Self {
        self.failing.insert(root.clone());
        self
    }

    /// Reverses the order in which each walk returns its leaves
    pub fn reversed(mut self) -> Self {
        for varbinds in self.walks.values_mut() {
            varbinds.reverse();
        }
        self
    }

    /// Base OIDs walked so far, in call order
    pub fn walked(&self) -> Vec<String> {
        self.walked.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WalkSession for MockDevice {
    async fn walk(&mut self, root: &Oid) -> Result<Vec<Varbind>, SessionError> {
        if let Ok(mut walked) = self.walked.lock() {
            walked.push(root.to_string());
        }
        if self.failing.contains(root) {
            return Err(SessionError::Timeout(Duration::from_secs(5)));
        }
        Ok(self.walks.get(root).cloned().unwrap_or_default())
    }
}

/// Hands out clones of registered devices; unknown targets refuse the connection
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    devices: HashMap<String, MockDevice>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, target: &str, device: MockDevice) -> Self {
        self.devices.insert(target.to_string(), device);
        self
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Session = MockDevice;

    async fn connect(&self, target: &str) -> Result<MockDevice, SessionError> {
        self.devices.get(target).cloned().ok_or_else(|| {
            SessionError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no agent at {target}"),
            ))
        })
    }
}

pub fn octets(text: &str) -> SnmpValue {
    SnmpValue::OctetString(text.as_bytes().to_vec())
}
