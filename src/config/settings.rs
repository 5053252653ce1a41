use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET: &str = "192.168.1.1";
pub const DEFAULT_COMMUNITY: &str = "public";
pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_REPETITIONS: u32 = 10;
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Protocol version used for the session (community based only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnmpVersion {
    V1,
    #[default]
    V2c,
}

/// Connection settings applied to every polled device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// UDP port of the agent
    pub port: u16,
    /// Timeout for connecting and for each request (seconds)
    pub timeout: u64,
    pub version: SnmpVersion,
    /// GETBULK max-repetitions for v2c walks
    pub max_repetitions: u32,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
            version: SnmpVersion::V2c,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
        }
    }
}

impl ConnectionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
