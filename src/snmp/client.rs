use std::net::{IpAddr, Ipv6Addr, SocketAddr, SocketAddrV6};
use std::time::Duration;

use async_trait::async_trait;
use snmp2::AsyncSession;
use tokio::time::timeout;
use tracing::debug;

use super::{Connector, Oid, SnmpValue, Varbind, WalkSession};
use crate::config::{ConnectionSettings, SnmpVersion};
use crate::error::SessionError;

/// noSuchName, how v1 agents report the end of the MIB view
const V1_NO_SUCH_NAME: u32 = 2;

/// Community-based SNMP session to one device
pub struct SnmpClient {
    session: AsyncSession,
    version: SnmpVersion,
    timeout: Duration,
    max_repetitions: u32,
}

impl SnmpClient {
    /// Opens a session; the socket is closed when the client is dropped
    pub async fn connect(
        target: &str,
        community: &[u8],
        settings: &ConnectionSettings,
    ) -> Result<Self, SessionError> {
        let addr = socket_address(target, settings.port)?;
        let timeout_after = settings.timeout();

        let open = async {
            match settings.version {
                SnmpVersion::V1 => AsyncSession::new_v1(addr.as_str(), community, 0).await,
                SnmpVersion::V2c => AsyncSession::new_v2c(addr.as_str(), community, 0).await,
            }
        };

        let session = timeout(timeout_after, open)
            .await
            .map_err(|_| SessionError::Timeout(timeout_after))??;

        debug!("SNMP: session to {} opened ({:?})", addr, settings.version);

        Ok(Self {
            session,
            version: settings.version,
            timeout: timeout_after,
            max_repetitions: settings.max_repetitions.max(1),
        })
    }

    /// Fetches the varbinds following `from`: one GETNEXT for v1, one GETBULK for v2c
    async fn next_page(&mut self, from: &Oid) -> Result<Vec<Varbind>, SessionError> {
        let request = from.to_snmp()?;
        let timeout_after = self.timeout;
        let max_repetitions = self.max_repetitions;
        let version = self.version;
        let session = &mut self.session;

        let response = match version {
            SnmpVersion::V1 => timeout(timeout_after, session.getnext(&request)).await,
            SnmpVersion::V2c => {
                timeout(
                    timeout_after,
                    session.getbulk(&[&request], 0, max_repetitions),
                )
                .await
            }
        };
        let pdu = response.map_err(|_| SessionError::Timeout(timeout_after))??;

        if !check_status(version, pdu.error_status, pdu.error_index)? {
            return Ok(Vec::new());
        }

        Ok(pdu
            .varbinds
            .map(|(oid, value)| Varbind::new(oid.to_string(), SnmpValue::from(value)))
            .collect())
    }
}

#[async_trait]
impl WalkSession for SnmpClient {
    async fn walk(&mut self, root: &Oid) -> Result<Vec<Varbind>, SessionError> {
        let mut results = Vec::new();
        let mut last = root.clone();

        loop {
            let page = self.next_page(&last).await?;
            if !absorb_page(root, &mut last, page, &mut results)? {
                break;
            }
        }

        debug!("SNMP: walk {}: {} values", root, results.len());
        Ok(results)
    }
}

/// Checks a response's error status; `Ok(false)` when it marks the end of a v1 walk
fn check_status(version: SnmpVersion, status: u32, index: u32) -> Result<bool, SessionError> {
    match status {
        0 => Ok(true),
        V1_NO_SUCH_NAME if version == SnmpVersion::V1 => Ok(false),
        status => Err(SessionError::ErrorStatus { status, index }),
    }
}

/// Appends the page's varbinds that belong to `root` and advances `last`.
/// Returns whether the walk should request another page.
fn absorb_page(
    root: &Oid,
    last: &mut Oid,
    page: Vec<Varbind>,
    out: &mut Vec<Varbind>,
) -> Result<bool, SessionError> {
    if page.is_empty() {
        return Ok(false);
    }

    for varbind in page {
        if varbind.value.is_exception() {
            debug!("SNMP: walk {}: done ({})", root, varbind.value);
            return Ok(false);
        }

        let oid = varbind.oid.parse::<Oid>().map_err(|e| SessionError::InvalidOid {
            oid: varbind.oid.clone(),
            reason: format!("{e}"),
        })?;

        if !oid.starts_with(root) {
            debug!("SNMP: walk {}: done (got oid past table: {})", root, oid);
            return Ok(false);
        }
        if oid <= *last {
            return Err(SessionError::OidsNotIncreasing {
                previous: last.to_string(),
                current: varbind.oid,
            });
        }

        *last = oid;
        out.push(varbind);
    }

    Ok(true)
}

/// Opens real SNMP sessions with a fixed community and connection settings
pub struct SnmpConnector {
    community: Vec<u8>,
    settings: ConnectionSettings,
}

impl SnmpConnector {
    pub fn new(community: &str, settings: ConnectionSettings) -> Self {
        Self {
            community: community.as_bytes().to_vec(),
            settings,
        }
    }
}

#[async_trait]
impl Connector for SnmpConnector {
    type Session = SnmpClient;

    async fn connect(&self, target: &str) -> Result<SnmpClient, SessionError> {
        SnmpClient::connect(target, &self.community, &self.settings).await
    }
}

/// Builds `host:port`, bracketing IPv6 literals and keeping explicit ports.
/// A scoped IPv6 literal needs a numeric zone (`fe80::1%2`).
fn socket_address(target: &str, port: u16) -> Result<String, SessionError> {
    let target = target.trim();
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port).to_string());
    }
    if target.parse::<SocketAddr>().is_ok() {
        return Ok(target.to_string());
    }

    let invalid = |reason: String| SessionError::InvalidTarget {
        target: target.to_string(),
        reason,
    };

    if let Some((addr, zone)) = target.split_once('%') {
        let ip = addr
            .parse::<Ipv6Addr>()
            .map_err(|e| invalid(format!("bad IPv6 address: {e}")))?;
        let scope_id = zone
            .parse::<u32>()
            .map_err(|_| invalid(format!("zone '{zone}' must be a numeric interface index")))?;
        return Ok(SocketAddrV6::new(ip, port, 0, scope_id).to_string());
    }
    if target.matches(':').count() > 1 {
        return Err(invalid("not a valid IPv6 address".to_string()));
    }

    match target.rsplit_once(':') {
        Some((_, p)) if p.parse::<u16>().is_ok() => Ok(target.to_string()),
        _ => Ok(format!("{target}:{port}")),
    }
}
