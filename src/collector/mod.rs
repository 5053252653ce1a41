use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, info};

pub mod decoder;
pub mod table;
pub mod types;

pub use decoder::RowDecoder;
pub use table::TableAssembler;
pub use types::{DeviceReport, Field, InterfaceRecord, SkippedRow};

use crate::config::{AppConfig, Profile};
use crate::error::PollError;
use crate::snmp::Connector;

/// Polls devices for their interface counters
pub struct SnmpCollector;

impl SnmpCollector {
    /// Connect, walk the profile columns, decode the rows.
    /// The session is dropped when this returns, whatever the outcome.
    pub async fn poll_device<C>(
        connector: &C,
        target: &str,
        profile: &Profile,
    ) -> Result<DeviceReport, PollError>
    where
        C: Connector + ?Sized,
    {
        let mut session = connector
            .connect(target)
            .await
            .map_err(|source| PollError::Connection {
                target: target.to_string(),
                source,
            })?;
        debug!("Connected to {}", target);

        let table = TableAssembler::assemble(&mut session, profile.columns.iter()).await?;
        let (interfaces, skipped) = RowDecoder::decode_table(&table);

        info!(
            "Polled {}: {} interfaces, {} skipped",
            target,
            interfaces.len(),
            skipped.len()
        );

        Ok(DeviceReport {
            target: target.to_string(),
            profile: profile.name.clone(),
            columns: profile.columns.clone(),
            polled_at: chrono::Utc::now(),
            interfaces,
            skipped,
        })
    }

    /// Polls every configured target, at most `config.concurrency` at a time.
    /// Results come back in target order; one failed device does not affect the others.
    pub async fn poll_all<C>(
        connector: Arc<C>,
        config: &AppConfig,
    ) -> Vec<(String, Result<DeviceReport, PollError>)>
    where
        C: Connector + 'static,
    {
        let permits = Arc::new(Semaphore::new(config.concurrency));
        let profile = Arc::new(config.profile.clone());

        let handles: Vec<_> = config
            .targets
            .iter()
            .map(|target| {
                let connector = Arc::clone(&connector);
                let permits = Arc::clone(&permits);
                let profile = Arc::clone(&profile);
                let target = target.clone();

                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.map_err(|e| {
                        PollError::Aborted(format!("concurrency limiter closed: {e}"))
                    })?;
                    Self::poll_device(connector.as_ref(), &target, &profile).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (target, handle) in config.targets.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!("Poll task for {} failed: {}", target, e);
                    Err(PollError::Aborted(e.to_string()))
                }
            };
            results.push((target.clone(), result));
        }

        results
    }
}
