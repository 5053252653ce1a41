use std::path::Path;

use anyhow::Result;

pub mod profile;
pub mod settings;

pub use profile::Profile;
pub use settings::{
    ConnectionSettings, DEFAULT_COMMUNITY, DEFAULT_CONCURRENCY, DEFAULT_TARGET, SnmpVersion,
};

use crate::error::PollError;

/// Everything one run needs: devices, credentials and the table profile
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub targets: Vec<String>,
    pub community: String,
    pub profile: Profile,
    /// Upper bound on devices polled at the same time
    pub concurrency: usize,
}

impl AppConfig {
    /// Picks the profile: a YAML file if given, else ifXTable with `high_capacity`, else ifTable
    pub fn load_profile(path: Option<&Path>, high_capacity: bool) -> Result<Profile> {
        match path {
            Some(path) => Profile::load(path),
            None if high_capacity => Ok(Profile::if_x_table()),
            None => Ok(Profile::if_table()),
        }
    }

    pub fn new(
        targets: Vec<String>,
        community: String,
        profile: Profile,
        concurrency: usize,
    ) -> Result<Self, PollError> {
        let targets: Vec<String> = targets.into_iter().map(|t| t.trim().to_string()).collect();
        if targets.is_empty() || targets.iter().any(|t| t.is_empty()) {
            return Err(PollError::MissingTarget);
        }

        Ok(Self {
            targets,
            community,
            profile,
            concurrency: concurrency.max(1),
        })
    }

    pub fn connection(&self) -> &ConnectionSettings {
        &self.profile.connection
    }
}
