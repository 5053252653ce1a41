use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_COMMUNITY, DEFAULT_CONCURRENCY, DEFAULT_TARGET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One log line per interface
    Text,
    /// One JSON document per device on stdout
    Json,
}

/// Poll interface traffic counters over SNMP
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// IP address of the device to query (repeat for several devices)
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub ip: Vec<String>,

    /// SNMP community string
    #[arg(long, env = "SNMP_COMMUNITY", default_value = DEFAULT_COMMUNITY)]
    pub community: String,

    /// YAML profile with column OIDs and connection settings
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Use the 64-bit ifXTable counters (ifName, ifHCInOctets, ifHCOutOctets)
    #[arg(long, conflicts_with = "profile")]
    pub hc: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum number of devices polled at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
