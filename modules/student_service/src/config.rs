//! Configuration for student service

use serde::Deserialize;
use std::time::Duration;

/// Student service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listen address for the HTTP server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Database connection URL (Postgres or SQLite)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Peer service endpoints
    #[serde(default)]
    pub peers: PeersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: default_database_url(),
            peers: PeersConfig::default(),
        }
    }
}

/// Base URLs and timeout for the schedule/violation/achievement peers
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeersConfig {
    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,

    #[serde(default = "default_violation_url")]
    pub violation_url: String,

    #[serde(default = "default_achievement_url")]
    pub achievement_url: String,

    /// Per-call timeout; one slow peer must not stall an aggregation
    #[serde(default = "default_peer_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            schedule_url: default_schedule_url(),
            violation_url: default_violation_url(),
            achievement_url: default_achievement_url(),
            timeout: default_peer_timeout(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3003".to_string()
}

fn default_database_url() -> String {
    "sqlite://target/db/student-service.db?mode=rwc".to_string()
}

fn default_schedule_url() -> String {
    "http://localhost:3010".to_string()
}

fn default_violation_url() -> String {
    "http://localhost:3004".to_string()
}

fn default_achievement_url() -> String {
    "http://localhost:3005".to_string()
}

fn default_peer_timeout() -> Duration {
    Duration::from_secs(5)
}
