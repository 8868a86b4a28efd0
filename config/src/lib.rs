// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interfaces for parsing harness configuration files
//!
//! The root structure is [`HarnessConfig`].  It is loaded exactly once (by
//! the test context or the bootstrap binary) and handed down by reference;
//! nothing in the harness consults ambient global state.

use camino::Utf8Path;
use camino::Utf8PathBuf;
use dropshot::ConfigLogging;
use serde::{Deserialize, Serialize};
use slog_error_chain::SlogInlineError;
use std::time::Duration;
use stratus_common::api::Name;
use thiserror::Error;

/// Configuration for a run of the harness against one Stratus deployment
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// How to reach and authenticate with the identity service.
    pub identity: IdentityConfig,
    /// Optional per-service endpoint overrides.
    #[serde(default)]
    pub endpoints: EndpointConfig,
    /// Polling intervals and per-resource-class build timeouts.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Which optional services this deployment provides.
    #[serde(default)]
    pub features: FeatureConfig,
    /// Harness-wide logging configuration.
    pub log: ConfigLogging,
}

impl HarnessConfig {
    /// Load a `HarnessConfig` from the given TOML file
    pub fn from_file(path: &Utf8Path) -> Result<HarnessConfig, LoadError> {
        let file_contents = std::fs::read_to_string(path)
            .map_err(|err| LoadError::Io { path: path.into(), err })?;
        let config_parsed: HarnessConfig = toml::from_str(&file_contents)
            .map_err(|err| LoadError::Parse { path: path.into(), err })?;
        Ok(config_parsed)
    }
}

/// Credentials and endpoint for the identity service
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Project that owns every fixture the harness creates.
    pub project: Name,
}

/// Per-service base-URL overrides
///
/// A service without an override here is reached via the catalog returned at
/// login.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub compute: Option<String>,
    pub images: Option<String>,
    pub volumes: Option<String>,
    pub networks: Option<String>,
    pub objects: Option<String>,
    pub telemetry: Option<String>,
    pub messaging: Option<String>,
}

/// Polling interval and build timeouts, all overridable per deployment
///
/// Slow virtualized test beds routinely need larger build timeouts; the
/// poll interval is mostly a tradeoff between test latency and API load.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_instance_build_timeout_secs")]
    pub instance_build_timeout_secs: u64,
    #[serde(default = "default_volume_build_timeout_secs")]
    pub volume_build_timeout_secs: u64,
    #[serde(default = "default_image_build_timeout_secs")]
    pub image_build_timeout_secs: u64,
    #[serde(default = "default_network_build_timeout_secs")]
    pub network_build_timeout_secs: u64,
    #[serde(default = "default_deletion_timeout_secs")]
    pub deletion_timeout_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_instance_build_timeout_secs() -> u64 {
    300
}
fn default_volume_build_timeout_secs() -> u64 {
    120
}
fn default_image_build_timeout_secs() -> u64 {
    180
}
fn default_network_build_timeout_secs() -> u64 {
    60
}
fn default_deletion_timeout_secs() -> u64 {
    120
}

impl Default for TimeoutConfig {
    fn default() -> TimeoutConfig {
        TimeoutConfig {
            poll_interval_ms: default_poll_interval_ms(),
            instance_build_timeout_secs: default_instance_build_timeout_secs(),
            volume_build_timeout_secs: default_volume_build_timeout_secs(),
            image_build_timeout_secs: default_image_build_timeout_secs(),
            network_build_timeout_secs: default_network_build_timeout_secs(),
            deletion_timeout_secs: default_deletion_timeout_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
    pub fn instance_build_timeout(&self) -> Duration {
        Duration::from_secs(self.instance_build_timeout_secs)
    }
    pub fn volume_build_timeout(&self) -> Duration {
        Duration::from_secs(self.volume_build_timeout_secs)
    }
    pub fn image_build_timeout(&self) -> Duration {
        Duration::from_secs(self.image_build_timeout_secs)
    }
    pub fn network_build_timeout(&self) -> Duration {
        Duration::from_secs(self.network_build_timeout_secs)
    }
    pub fn deletion_timeout(&self) -> Duration {
        Duration::from_secs(self.deletion_timeout_secs)
    }
}

/// Feature flags for services a deployment may not provide
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeatureConfig {
    #[serde(default = "default_true")]
    pub telemetry: bool,
    #[serde(default = "default_true")]
    pub messaging: bool,
    #[serde(default = "default_true")]
    pub object_storage: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureConfig {
    fn default() -> FeatureConfig {
        FeatureConfig { telemetry: true, messaging: true, object_storage: true }
    }
}

#[derive(Debug, Error, SlogInlineError)]
pub enum LoadError {
    #[error("error reading \"{path}\": {err}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("error parsing \"{path}\": {err}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        err: toml::de::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    const FULL_CONFIG: &str = r#"
        [identity]
        endpoint = "http://identity.stratus.test:5000"
        username = "qa"
        password = "correct-horse"
        project = "harness"

        [endpoints]
        compute = "http://compute.stratus.test:8774"

        [timeouts]
        poll_interval_ms = 500
        instance_build_timeout_secs = 600

        [features]
        messaging = false

        [log]
        mode = "stderr-terminal"
        level = "info"
    "#;

    const MINIMAL_CONFIG: &str = r#"
        [identity]
        endpoint = "http://[::1]:5000"
        username = "qa"
        password = "hunter2"
        project = "harness"

        [log]
        mode = "stderr-terminal"
        level = "debug"
    "#;

    #[test]
    fn test_full_config() {
        let config: HarnessConfig = toml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.identity.username, "qa");
        assert_eq!(config.identity.project.as_str(), "harness");
        assert_eq!(
            config.endpoints.compute.as_deref(),
            Some("http://compute.stratus.test:8774")
        );
        assert_eq!(config.endpoints.volumes, None);

        // Overridden values take effect; everything else keeps its default.
        assert_eq!(
            config.timeouts.poll_interval(),
            Duration::from_millis(500)
        );
        assert_eq!(
            config.timeouts.instance_build_timeout(),
            Duration::from_secs(600)
        );
        assert_eq!(
            config.timeouts.volume_build_timeout(),
            Duration::from_secs(default_volume_build_timeout_secs())
        );

        assert!(!config.features.messaging);
        assert!(config.features.telemetry);
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: HarnessConfig = toml::from_str(MINIMAL_CONFIG).unwrap();
        assert_eq!(config.endpoints.compute, None);
        assert_eq!(
            config.timeouts.poll_interval(),
            Duration::from_millis(default_poll_interval_ms())
        );
        assert_eq!(
            config.timeouts.deletion_timeout(),
            Duration::from_secs(default_deletion_timeout_secs())
        );
        assert!(config.features.object_storage);
    }

    #[test]
    fn test_config_round_trip() {
        let config: HarnessConfig = toml::from_str(FULL_CONFIG).unwrap();
        let serialized = toml::to_string(&config).unwrap();
        let reparsed: HarnessConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(
            reparsed.identity.endpoint,
            "http://identity.stratus.test:5000"
        );
        assert_eq!(
            reparsed.timeouts.poll_interval_ms,
            config.timeouts.poll_interval_ms
        );
    }

    #[test]
    fn test_missing_file() {
        let path = Utf8Path::new("/nonexistent/stratus-harness.toml");
        match HarnessConfig::from_file(path) {
            Err(LoadError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected LoadError::Io, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_file() {
        let dir = std::env::temp_dir().join("stratus-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("bad.toml");
        std::fs::write(&file, "[identity]\nusername = 3\n").unwrap();
        let path = Utf8PathBuf::try_from(file).unwrap();
        match HarnessConfig::from_file(&path) {
            Err(LoadError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected LoadError::Parse, got {:?}", other),
        }
    }
}
