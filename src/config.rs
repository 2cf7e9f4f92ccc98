use crate::labels::DEFAULT_LABEL_PREFIX;
use crate::models::Selector;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Config file used when `BOSUN_CONFIG` is unset. Optional: missing means defaults.
pub const DEFAULT_CONFIG_PATH: &str = "bosun.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerConfig {
    /// Unix socket path. When unset, DOCKER_HOST and the platform default are used.
    #[serde(default)]
    pub socket: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub include_stopped: bool,
    /// Overall limit for one snapshot call; unset means no limit.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_prefixes() -> Vec<String> {
    vec![DEFAULT_LABEL_PREFIX.to_string()]
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            prefixes: default_prefixes(),
            include_stopped: false,
            deadline_secs: None,
        }
    }
}

impl SnapshotConfig {
    /// Selector for one call; `include_stopped` ORs with the configured default.
    pub fn selector(&self, include_stopped: bool) -> Selector {
        Selector::new(self.prefixes.iter().cloned())
            .include_stopped(include_stopped || self.include_stopped)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Loads `BOSUN_CONFIG` if set (must exist), else `bosun.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("BOSUN_CONFIG") {
            Ok(path) => Self::load_from(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from(DEFAULT_CONFIG_PATH)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.docker.timeout_secs > 0,
            "docker.timeout_secs must be > 0, got {}",
            self.docker.timeout_secs
        );
        if let Some(socket) = &self.docker.socket {
            anyhow::ensure!(!socket.is_empty(), "docker.socket must be non-empty when set");
        }
        anyhow::ensure!(
            !self.snapshot.prefixes.is_empty(),
            "snapshot.prefixes must list at least one prefix"
        );
        anyhow::ensure!(
            self.snapshot.prefixes.iter().all(|p| !p.is_empty()),
            "snapshot.prefixes must not contain empty strings"
        );
        if let Some(secs) = self.snapshot.deadline_secs {
            anyhow::ensure!(secs > 0, "snapshot.deadline_secs must be > 0, got {}", secs);
        }
        Ok(())
    }
}
