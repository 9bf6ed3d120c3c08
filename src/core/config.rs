/*!
 * Kernel Configuration
 *
 * Layered configuration: compiled-in defaults, then an optional JSON file,
 * then environment overrides.
 *
 * Environment variables:
 * - DEVOS_TOTAL_MEMORY: total memory pool in bytes
 * - DEVOS_QUOTA: memory granted to each admitted process
 * - DEVOS_STORAGE_PATH: root directory of the local blob store
 * - DEVOS_RELEASE_POLICY: strict | clamp | permissive
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_EVENT_HISTORY, DEFAULT_PROCESS_QUOTA, DEFAULT_STORAGE_ROOT, DEFAULT_TOTAL_MEMORY,
};
use super::types::Size;
use crate::memory::ReleasePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_TOTAL_MEMORY: &str = "DEVOS_TOTAL_MEMORY";
pub const ENV_QUOTA: &str = "DEVOS_QUOTA";
pub const ENV_STORAGE_PATH: &str = "DEVOS_STORAGE_PATH";
pub const ENV_RELEASE_POLICY: &str = "DEVOS_RELEASE_POLICY";
/// Path of the JSON config file read by the `devos` binary
pub const ENV_CONFIG: &str = "DEVOS_CONFIG";

/// Kernel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct KernelConfig {
    /// Fixed memory pool, immutable once the allocator is built
    #[serde(alias = "totalMemory")]
    pub total_memory: Size,
    /// Memory granted to every admitted process
    #[serde(alias = "quotaPerProcess")]
    pub quota_per_process: Size,
    /// Root directory for the local blob store
    #[serde(alias = "blobStoreRoot")]
    pub storage_root: PathBuf,
    /// How unmatched releases are handled
    pub release_policy: ReleasePolicy,
    /// Lifecycle events kept by the collector
    pub event_history: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_TOTAL_MEMORY,
            quota_per_process: DEFAULT_PROCESS_QUOTA,
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            release_policy: ReleasePolicy::default(),
            event_history: DEFAULT_EVENT_HISTORY,
        }
    }
}

impl KernelConfig {
    /// Config with the given pool size and storage root, defaults elsewhere
    pub fn new<P: Into<PathBuf>>(total_memory: Size, storage_root: P) -> Self {
        Self {
            total_memory,
            storage_root: storage_root.into(),
            ..Self::default()
        }
    }

    pub fn with_total_memory(mut self, total: Size) -> Self {
        self.total_memory = total;
        self
    }

    pub fn with_quota(mut self, quota: Size) -> Self {
        self.quota_per_process = quota;
        self
    }

    pub fn with_storage_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.storage_root = root.into();
        self
    }

    pub fn with_release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.release_policy = policy;
        self
    }

    pub fn with_event_history(mut self, capacity: usize) -> Self {
        self.event_history = capacity;
        self
    }

    /// Load configuration: file (if given), then environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;

        info!(
            total_memory = config.total_memory,
            quota = config.quota_per_process,
            storage_root = %config.storage_root.display(),
            release_policy = %config.release_policy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Read config file");
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TOTAL_MEMORY) {
            self.total_memory = parse_size(ENV_TOTAL_MEMORY, &value)?;
        }
        if let Some(value) = lookup(ENV_QUOTA) {
            self.quota_per_process = parse_size(ENV_QUOTA, &value)?;
        }
        if let Some(value) = lookup(ENV_STORAGE_PATH) {
            self.storage_root = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_RELEASE_POLICY) {
            self.release_policy = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_RELEASE_POLICY.to_string(),
                value,
            })?;
        }
        Ok(())
    }

    /// Check the invariants the allocator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_memory == 0 {
            return Err(ConfigError::Invalid(
                "total_memory must be greater than zero".to_string(),
            ));
        }
        if self.quota_per_process == 0 {
            return Err(ConfigError::Invalid(
                "quota_per_process must be greater than zero".to_string(),
            ));
        }
        if self.quota_per_process > self.total_memory {
            return Err(ConfigError::Invalid(format!(
                "quota_per_process ({}) exceeds total_memory ({})",
                self.quota_per_process, self.total_memory
            )));
        }
        if self.event_history == 0 {
            return Err(ConfigError::Invalid(
                "event_history must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_size(var: &str, value: &str) -> Result<Size, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}
