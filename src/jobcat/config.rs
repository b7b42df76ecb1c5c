use crate::auth::DEFAULT_SESSION_KEY;
use crate::catalog::DEFAULT_JOBS_KEY;
use crate::error::{JobcatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
/// File stem taken by `config.json`; no storage key may use it.
const RESERVED_KEY: &str = "config";
const DEFAULT_PASSCODE: &str = "admin";

/// Environment variable that overrides the configured admin passcode.
pub const PASSCODE_ENV: &str = "JOBCAT_PASSCODE";

/// Configuration for jobcat, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobcatConfig {
    /// Shared secret unlocking the admin session
    #[serde(default = "default_passcode")]
    pub admin_passcode: String,

    /// Storage key holding the job collection
    #[serde(default = "default_jobs_key")]
    pub jobs_key: String,

    /// Storage key holding the admin session flag
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Feed used by `sync` when no file is given on the command line
    #[serde(default)]
    pub provider_path: Option<PathBuf>,
}

fn default_passcode() -> String {
    DEFAULT_PASSCODE.to_string()
}

fn default_jobs_key() -> String {
    DEFAULT_JOBS_KEY.to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

impl Default for JobcatConfig {
    fn default() -> Self {
        Self {
            admin_passcode: default_passcode(),
            jobs_key: default_jobs_key(),
            session_key: default_session_key(),
            provider_path: None,
        }
    }
}

impl JobcatConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JobcatError::Io)?;
        let config: JobcatConfig =
            serde_json::from_str(&content).map_err(JobcatError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JobcatError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JobcatError::Serialization)?;
        fs::write(config_path, content).map_err(JobcatError::Io)?;
        Ok(())
    }

    /// Apply `JOBCAT_PASSCODE` if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(passcode) = std::env::var(PASSCODE_ENV) {
            if !passcode.is_empty() {
                self.admin_passcode = passcode;
            }
        }
        self
    }

    /// Read a key by its CLI name.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "admin-passcode" => Ok(self.admin_passcode.clone()),
            "jobs-key" => Ok(self.jobs_key.clone()),
            "session-key" => Ok(self.session_key.clone()),
            "provider-path" => Ok(self
                .provider_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a key by its CLI name. An empty `provider-path` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "provider-path" => {
                self.provider_path = (!value.is_empty()).then(|| PathBuf::from(value));
                return Ok(());
            }
            "admin-passcode" | "jobs-key" | "session-key" if value.is_empty() => {
                return Err(JobcatError::Config(format!("{} cannot be empty", key)));
            }
            _ => {}
        }
        let mut candidate = self.clone();
        match key {
            "admin-passcode" => candidate.admin_passcode = value.to_string(),
            "jobs-key" => candidate.jobs_key = value.to_string(),
            "session-key" => candidate.session_key = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        candidate.validate_keys()?;
        *self = candidate;
        Ok(())
    }

    /// Storage keys must be usable file stems, must not shadow `config.json`
    /// and must not share a slot with each other.
    pub fn validate_keys(&self) -> Result<()> {
        for (name, key) in [("jobs-key", &self.jobs_key), ("session-key", &self.session_key)] {
            if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
                return Err(JobcatError::Config(format!(
                    "{} {:?} is not a valid storage key",
                    name, key
                )));
            }
            if key.eq_ignore_ascii_case(RESERVED_KEY) {
                return Err(JobcatError::Config(format!(
                    "{} cannot be {:?}: that name holds the configuration",
                    name, RESERVED_KEY
                )));
            }
        }
        if self.jobs_key == self.session_key {
            return Err(JobcatError::Config(format!(
                "jobs-key and session-key must differ (both are {:?})",
                self.jobs_key
            )));
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["admin-passcode", "jobs-key", "session-key", "provider-path"]
    }
}

fn unknown_key(key: &str) -> JobcatError {
    JobcatError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        JobcatConfig::keys().join(", ")
    ))
}
