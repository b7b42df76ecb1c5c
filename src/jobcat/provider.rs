//! External job sources.
//!
//! The catalog treats a provider as an opaque supplier of raw payloads; all
//! shape handling happens in [`crate::normalize`].

use crate::error::{JobcatError, Result};
use crate::normalize::RawJob;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub trait JobProvider {
    fn fetch_external_jobs(&self) -> Result<Vec<RawJob>>;
}

/// Reads payloads from a JSON file holding either an array of jobs or an
/// object with the array under `jobs`.
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobProvider for JsonFileProvider {
    fn fetch_external_jobs(&self) -> Result<Vec<RawJob>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            JobcatError::Provider(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            JobcatError::Provider(format!("invalid JSON in {}: {}", self.path.display(), e))
        })?;

        match value {
            Value::Array(items) => Ok(items),
            Value::Object(mut obj) => match obj.remove("jobs") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(JobcatError::Provider(format!(
                    "{} has no \"jobs\" array",
                    self.path.display()
                ))),
            },
            _ => Err(JobcatError::Provider(format!(
                "{} does not contain a list of jobs",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_and_wrapped_feeds() {
        let dir = tempfile::tempdir().unwrap();

        let bare = dir.path().join("bare.json");
        fs::write(&bare, r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(JsonFileProvider::new(&bare).fetch_external_jobs().unwrap().len(), 2);

        let wrapped = dir.path().join("wrapped.json");
        fs::write(&wrapped, r#"{"jobs": [{"id": "a"}]}"#).unwrap();
        assert_eq!(JsonFileProvider::new(&wrapped).fetch_external_jobs().unwrap().len(), 1);
    }

    #[test]
    fn missing_or_bad_feeds_are_provider_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = JsonFileProvider::new(dir.path().join("nope.json"));
        assert!(matches!(missing.fetch_external_jobs(), Err(JobcatError::Provider(_))));

        let scalar = dir.path().join("scalar.json");
        fs::write(&scalar, "42").unwrap();
        assert!(matches!(
            JsonFileProvider::new(&scalar).fetch_external_jobs(),
            Err(JobcatError::Provider(_))
        ));

        let garbled = dir.path().join("garbled.json");
        fs::write(&garbled, "[{").unwrap();
        assert!(JsonFileProvider::new(&garbled).fetch_external_jobs().is_err());
    }
}
