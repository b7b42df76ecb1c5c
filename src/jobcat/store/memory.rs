use super::KvStore;
use crate::error::{JobcatError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    simulate_write_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to plant raw bytes (e.g. corrupted data) under a key.
    pub fn put_raw(&self, key: &str, bytes: &[u8]) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KvStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(JobcatError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::catalog::{Catalog, DEFAULT_JOBS_KEY};
    use crate::model::JobFields;
    use serde_json::{json, Value};

    pub struct CatalogFixture {
        pub catalog: Catalog<InMemoryStore>,
    }

    impl Default for CatalogFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CatalogFixture {
        pub fn new() -> Self {
            Self {
                catalog: Catalog::load(InMemoryStore::new(), DEFAULT_JOBS_KEY),
            }
        }

        pub fn with_local_jobs(mut self, count: usize) -> Self {
            for i in 0..count {
                let mut fields = JobFields::new(format!("Local Job {}", i + 1), "Acme");
                fields.location = "Berlin".to_string();
                fields.skills = vec!["Rust".to_string()];
                self.catalog.add(fields);
            }
            self
        }

        pub fn with_local_job(mut self, fields: JobFields) -> Self {
            self.catalog.add(fields);
            self
        }

        pub fn with_external_jobs(mut self, count: usize) -> Self {
            let payloads: Vec<Value> = (0..count)
                .map(|i| {
                    json!({
                        "id": format!("ext-{}", i + 1),
                        "title": format!("External Job {}", i + 1),
                        "company": format!("Provider Co {}", i + 1),
                        "location": "Remote",
                        "remote": true,
                    })
                })
                .collect();
            self.catalog.sync_from_external(&payloads);
            self
        }

        pub fn with_payloads(mut self, payloads: &[Value]) -> Self {
            self.catalog.sync_from_external(payloads);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_write_error_leaves_entries_untouched() {
        let store = InMemoryStore::new();
        store.write("jobs", b"[]").unwrap();
        store.set_simulate_write_error(true);
        assert!(store.write("jobs", b"[1]").is_err());
        assert_eq!(store.read("jobs").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.remove("nothing").is_ok());
        assert!(!store.contains("nothing"));
    }
}
