//! # API Facade
//!
//! [`JobcatApi`] is the whole contract a presentation layer may depend on:
//! reads, admin mutations, sync and the access gate. It dispatches to the
//! [`Catalog`] and [`AccessGate`] and wraps mutation outcomes in a
//! [`CmdResult`] carrying user-facing messages.
//!
//! ## What the API adds on top of the catalog
//!
//! - Admin mutations require an authenticated session; without one they fail
//!   with [`JobcatError::Unauthorized`] before touching anything.
//! - External jobs cannot be edited: they are replaced wholesale on every sync.
//! - [`JobcatApi::refresh`] turns a provider failure into a warning and still
//!   returns the current filtered view.
//!
//! Not-found outcomes are reported as warning messages, never as errors.
//!
//! ## Generic Over KvStore
//!
//! - Production: `JobcatApi<FileStore>`
//! - Testing: `JobcatApi<InMemoryStore>`

use crate::auth::AccessGate;
use crate::catalog::{Catalog, CatalogStats};
use crate::config::JobcatConfig;
use crate::error::{JobcatError, Result};
use crate::model::{Job, JobFields, JobPatch};
use crate::normalize::RawJob;
use crate::provider::JobProvider;
use crate::query::{JobFilter, SearchFields};
use crate::store::KvStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_jobs: Vec<Job>,
    pub listed_jobs: Vec<Job>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_jobs(mut self, jobs: Vec<Job>) -> Self {
        self.affected_jobs = jobs;
        self
    }

    pub fn with_listed_jobs(mut self, jobs: Vec<Job>) -> Self {
        self.listed_jobs = jobs;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

pub struct JobcatApi<S: KvStore> {
    catalog: Catalog<S>,
    gate: AccessGate,
}

impl<S: KvStore> JobcatApi<S> {
    /// Fails with [`JobcatError::Config`] when the configured storage keys
    /// would overwrite each other or the config file.
    pub fn new(store: S, config: &JobcatConfig) -> Result<Self> {
        config.validate_keys()?;
        Ok(Self {
            catalog: Catalog::load(store, config.jobs_key.clone()),
            gate: AccessGate::new(config.admin_passcode.clone(), config.session_key.clone()),
        })
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    // --- Reads ---

    pub fn get_all(&self) -> Vec<Job> {
        self.catalog.get_all()
    }

    pub fn get_filtered_jobs(&self, query: &str, filter: &JobFilter) -> Vec<Job> {
        self.catalog.get_filtered_jobs(query, filter)
    }

    pub fn search(&self, query: &str, filter: &JobFilter, fields: SearchFields) -> Vec<Job> {
        self.catalog.filter(query, filter, fields)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Job> {
        self.catalog.get_by_id(id)
    }

    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    // --- Admin mutations ---

    pub fn add(&mut self, fields: JobFields) -> Result<CmdResult> {
        self.require_session()?;
        if fields.title.trim().is_empty() {
            return Err(JobcatError::Api("Title cannot be empty".into()));
        }
        if fields.company.trim().is_empty() {
            return Err(JobcatError::Api("Company cannot be empty".into()));
        }

        let job = self.catalog.add(fields);
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Job added ({}): {}",
                job.id, job.title
            )))
            .with_affected_jobs(vec![job]))
    }

    pub fn update(&mut self, id: &str, patch: JobPatch) -> Result<CmdResult> {
        self.require_session()?;

        match self.catalog.get_by_id(id) {
            None => return Ok(not_found(id)),
            Some(job) if job.is_external() => {
                return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
                    "Job {} comes from the provider feed and is replaced on every sync; not updated",
                    id
                ))));
            }
            Some(_) => {}
        }
        if patch.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to update")));
        }

        match self.catalog.update(id, patch) {
            Some(job) => Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!(
                    "Job updated ({}): {}",
                    job.id, job.title
                )))
                .with_affected_jobs(vec![job])),
            None => Ok(not_found(id)),
        }
    }

    pub fn delete_one(&mut self, id: &str) -> Result<CmdResult> {
        self.require_session()?;

        let Some(job) = self.catalog.get_by_id(id) else {
            return Ok(not_found(id));
        };
        if !self.catalog.delete_one(id) {
            return Ok(not_found(id));
        }
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Job deleted ({}): {}",
                job.id, job.title
            )))
            .with_affected_jobs(vec![job]))
    }

    pub fn delete_many<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        self.require_session()?;

        let doomed: Vec<Job> = self
            .catalog
            .get_all()
            .into_iter()
            .filter(|j| ids.iter().any(|id| id.as_ref() == j.id))
            .collect();
        let removed = self.catalog.delete_many(ids);

        let mut result = CmdResult::default().with_affected_jobs(doomed);
        let summary = format!("{} job(s) deleted", removed);
        result.add_message(if removed > 0 {
            CmdMessage::success(summary)
        } else {
            CmdMessage::warning(summary)
        });
        for id in ids {
            if !result.affected_jobs.iter().any(|j| j.id == id.as_ref()) {
                result.add_message(CmdMessage::warning(format!(
                    "No job with id {}",
                    id.as_ref()
                )));
            }
        }
        Ok(result)
    }

    pub fn delete_all(&mut self) -> Result<CmdResult> {
        self.require_session()?;
        let removed = self.catalog.delete_all();
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Catalog cleared: {} job(s) deleted",
            removed
        ))))
    }

    // --- Sync ---

    pub fn sync_from_external(&mut self, payloads: &[RawJob]) -> CmdResult {
        let count = self.catalog.sync_from_external(payloads);
        CmdResult::default().with_message(CmdMessage::success(format!(
            "Synced {} external job(s)",
            count
        )))
    }

    /// Sync from `provider`, then return the filtered view searched over
    /// `fields`. If the fetch fails the view reflects the unchanged catalog
    /// and carries a warning.
    pub fn refresh<P: JobProvider + ?Sized>(
        &mut self,
        provider: &P,
        query: &str,
        filter: &JobFilter,
        fields: SearchFields,
    ) -> CmdResult {
        let message = match self.catalog.sync_from_provider(provider) {
            Ok(count) => CmdMessage::success(format!("Synced {} external job(s)", count)),
            Err(e) => CmdMessage::warning(format!(
                "Could not fetch external jobs, showing saved catalog: {}",
                e
            )),
        };
        CmdResult::default()
            .with_listed_jobs(self.catalog.filter(query, filter, fields))
            .with_message(message)
    }

    // --- Access gate ---

    pub fn authenticate(&self, candidate: &str) -> bool {
        self.gate.authenticate(self.catalog.store(), candidate)
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated(self.catalog.store())
    }

    pub fn logout(&self) {
        self.gate.logout(self.catalog.store())
    }

    fn require_session(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(JobcatError::Unauthorized)
        }
    }
}

fn not_found(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning(format!("No job with id {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    struct DownProvider;

    impl JobProvider for DownProvider {
        fn fetch_external_jobs(&self) -> Result<Vec<RawJob>> {
            Err(JobcatError::Provider("timeout".into()))
        }
    }

    fn api() -> JobcatApi<InMemoryStore> {
        let config = JobcatConfig {
            admin_passcode: "pw".into(),
            ..Default::default()
        };
        JobcatApi::new(InMemoryStore::new(), &config).unwrap()
    }

    fn logged_in() -> JobcatApi<InMemoryStore> {
        let api = api();
        assert!(api.authenticate("pw"));
        api
    }

    #[test]
    fn mutations_require_a_session() {
        let mut api = api();
        let err = api.add(JobFields::new("Dev", "Acme")).unwrap_err();
        assert!(matches!(err, JobcatError::Unauthorized));
        assert!(matches!(api.delete_all(), Err(JobcatError::Unauthorized)));
        assert!(api.get_all().is_empty());

        assert!(!api.authenticate("nope"));
        assert!(api.authenticate("pw"));
        assert!(api.add(JobFields::new("Dev", "Acme")).is_ok());

        api.logout();
        assert!(matches!(
            api.delete_one("anything"),
            Err(JobcatError::Unauthorized)
        ));
    }

    #[test]
    fn add_validates_required_fields() {
        let mut api = logged_in();
        assert!(matches!(
            api.add(JobFields::new("  ", "Acme")),
            Err(JobcatError::Api(_))
        ));
        assert!(matches!(
            api.add(JobFields::new("Dev", "")),
            Err(JobcatError::Api(_))
        ));
    }

    #[test]
    fn update_reports_missing_and_external_jobs() {
        let mut api = logged_in();
        api.sync_from_external(&[json!({"id": "feed-1", "title": "From feed"})]);

        let patch = JobPatch {
            title: Some("Edited".into()),
            ..Default::default()
        };
        let missing = api.update("ghost", patch.clone()).unwrap();
        assert!(missing.affected_jobs.is_empty());
        assert!(missing.has_warnings());

        let external = api.update("feed-1", patch.clone()).unwrap();
        assert!(external.has_warnings());
        assert_eq!(api.get_by_id("feed-1").unwrap().title, "From feed");

        let local = api.add(JobFields::new("Dev", "Acme")).unwrap().affected_jobs[0].clone();
        let updated = api.update(&local.id, patch).unwrap();
        assert_eq!(updated.affected_jobs[0].title, "Edited");
        assert!(!updated.has_warnings());
    }

    #[test]
    fn delete_many_reports_unknown_ids() {
        let mut api = logged_in();
        let a = api.add(JobFields::new("A", "Acme")).unwrap().affected_jobs[0].clone();
        api.add(JobFields::new("B", "Acme")).unwrap();

        let result = api.delete_many(&[a.id.as_str(), "ghost"]).unwrap();
        assert_eq!(result.affected_jobs.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("ghost")));
        assert_eq!(api.get_all().len(), 1);
    }

    #[test]
    fn refresh_falls_back_to_current_view() {
        let mut api = logged_in();
        api.add(JobFields::new("Rust Engineer", "Acme")).unwrap();
        api.sync_from_external(&[json!({"id": "feed-1", "title": "Go Engineer"})]);
        let before = api.get_all();

        let result = api.refresh(
            &DownProvider,
            "engineer",
            &JobFilter::default(),
            SearchFields::Full,
        );
        assert!(result.has_warnings());
        assert_eq!(result.listed_jobs, before);
        assert_eq!(api.get_all(), before);
    }

    #[test]
    fn refresh_honours_search_fields() {
        let mut api = logged_in();
        let mut fields = JobFields::new("Dev", "Acme");
        fields.location = "Berlin".into();
        api.add(fields).unwrap();

        let full = api.refresh(&DownProvider, "berlin", &JobFilter::default(), SearchFields::Full);
        assert_eq!(full.listed_jobs.len(), 1);

        let narrow = api.refresh(
            &DownProvider,
            "berlin",
            &JobFilter::default(),
            SearchFields::Narrow,
        );
        assert!(narrow.listed_jobs.is_empty());
    }

    #[test]
    fn new_rejects_colliding_storage_keys() {
        let shared = JobcatConfig {
            jobs_key: "state".into(),
            session_key: "state".into(),
            ..Default::default()
        };
        assert!(matches!(
            JobcatApi::new(InMemoryStore::new(), &shared),
            Err(JobcatError::Config(_))
        ));

        let shadowing = JobcatConfig {
            jobs_key: "config".into(),
            ..Default::default()
        };
        assert!(matches!(
            JobcatApi::new(InMemoryStore::new(), &shadowing),
            Err(JobcatError::Config(_))
        ));
    }
}
