//! # Catalog Store
//!
//! [`Catalog`] owns the authoritative in-memory job collection and mediates
//! every read and write to the [`KvStore`]. It is constructed once by the
//! application (see [`Catalog::load`]) and handed around by reference.
//!
//! ## Ownership of records
//!
//! - `External` jobs belong to [`Catalog::sync_from_external`], which replaces
//!   the whole external subset in one go. Jobs missing from the new batch are
//!   gone afterwards, even if they existed before.
//! - `Local` jobs belong to the admin CRUD methods. Sync never touches them.
//!
//! ## Ordering
//!
//! Local jobs come first, newest `created_at` first, followed by external jobs
//! in provider order. `add` inserts at the front, and the same order is
//! re-established after loading and after every sync, so it survives reloads.
//!
//! ## Persistence
//!
//! Each mutation serializes the whole collection as one JSON array under the
//! jobs key. A failed write is logged and otherwise ignored: the in-memory
//! collection stays the source of truth for the rest of the process. A failed
//! or garbled read at load time yields an empty catalog.

use crate::error::Result;
use crate::model::{clean_list, Job, JobFields, JobPatch, Provenance};
use crate::normalize::{normalize_batch, RawJob};
use crate::provider::JobProvider;
use crate::query::{filter_jobs, JobFilter, SearchFields};
use crate::store::KvStore;
use chrono::Utc;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_JOBS_KEY: &str = "jobs";

/// Aggregate counts over the current collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub external_count: usize,
    pub local_count: usize,
    pub remote_count: usize,
    pub distinct_organizations: usize,
    pub distinct_locations: usize,
}

pub struct Catalog<S: KvStore> {
    store: S,
    jobs_key: String,
    jobs: Vec<Job>,
}

impl<S: KvStore> Catalog<S> {
    /// Build the catalog from whatever `store` holds under `jobs_key`.
    pub fn load(store: S, jobs_key: impl Into<String>) -> Self {
        let jobs_key = jobs_key.into();
        let jobs = match store.read(&jobs_key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Job>>(&bytes) {
                Ok(jobs) => jobs,
                Err(e) => {
                    warn!(key = %jobs_key, error = %e, "Stored jobs are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %jobs_key, error = %e, "Could not read stored jobs, starting empty");
                Vec::new()
            }
        };

        let mut catalog = Self {
            store,
            jobs_key,
            jobs: dedupe(jobs),
        };
        catalog.jobs.sort_by(canonical_order);
        debug!(count = catalog.jobs.len(), "Catalog loaded");
        catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Snapshot of every job, in catalog order.
    pub fn get_all(&self) -> Vec<Job> {
        self.jobs.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Job> {
        self.jobs.iter().find(|j| j.id == id).cloned()
    }

    /// Create a local job at the front of the catalog.
    pub fn add(&mut self, fields: JobFields) -> Job {
        let now = Utc::now();
        let mut id = Uuid::new_v4().to_string();
        while self.jobs.iter().any(|j| j.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let job = Job {
            id,
            title: fields.title,
            company: fields.company,
            location: fields.location,
            job_type: fields.job_type,
            experience: fields.experience,
            salary: fields.salary,
            description: fields.description,
            requirements: clean_list(fields.requirements),
            skills: clean_list(fields.skills),
            posted: fields.posted,
            apply_url: fields.apply_url,
            logo: fields.logo,
            remote: fields.remote,
            created_at: now,
            updated_at: now,
            provenance: Provenance::Local,
        };

        self.jobs.insert(0, job.clone());
        self.persist();
        job
    }

    /// Merge `patch` into the job with `id`. `None` if there is no such job,
    /// in which case nothing is written.
    pub fn update(&mut self, id: &str, patch: JobPatch) -> Option<Job> {
        let job = self.jobs.iter_mut().find(|j| j.id == id)?;
        patch.apply(job);
        job.updated_at = Utc::now().max(job.updated_at);
        let updated = job.clone();
        self.persist();
        Some(updated)
    }

    pub fn delete_one(&mut self, id: &str) -> bool {
        let Some(pos) = self.jobs.iter().position(|j| j.id == id) else {
            return false;
        };
        self.jobs.remove(pos);
        self.persist();
        true
    }

    /// Remove every job whose id is listed. Unknown ids are skipped.
    pub fn delete_many<I: AsRef<str>>(&mut self, ids: &[I]) -> usize {
        let wanted: HashSet<&str> = ids.iter().map(|i| i.as_ref()).collect();
        let before = self.jobs.len();
        self.jobs.retain(|j| !wanted.contains(j.id.as_str()));
        let removed = before - self.jobs.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Empty the catalog. Always writes, so storage ends up normalized.
    pub fn delete_all(&mut self) -> usize {
        let removed = self.jobs.len();
        self.jobs.clear();
        self.persist();
        removed
    }

    /// Replace the external subset with the normalized `payloads`.
    ///
    /// Returns the number of external jobs now in the catalog.
    pub fn sync_from_external(&mut self, payloads: &[RawJob]) -> usize {
        let normalized = normalize_batch(payloads, Utc::now());

        let mut jobs: Vec<Job> = self.jobs.drain(..).filter(Job::is_local).collect();
        let local_ids: HashSet<String> = jobs.iter().map(|j| j.id.clone()).collect();

        let before = normalized.len();
        jobs.extend(normalized.into_iter().filter(|j| {
            let clash = local_ids.contains(&j.id);
            if clash {
                warn!(id = %j.id, "Dropping external job whose id belongs to a local job");
            }
            !clash
        }));
        jobs.sort_by(canonical_order);
        self.jobs = jobs;

        let external = self.jobs.iter().filter(|j| j.is_external()).count();
        info!(
            received = payloads.len(),
            external,
            dropped = before - external,
            "Synced external jobs"
        );
        self.persist();
        external
    }

    /// Fetch from `provider` and sync. On fetch failure the catalog is left
    /// exactly as it was and the error is returned.
    pub fn sync_from_provider<P: JobProvider + ?Sized>(&mut self, provider: &P) -> Result<usize> {
        let payloads = provider.fetch_external_jobs().inspect_err(|e| {
            warn!(error = %e, "Provider fetch failed, keeping current catalog");
        })?;
        Ok(self.sync_from_external(&payloads))
    }

    pub fn filter(&self, query: &str, filter: &JobFilter, fields: SearchFields) -> Vec<Job> {
        filter_jobs(&self.jobs, query, filter, fields)
    }

    /// Catalog-wide search: the query covers location too.
    pub fn get_filtered_jobs(&self, query: &str, filter: &JobFilter) -> Vec<Job> {
        self.filter(query, filter, SearchFields::Full)
    }

    pub fn stats(&self) -> CatalogStats {
        let external_count = self.jobs.iter().filter(|j| j.is_external()).count();
        let organizations: HashSet<&str> = self.jobs.iter().map(|j| j.company.as_str()).collect();
        let locations: HashSet<&str> = self.jobs.iter().map(|j| j.location.as_str()).collect();

        CatalogStats {
            total: self.jobs.len(),
            external_count,
            local_count: self.jobs.len() - external_count,
            remote_count: self.jobs.iter().filter(|j| j.remote).count(),
            distinct_organizations: organizations.len(),
            distinct_locations: locations.len(),
        }
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec_pretty(&self.jobs) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Could not serialize jobs, catalog kept in memory only");
                return;
            }
        };
        match self.store.write(&self.jobs_key, &bytes) {
            Ok(()) => debug!(count = self.jobs.len(), "Persisted jobs"),
            Err(e) => warn!(
                key = %self.jobs_key,
                error = %e,
                "Could not persist jobs, catalog kept in memory only"
            ),
        }
    }
}

fn canonical_order(a: &Job, b: &Job) -> Ordering {
    match (a.is_local(), b.is_local()) {
        (true, true) => b.created_at.cmp(&a.created_at),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

fn dedupe(jobs: Vec<Job>) -> Vec<Job> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|j| {
            let keep = !j.id.is_empty() && seen.insert(j.id.clone());
            if !keep {
                warn!(id = %j.id, "Ignoring stored job with empty or repeated id");
            }
            keep
        })
        .collect()
}
