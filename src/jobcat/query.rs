//! # Query Engine
//!
//! Free-text search plus structured predicates, combined with logical AND.
//! Matching never reorders: results come back in collection order.

use crate::model::Job;

/// Which fields the free-text query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFields {
    /// title, company, location, description, skills
    #[default]
    Full,
    /// title, company, description, skills
    Narrow,
}

/// Structured predicates. `None`, blank strings and an empty skill list
/// all mean "no filtering on this axis".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub remote: Option<bool>,
    /// Passes if any of these is a substring of any of the job's skills.
    pub skills: Vec<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        active(&self.location).is_none()
            && active(&self.job_type).is_none()
            && active(&self.experience).is_none()
            && self.remote.is_none()
            && self.skills.iter().all(|s| s.trim().is_empty())
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(location) = active(&self.location) {
            if !contains_ci(&job.location, location) {
                return false;
            }
        }
        if let Some(job_type) = active(&self.job_type) {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(experience) = active(&self.experience) {
            if !contains_ci(&job.experience, experience) {
                return false;
            }
        }
        if let Some(remote) = self.remote {
            if job.remote != remote {
                return false;
            }
        }

        let wanted: Vec<String> = self
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !wanted.is_empty() {
            let has_any = job.skills.iter().any(|skill| {
                let skill = skill.to_lowercase();
                wanted.iter().any(|w| skill.contains(w.as_str()))
            });
            if !has_any {
                return false;
            }
        }

        true
    }
}

/// True when `query` (case-insensitive) appears in one of the searched fields.
/// A blank query matches every job.
pub fn matches_query(job: &Job, query: &str, fields: SearchFields) -> bool {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let hit = |text: &str| text.to_lowercase().contains(&term);

    hit(&job.title)
        || hit(&job.company)
        || (fields == SearchFields::Full && hit(&job.location))
        || hit(&job.description)
        || job.skills.iter().any(|s| hit(s))
}

/// Apply query and predicates to `jobs`, preserving their order.
pub fn filter_jobs<'a, I>(jobs: I, query: &str, filter: &JobFilter, fields: SearchFields) -> Vec<Job>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .filter(|job| matches_query(job, query, fields) && filter.matches(job))
        .cloned()
        .collect()
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
