use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a job came from. External jobs belong to the sync operation, local
/// jobs to the admin CRUD operations; neither path touches the other's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    External,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    /// Human-readable posting age ("3 days ago").
    pub posted: String,
    pub apply_url: String,
    pub logo: String,
    pub remote: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl Job {
    pub fn is_local(&self) -> bool {
        self.provenance == Provenance::Local
    }

    pub fn is_external(&self) -> bool {
        self.provenance == Provenance::External
    }
}

/// Descriptive fields of a job, as entered through the admin interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub posted: String,
    pub apply_url: String,
    pub logo: String,
    pub remote: bool,
}

impl JobFields {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            job_type: "full-time".to_string(),
            posted: "Just now".to_string(),
            ..Default::default()
        }
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub posted: Option<String>,
    pub apply_url: Option<String>,
    pub logo: Option<String>,
    pub remote: Option<bool>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        *self == JobPatch::default()
    }

    pub(crate) fn apply(self, job: &mut Job) {
        if let Some(v) = self.title {
            job.title = v;
        }
        if let Some(v) = self.company {
            job.company = v;
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.job_type {
            job.job_type = v;
        }
        if let Some(v) = self.experience {
            job.experience = v;
        }
        if let Some(v) = self.salary {
            job.salary = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.requirements {
            job.requirements = clean_list(v);
        }
        if let Some(v) = self.skills {
            job.skills = clean_list(v);
        }
        if let Some(v) = self.posted {
            job.posted = v;
        }
        if let Some(v) = self.apply_url {
            job.apply_url = v;
        }
        if let Some(v) = self.logo {
            job.logo = v;
        }
        if let Some(v) = self.remote {
            job.remote = v;
        }
    }
}

/// Trims entries and drops the empty ones.
pub fn clean_list<I, T>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
