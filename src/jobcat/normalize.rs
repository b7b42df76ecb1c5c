//! # Record Normalizer
//!
//! Providers disagree on field names and shapes. Normalization turns each raw
//! payload into a canonical [`Job`] with provenance `External`.
//!
//! Each canonical field has an explicit priority list of source keys: the first
//! key holding a usable value wins, otherwise a fixed default applies. The
//! function is total; a payload that is not a JSON object is skipped and logged,
//! nothing here returns an error.

use crate::model::{clean_list, Job, Provenance};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A provider payload as received, before normalization.
pub type RawJob = Value;

const ID_KEYS: &[&str] = &["id", "job_id", "slug"];
const TITLE_KEYS: &[&str] = &["title", "position", "job_title"];
const COMPANY_KEYS: &[&str] = &["company", "company_name", "organization"];
const LOCATION_KEYS: &[&str] = &["location", "candidate_required_location"];
const TYPE_KEYS: &[&str] = &["type", "job_type"];
const EXPERIENCE_KEYS: &[&str] = &["experience", "experience_level"];
const SALARY_KEYS: &[&str] = &["salary", "salary_range"];
const DESCRIPTION_KEYS: &[&str] = &["description", "summary"];
const SKILLS_KEYS: &[&str] = &["skills", "tags"];
const REQUIREMENTS_KEYS: &[&str] = &["requirements", "qualifications"];
const REMOTE_KEYS: &[&str] = &["remote", "is_remote"];
const LOGO_KEYS: &[&str] = &["logo", "company_logo"];
const APPLY_URL_KEYS: &[&str] = &["apply_url", "url"];
const CREATED_KEYS: &[&str] = &["created_at", "publication_date", "posted_at"];

pub const DEFAULT_TITLE: &str = "Untitled position";
pub const DEFAULT_COMPANY: &str = "Unknown company";
pub const DEFAULT_LOCATION: &str = "Location not specified";
pub const DEFAULT_JOB_TYPE: &str = "full-time";
pub const DEFAULT_EXPERIENCE: &str = "Not specified";
pub const DEFAULT_SALARY: &str = "Competitive";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_LOGO: &str = "/placeholder.svg";
pub const DEFAULT_APPLY_URL: &str = "#";
pub const RECENTLY: &str = "Recently";

const DAY_MS: i64 = 86_400_000;

/// Normalize a whole provider batch.
///
/// Ids are unique within the returned batch: payloads without an id get a
/// synthesized one, and a payload repeating an id already seen is dropped.
pub fn normalize_batch(payloads: &[RawJob], now: DateTime<Utc>) -> Vec<Job> {
    let provided: HashSet<String> = payloads
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| first_text(obj, ID_KEYS))
        .collect();

    let mut ids = IdSynthesizer::new(now, provided);
    let mut seen: HashSet<String> = HashSet::new();
    let mut jobs = Vec::with_capacity(payloads.len());

    for (position, payload) in payloads.iter().enumerate() {
        let Some(obj) = payload.as_object() else {
            warn!(position, "Skipping job payload that is not a JSON object");
            continue;
        };

        let id = first_text(obj, ID_KEYS).unwrap_or_else(|| ids.next_id());
        if !seen.insert(id.clone()) {
            warn!(%id, position, "Dropping job payload with duplicate id");
            continue;
        }
        jobs.push(normalize_object(obj, id, now));
    }

    debug!(
        received = payloads.len(),
        normalized = jobs.len(),
        "Normalized provider batch"
    );
    jobs
}

fn normalize_object(obj: &Map<String, Value>, id: String, now: DateTime<Utc>) -> Job {
    let skills = first_list(obj, SKILLS_KEYS);
    let requirements = first_list(obj, REQUIREMENTS_KEYS);
    let (skills, requirements) = match (skills, requirements) {
        (Some(s), Some(r)) => (s, r),
        (Some(s), None) => (s.clone(), s),
        (None, Some(r)) => (r.clone(), r),
        (None, None) => (Vec::new(), Vec::new()),
    };

    let source_created = CREATED_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null());
    let created = source_created.and_then(parse_timestamp);

    let posted = match created {
        Some(ts) => bucket_age(ts, now),
        None => RECENTLY.to_string(),
    };
    let created_at = created.unwrap_or(now);

    Job {
        id,
        title: text_or(obj, TITLE_KEYS, DEFAULT_TITLE),
        company: text_or(obj, COMPANY_KEYS, DEFAULT_COMPANY),
        location: text_or(obj, LOCATION_KEYS, DEFAULT_LOCATION),
        job_type: text_or(obj, TYPE_KEYS, DEFAULT_JOB_TYPE),
        experience: text_or(obj, EXPERIENCE_KEYS, DEFAULT_EXPERIENCE),
        salary: text_or(obj, SALARY_KEYS, DEFAULT_SALARY),
        description: text_or(obj, DESCRIPTION_KEYS, DEFAULT_DESCRIPTION),
        requirements,
        skills,
        posted,
        apply_url: text_or(obj, APPLY_URL_KEYS, DEFAULT_APPLY_URL),
        logo: text_or(obj, LOGO_KEYS, DEFAULT_LOGO),
        remote: first_flag(obj, REMOTE_KEYS).unwrap_or(false),
        created_at,
        updated_at: now.max(created_at),
        provenance: Provenance::External,
    }
}

/// Posting-age label for a textual timestamp, relative to `now`.
///
/// Unparseable input yields "Recently".
pub fn age_label(ts: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp_str(ts) {
        Some(parsed) => bucket_age(parsed, now),
        None => RECENTLY.to_string(),
    }
}

/// Buckets `|now - ts|`, rounded up to whole days.
pub fn bucket_age(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = now.signed_duration_since(ts).num_milliseconds().abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    if days <= 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        plural((days + 6) / 7, "week")
    } else {
        plural((days + 29) / 30, "month")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn text_or(obj: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    first_text(obj, keys).unwrap_or_else(|| default.to_string())
}

fn first_list(obj: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|key| {
        let items = match obj.get(*key)? {
            Value::Array(values) => clean_list(values.iter().filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })),
            Value::String(s) => clean_list(s.split(',')),
            _ => return None,
        };
        (!items.is_empty()).then_some(items)
    })
}

fn first_flag(obj: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            Some(matches!(s.as_str(), "true" | "yes" | "1" | "remote"))
        }
        _ => None,
    })
}

/// Hands out `ext-<seed>-<counter>` ids that avoid every id the batch
/// already provides.
struct IdSynthesizer {
    seed: i64,
    counter: u64,
    taken: HashSet<String>,
}

impl IdSynthesizer {
    fn new(now: DateTime<Utc>, taken: HashSet<String>) -> Self {
        Self {
            seed: now.timestamp_millis(),
            counter: 0,
            taken,
        }
    }

    fn next_id(&mut self) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("ext-{}-{}", self.seed, self.counter);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
