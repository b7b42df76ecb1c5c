use jobcat::auth::{AccessGate, DEFAULT_SESSION_KEY};
use jobcat::catalog::{Catalog, DEFAULT_JOBS_KEY};
use jobcat::model::{JobFields, JobPatch, Provenance};
use jobcat::store::fs::FileStore;
use jobcat::store::KvStore;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Catalog<FileStore> {
    Catalog::load(FileStore::new(dir.path().to_path_buf()), DEFAULT_JOBS_KEY)
}

#[test]
fn test_file_store_basic_io() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("nested"));
    assert_eq!(store.root(), dir.path().join("nested").as_path());
    assert!(!store.root().exists());

    assert_eq!(store.read("jobs").unwrap(), None);

    store.write("jobs", b"[]").unwrap();
    assert_eq!(store.read("jobs").unwrap(), Some(b"[]".to_vec()));
    assert!(store.root().join("jobs.json").exists());

    store.remove("jobs").unwrap();
    assert_eq!(store.read("jobs").unwrap(), None);
    store.remove("jobs").unwrap();
}

#[test]
fn test_file_store_leaves_no_tmp_files() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    store.write("jobs", b"[1]").unwrap();
    store.write("jobs", b"[2]").unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
    assert_eq!(store.read("jobs").unwrap(), Some(b"[2]".to_vec()));
}

#[test]
fn test_catalog_survives_reload() {
    let dir = TempDir::new().unwrap();

    let (local_id, created_at) = {
        let mut catalog = open(&dir);
        catalog.sync_from_external(&[
            json!({"id": "feed-1", "title": "Feed job"}),
            json!({"id": "feed-2", "title": "Other feed job"}),
        ]);
        let job = catalog.add(JobFields::new("Admin job", "Acme"));
        catalog.update(
            &job.id,
            JobPatch {
                salary: Some("100k".into()),
                ..Default::default()
            },
        );
        (job.id, job.created_at)
    };

    let catalog = open(&dir);
    let all = catalog.get_all();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, local_id);
    assert_eq!(all[0].salary, "100k");
    assert_eq!(all[0].created_at, created_at);
    assert_eq!(all[0].provenance, Provenance::Local);
    assert_eq!(all[1].id, "feed-1");
    assert_eq!(all[2].id, "feed-2");
}

#[test]
fn test_corrupted_jobs_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("jobs.json"), "{ definitely not jobs").unwrap();

    let mut catalog = open(&dir);
    assert!(catalog.is_empty());

    catalog.add(JobFields::new("Fresh start", "Acme"));
    assert_eq!(open(&dir).len(), 1);
}

#[test]
fn test_session_flag_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let gate = AccessGate::new("pw", DEFAULT_SESSION_KEY);

    assert!(gate.authenticate(&FileStore::new(dir.path().to_path_buf()), "pw"));
    assert!(gate.is_authenticated(&FileStore::new(dir.path().to_path_buf())));
    assert_eq!(
        fs::read_to_string(dir.path().join("admin_session.json")).unwrap(),
        "true"
    );

    gate.logout(&FileStore::new(dir.path().to_path_buf()));
    assert!(!gate.is_authenticated(&FileStore::new(dir.path().to_path_buf())));
}
