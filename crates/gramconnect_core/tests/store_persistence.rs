use gramconnect_core::{
    ComplaintCategory, ComplaintStatus, FailureKind, LocalStore, MemoryBackend, MemoryReporter,
    NewComplaint, SqliteBackend, StorageBackend, StorageData, CURRENT_VERSION,
    DEFAULT_STORAGE_KEY,
};
use serde_json::{json, Value};
use std::rc::Rc;

fn new_complaint(description: &str) -> NewComplaint {
    NewComplaint {
        category: ComplaintCategory::Electricity,
        description: description.to_string(),
        location: "Ward 9, Pune".to_string(),
        image: None,
        status: ComplaintStatus::Submitted,
    }
}

fn stored_json(backend: &MemoryBackend) -> Value {
    serde_json::from_str(&backend.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap()
}

fn user_complaint(id: &str) -> Value {
    json!({
        "id": id,
        "category": "Water",
        "description": "Handpump near the school has been dry since Monday",
        "location": "Ward 2, Sangli",
        "status": "Submitted",
        "createdAt": "2025-02-03T09:00:00Z",
        "updatedAt": "2025-02-03T09:00:00Z"
    })
}

fn persisted_complaint_ids(backend: &MemoryBackend) -> Vec<String> {
    stored_json(backend)["complaints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn empty_store_seeds_defaults_and_persists_them() {
    let backend = MemoryBackend::new();
    let store = LocalStore::new(&backend);

    let data = store.read();
    assert_eq!(data.complaints.len(), 3);
    assert!(data.reminders.is_empty());
    assert_eq!(data.notices.len(), 1);
    assert_eq!(data.version, 1);
    assert_eq!(data, StorageData::seeded());

    assert_eq!(stored_json(&backend)["version"], 1);
}

#[test]
fn write_then_read_round_trips() {
    let backend = MemoryBackend::new();
    let store = LocalStore::new(&backend);

    let mut data = StorageData::seeded();
    data.complaints.truncate(1);
    data.complaints[0].image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
    data.notices.clear();
    store.write(&data);

    assert_eq!(store.read(), data);
}

#[test]
fn stale_version_is_merged_over_defaults_and_stamped() {
    let backend = MemoryBackend::new();
    let legacy_reminder = json!({
        "id": "reminder-1",
        "festivalId": "pongal-2025",
        "festivalName": "Pongal",
        "festivalDate": "2025-01-14",
        "isActive": true,
        "createdAt": "2025-01-01T08:00:00Z"
    });
    backend.insert_raw(
        DEFAULT_STORAGE_KEY,
        json!({ "version": 0, "reminders": [legacy_reminder] }).to_string(),
    );
    let store = LocalStore::new(&backend);

    let data = store.read();
    assert_eq!(data.version, CURRENT_VERSION);
    assert_eq!(data.complaints, StorageData::seeded().complaints);
    assert_eq!(data.notices, StorageData::seeded().notices);
    assert_eq!(data.reminders.len(), 1);
    assert_eq!(data.reminders[0].festival_id, "pongal-2025");

    let persisted = stored_json(&backend);
    assert_eq!(persisted["version"], CURRENT_VERSION);
    assert_eq!(persisted["complaints"].as_array().unwrap().len(), 3);
}

#[test]
fn missing_version_is_treated_as_stale() {
    let backend = MemoryBackend::new();
    backend.insert_raw(DEFAULT_STORAGE_KEY, r#"{"complaints":[]}"#);
    let store = LocalStore::new(&backend);

    let data = store.read();
    assert!(data.complaints.is_empty());
    assert_eq!(data.notices.len(), 1);
    assert_eq!(data.version, CURRENT_VERSION);
}

#[test]
fn current_blob_missing_a_collection_keeps_user_records() {
    let backend = MemoryBackend::new();
    backend.insert_raw(
        DEFAULT_STORAGE_KEY,
        json!({ "version": 1, "complaints": [user_complaint("user-1")], "reminders": [] })
            .to_string(),
    );
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));

    let data = store.read();
    assert_eq!(data.complaints.len(), 1);
    assert!(data.notices.is_empty());

    let created = store.add_complaint(new_complaint("Meter reading not taken for months"));
    assert_eq!(
        persisted_complaint_ids(&backend),
        vec![created.id, "user-1".to_string()]
    );
    assert!(reporter.failures().is_empty());
}

#[test]
fn legacy_records_missing_new_fields_survive_migration() {
    let backend = MemoryBackend::new();
    let legacy_reminder = json!({
        "id": "reminder-1",
        "festivalId": "pongal-2025",
        "festivalName": "Pongal",
        "festivalDate": "2025-01-14",
        "createdAt": "2025-01-01T08:00:00Z"
    });
    backend.insert_raw(
        DEFAULT_STORAGE_KEY,
        json!({
            "version": 0,
            "complaints": [user_complaint("user-1")],
            "reminders": [legacy_reminder]
        })
        .to_string(),
    );
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));

    let complaints = store.list_complaints();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].id, "user-1");
    assert!(store.has_reminder("pongal-2025"));

    let on = store.toggle_reminder(
        "onam-2025",
        "Onam",
        chrono::NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
    );
    assert!(on);
    assert_eq!(persisted_complaint_ids(&backend), vec!["user-1".to_string()]);
    let persisted = stored_json(&backend);
    assert_eq!(persisted["version"], CURRENT_VERSION);
    assert_eq!(persisted["reminders"][0]["isActive"], true);
    assert_eq!(persisted["reminders"].as_array().unwrap().len(), 2);
    assert!(reporter.failures().is_empty());
}

#[test]
fn unreadable_record_is_reported_and_its_siblings_kept() {
    let backend = MemoryBackend::new();
    let raw = json!({
        "version": 1,
        "complaints": [user_complaint("user-1"), { "id": "user-2", "status": "Lost" }],
        "reminders": [],
        "notices": []
    })
    .to_string();
    backend.insert_raw(DEFAULT_STORAGE_KEY, raw.clone());
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));

    let complaints = store.list_complaints();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].id, "user-1");
    assert_eq!(reporter.kinds(), vec![FailureKind::Parse]);
    assert!(reporter.failures()[0].message.contains("complaints[1]"));
    assert_eq!(backend.raw(DEFAULT_STORAGE_KEY), Some(raw));
}

#[test]
fn corrupt_blob_falls_back_to_defaults_without_overwriting() {
    let backend = MemoryBackend::new();
    backend.insert_raw(DEFAULT_STORAGE_KEY, "{truncated");
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));

    assert_eq!(store.read(), StorageData::seeded());
    assert_eq!(reporter.kinds(), vec![FailureKind::Parse]);
    assert_eq!(backend.raw(DEFAULT_STORAGE_KEY).as_deref(), Some("{truncated"));
}

#[test]
fn unavailable_storage_degrades_to_in_memory_results() {
    let backend = MemoryBackend::unavailable();
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));

    let created = store.add_complaint(new_complaint("Transformer sparking at night"));
    assert!(created.id.starts_with("complaint-"));

    // Nothing was persisted, so the next read sees the seed again.
    assert_eq!(store.list_complaints(), StorageData::seeded().complaints);
    assert_eq!(
        reporter.kinds(),
        vec![FailureKind::Read, FailureKind::Write, FailureKind::Read]
    );
    let failure = &reporter.failures()[0];
    assert_eq!(failure.key, DEFAULT_STORAGE_KEY);
    assert!(failure.message.contains("unavailable"));
}

#[test]
fn quota_exceeded_write_is_reported_and_dropped() {
    let backend = MemoryBackend::new();
    let reporter = Rc::new(MemoryReporter::new());
    let store = LocalStore::new(&backend).with_reporter(Rc::clone(&reporter));
    store.read();
    let seeded_blob = backend.raw(DEFAULT_STORAGE_KEY).unwrap();

    let limited = MemoryBackend::with_quota(seeded_blob.len());
    limited.insert_raw(DEFAULT_STORAGE_KEY, seeded_blob.clone());
    let store = LocalStore::new(&limited).with_reporter(Rc::clone(&reporter));

    store.add_complaint(new_complaint("Street light not working for a week"));
    assert_eq!(reporter.kinds(), vec![FailureKind::Write]);
    assert_eq!(limited.raw(DEFAULT_STORAGE_KEY), Some(seeded_blob));
}

#[test]
fn sqlite_backend_persists_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gramconnect.sqlite3");

    let created = {
        let store = LocalStore::new(SqliteBackend::open(&path).unwrap());
        store.add_complaint(new_complaint("Frequent power cuts every evening"))
    };

    let store = LocalStore::new(SqliteBackend::open(&path).unwrap());
    let complaints = store.list_complaints();
    assert_eq!(complaints.len(), 4);
    assert_eq!(complaints[0], created);

    let raw = store.backend().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains(&created.id));
}
