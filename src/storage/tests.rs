//! Storage Module Tests
//!
//! Validates the document backends, the typed record store and id issuance.
//!
//! ## Test Scopes
//! - **Backends**: `MemoryBackend` and `FileBackend` load/save semantics, missing collections.
//! - **RecordStore**: whole-collection load/save, malformed documents, id lookups.
//! - **CounterStore**: pre-increment ids, independent spaces, fatal on bad documents.

#[cfg(test)]
mod tests {
    use crate::storage::records::{find_by_id, find_by_id_mut, remove_by_id};
    use crate::storage::{
        COLLECTION_COUNTERS, CounterStore, Counters, FileBackend, IdSpace, Identified,
        MemoryBackend, RecordStore, StorageBackend, StorageError,
    };
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    // Test data structure
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: u64,
        label: String,
    }

    impl Identified for TestRecord {
        fn id(&self) -> u64 {
            self.id
        }
    }

    fn record(id: u64, label: &str) -> TestRecord {
        TestRecord {
            id,
            label: label.to_string(),
        }
    }

    // ============================================================
    // BACKEND TESTS
    // ============================================================

    #[tokio::test]
    async fn test_memory_backend_missing_collection() {
        let backend = MemoryBackend::new();

        let result = backend.load("nothing").await;
        assert!(matches!(result, Err(StorageError::MissingCollection(name)) if name == "nothing"));
    }

    #[tokio::test]
    async fn test_memory_backend_save_overwrites() {
        let backend = MemoryBackend::new().with_document("things", "[]");

        backend.save("things", "[1,2]".to_string()).await.unwrap();

        assert_eq!(backend.load("things").await.unwrap(), "[1,2]");
    }

    #[tokio::test]
    async fn test_file_backend_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend
            .save("things", r#"[{"id":1,"label":"a"}]"#.to_string())
            .await
            .unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("things.json")).unwrap();
        assert_eq!(on_disk, r#"[{"id":1,"label":"a"}]"#);
        assert!(
            !dir.path().join(".things.json.tmp").exists(),
            "Staging file should be renamed away"
        );
        assert_eq!(backend.load("things").await.unwrap(), on_disk);
    }

    #[tokio::test]
    async fn test_file_backend_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        let result = backend.load("groups").await;
        assert!(matches!(result, Err(StorageError::MissingCollection(_))));
    }

    // ============================================================
    // RECORD STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_record_store_preserves_order() {
        let backend = Arc::new(MemoryBackend::new().with_document("things", "[]"));
        let store: RecordStore<TestRecord> = RecordStore::new(backend.clone(), "things");

        let records = vec![record(3, "c"), record(1, "a"), record(2, "b")];
        store.save_all(&records).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_record_store_malformed_document() {
        let backend = Arc::new(MemoryBackend::new().with_document("things", "{not json"));
        let store: RecordStore<TestRecord> = RecordStore::new(backend, "things");

        let result = store.load_all().await;
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_record_store_mutation_requires_save() {
        let backend = Arc::new(
            MemoryBackend::new().with_document("things", r#"[{"id":1,"label":"a"}]"#),
        );
        let store: RecordStore<TestRecord> = RecordStore::new(backend, "things");

        let mut loaded = store.load_all().await.unwrap();
        loaded.push(record(2, "b"));

        // Not saved: a fresh load sees the original document.
        assert_eq!(store.load_all().await.unwrap().len(), 1);

        store.save_all(&loaded).await.unwrap();
        assert_eq!(store.load_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_record_store_clones_share_lock() {
        let backend = Arc::new(MemoryBackend::new().with_document("things", "[]"));
        let store: RecordStore<TestRecord> = RecordStore::new(backend, "things");
        let clone = store.clone();

        let _guard = store.lock().await;
        let attempt =
            tokio::time::timeout(std::time::Duration::from_millis(50), clone.lock()).await;
        assert!(attempt.is_err(), "Clone should wait on the same lock");
    }

    #[test]
    fn test_id_matching_is_canonical_decimal() {
        let r = record(7, "x");

        assert!(r.id_matches("7"));
        assert!(!r.id_matches("07"));
        assert!(!r.id_matches(" 7"));
        assert!(!r.id_matches("seven"));
    }

    #[test]
    fn test_find_and_remove_by_id() {
        let mut records = vec![record(1, "a"), record(2, "b"), record(3, "c")];

        assert_eq!(find_by_id(&records, "2").unwrap().label, "b");
        assert!(find_by_id(&records, "9").is_none());

        find_by_id_mut(&mut records, "3").unwrap().label = "changed".to_string();
        assert_eq!(records[2].label, "changed");

        assert!(remove_by_id(&mut records, "1"));
        assert!(!remove_by_id(&mut records, "1"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 2);
    }

    // ============================================================
    // COUNTER STORE TESTS
    // ============================================================

    fn counter_backend(document: &str) -> Arc<MemoryBackend> {
        Arc::new(MemoryBackend::new().with_document(COLLECTION_COUNTERS, document))
    }

    #[tokio::test]
    async fn test_next_id_returns_pre_increment_value() {
        let backend = counter_backend(r#"{"nextGroup":40,"nextMember":7,"nextUser":100}"#);
        let counters = CounterStore::new(backend.clone());

        assert_eq!(counters.next_id(IdSpace::Group).await.unwrap(), 40);
        assert_eq!(counters.next_id(IdSpace::Group).await.unwrap(), 41);

        let persisted: Counters =
            serde_json::from_str(&backend.document(COLLECTION_COUNTERS).unwrap()).unwrap();
        assert_eq!(
            persisted,
            Counters {
                next_group: 42,
                next_member: 7,
                next_user: 100,
            }
        );
    }

    #[tokio::test]
    async fn test_id_spaces_are_independent() {
        let backend = counter_backend(r#"{"nextGroup":1,"nextMember":1,"nextUser":1}"#);
        let counters = CounterStore::new(backend);

        assert_eq!(counters.next_id(IdSpace::Member).await.unwrap(), 1);
        assert_eq!(counters.next_id(IdSpace::Member).await.unwrap(), 2);
        assert_eq!(counters.next_id(IdSpace::User).await.unwrap(), 1);

        let current = counters.current().await.unwrap();
        assert_eq!(current.next_group, 1);
        assert_eq!(current.next_member, 3);
        assert_eq!(current.next_user, 2);
    }

    #[tokio::test]
    async fn test_concurrent_next_id_never_reissues() {
        let backend = counter_backend(r#"{"nextGroup":0,"nextMember":0,"nextUser":0}"#);
        let counters = Arc::new(CounterStore::new(backend));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let counters = counters.clone();
            handles.push(tokio::spawn(async move {
                counters.next_id(IdSpace::User).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();

        assert_eq!(ids, (0..20).collect::<Vec<u64>>());
        assert_eq!(counters.current().await.unwrap().next_user, 20);
    }

    #[tokio::test]
    async fn test_malformed_counters_are_fatal() {
        let counters = CounterStore::new(counter_backend(r#"{"nextGroup":"many"}"#));

        let result = counters.next_id(IdSpace::Group).await;
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_missing_counters_are_fatal() {
        let counters = CounterStore::new(Arc::new(MemoryBackend::new()));

        let result = counters.next_id(IdSpace::User).await;
        assert!(matches!(result, Err(StorageError::MissingCollection(_))));
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_an_error() {
        let document = format!(
            r#"{{"nextGroup":{},"nextMember":1,"nextUser":1}}"#,
            u64::MAX
        );
        let backend = counter_backend(&document);
        let counters = CounterStore::new(backend.clone());

        let result = counters.next_id(IdSpace::Group).await;
        assert!(matches!(result, Err(StorageError::Exhausted(_))));
        assert_eq!(backend.document(COLLECTION_COUNTERS).unwrap(), document);

        assert_eq!(counters.next_id(IdSpace::Member).await.unwrap(), 1);
    }
}
