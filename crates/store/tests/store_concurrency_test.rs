use bytes::Bytes;
use capstore_core::Error;
use capstore_store::{ObjectState, ObjectStore};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_reserve_and_complete_never_tear() {
    let store = Arc::new(ObjectStore::new());
    let mut handles = Vec::new();

    for i in 0..64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                store.reserve("shared", format!("payload-{i}"));
            } else {
                let _ = store.complete("shared");
            }
            // Readers only ever see a full payload or a clean rejection
            match store.get("shared") {
                Ok(bytes) => assert!(bytes.starts_with(b"payload-")),
                Err(Error::Incomplete { .. }) | Err(Error::NotFound { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len(), 1);
    assert_ne!(store.state("shared"), ObjectState::Absent);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_independent_names_do_not_interfere() {
    let store = Arc::new(ObjectStore::new());
    let mut handles = Vec::new();

    for i in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let name = format!("object-{i}");
            store.reserve(&name, format!("value-{i}"));
            store.complete(&name).unwrap();
            assert_eq!(store.get(&name).unwrap(), Bytes::from(format!("value-{i}")));
            if i % 4 == 0 {
                store.remove(&name);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len(), 24);
    assert_eq!(store.state("object-0"), ObjectState::Absent);
    assert_eq!(store.state("object-1"), ObjectState::Complete);
}

#[test]
fn test_separate_instances_are_isolated() {
    let first = ObjectStore::new();
    let second = ObjectStore::new();

    first.reserve("x", "HELLO");
    first.complete("x").unwrap();

    assert!(matches!(second.get("x"), Err(Error::NotFound { .. })));
    assert_eq!(first.get("x").unwrap(), Bytes::from_static(b"HELLO"));
}
