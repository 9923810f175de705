//! Contract-level tests for the private-key dispatcher

use async_trait::async_trait;
use ledger_common::{Contract, Error, KeyValueStore, MemoryStore, Result, Surface};
use privatekey_contract::{PrivateKeyContract, PATIENT_KEY, PRIVATE_KEY};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store whose second write fails; batched writes are applied all or nothing
#[derive(Default)]
struct SecondWriteFails {
    inner: MemoryStore,
    writes: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for SecondWriteFails {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) == 1 {
            return Err(Error::Store("write failed".to_string()));
        }
        self.inner.put(key, value).await
    }

    async fn put_all(&self, entries: &[(&str, &[u8])]) -> Result<()> {
        let before = self.writes.fetch_add(entries.len(), Ordering::SeqCst);
        if before + entries.len() > 1 {
            return Err(Error::Store("write failed".to_string()));
        }
        self.inner.put_all(entries).await
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

async fn initialized() -> (PrivateKeyContract, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let contract = PrivateKeyContract::new(store.clone());
    contract.init(&strings(&["s3cr3t", "patient-42"])).await.unwrap();
    (contract, store)
}

#[tokio::test]
async fn test_init_stores_secret_and_patient_key() {
    let (_, store) = initialized().await;

    assert_eq!(store.get(PRIVATE_KEY).await.unwrap(), Some(b"s3cr3t".to_vec()));
    assert_eq!(
        store.get(PATIENT_KEY).await.unwrap(),
        Some(b"patient-42".to_vec())
    );
}

#[tokio::test]
async fn test_init_requires_two_arguments() {
    let store = Arc::new(MemoryStore::new());
    let contract = PrivateKeyContract::new(store.clone());

    let err = contract.invoke("init", &strings(&["s3cr3t"])).await.unwrap_err();
    assert!(matches!(err, Error::Arity { expected: 2, actual: 1, .. }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_failed_init_leaves_no_state() {
    let store = Arc::new(SecondWriteFails::default());
    let contract = PrivateKeyContract::new(store.clone());

    let err = contract
        .init(&strings(&["s3cr3t", "patient-42"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));

    assert_eq!(store.get(PRIVATE_KEY).await.unwrap(), None);
    assert_eq!(store.get(PATIENT_KEY).await.unwrap(), None);
    assert!(store.inner.is_empty().await);
}

#[tokio::test]
async fn test_gated_read_with_matching_secret() {
    let (contract, store) = initialized().await;
    store.put("rec1", b"record one").await.unwrap();

    let payload = contract
        .query("read", &strings(&["s3cr3t", "rec1"]))
        .await
        .unwrap();
    assert_eq!(payload, Some(b"record one".to_vec()));

    let patient_key = contract
        .query("read", &strings(&["s3cr3t", PATIENT_KEY]))
        .await
        .unwrap();
    assert_eq!(patient_key, Some(b"patient-42".to_vec()));
}

#[tokio::test]
async fn test_gated_read_with_wrong_secret_is_denied() {
    let (contract, store) = initialized().await;
    store.put("rec1", b"record one").await.unwrap();

    let err = contract
        .query("read", &strings(&["wrong", "rec1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AccessDenied));
}

#[tokio::test]
async fn test_gated_read_before_init() {
    let contract = PrivateKeyContract::new(Arc::new(MemoryStore::new()));

    let err = contract
        .query("read", &strings(&["s3cr3t", "rec1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_gated_read_missing_record() {
    let (contract, _) = initialized().await;

    let err = contract
        .query("read", &strings(&["s3cr3t", "rec9"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(key) if key == "rec9"));
}

#[tokio::test]
async fn test_gated_read_arity() {
    let (contract, _) = initialized().await;

    let err = contract
        .query("read", &strings(&["s3cr3t"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Arity { expected: 2, actual: 1, .. }));
}

#[tokio::test]
async fn test_unknown_operations() {
    let (contract, _) = initialized().await;

    let err = contract
        .invoke("write", &strings(&["rec1", "value"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { surface: Surface::Invoke, .. }));

    let err = contract.query("delete", &strings(&["rec1"])).await.unwrap_err();
    assert_eq!(err.to_string(), "Received unknown function query: delete");
}
