//! Shared-secret access gate

use ledger_common::{Error, KeyValueStore, Result};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Key holding the shared secret
pub const PRIVATE_KEY: &str = "private_key";

/// The instance's shared secret, loaded from the store
///
/// Compared byte-for-byte as an opaque value. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self(value.into())
    }

    /// Load the secret written at initialization
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let bytes = store
            .get(PRIVATE_KEY)
            .await?
            .ok_or_else(|| Error::Store(format!("Failed to get state for {}", PRIVATE_KEY)))?;
        Ok(Self(bytes))
    }

    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

/// Permits reads only to callers presenting the instance secret
pub struct AccessGate {
    secret: Secret,
    store: Arc<dyn KeyValueStore>,
}

impl AccessGate {
    pub fn new(secret: Secret, store: Arc<dyn KeyValueStore>) -> Self {
        Self { secret, store }
    }

    pub fn check(&self, supplied: &str) -> Result<()> {
        if self.secret.matches(supplied) {
            Ok(())
        } else {
            warn!("Rejected gated read: secret mismatch");
            Err(Error::AccessDenied)
        }
    }

    /// Read `target_key` if `supplied` matches the secret
    pub async fn check_and_read(&self, supplied: &str, target_key: &str) -> Result<Vec<u8>> {
        self.check(supplied)?;
        self.store.get_required(target_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::MemoryStore;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("s3cr3t");
        assert_eq!(format!("{:?}", secret), "Secret(**redacted**)");
    }

    #[test]
    fn test_secret_compares_exact_bytes() {
        let secret = Secret::new("s3cr3t");
        assert!(secret.matches("s3cr3t"));
        assert!(!secret.matches("S3CR3T"));
        assert!(!secret.matches("s3cr3t "));
        assert!(!secret.matches(""));
    }

    #[tokio::test]
    async fn test_load_uninitialized_secret() {
        let store = MemoryStore::new();
        let err = Secret::load(&store).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[tokio::test]
    async fn test_non_utf8_secret_is_a_mismatch() {
        let store = Arc::new(MemoryStore::new());
        store.put(PRIVATE_KEY, &[0xff, 0xfe, 0x00]).await.unwrap();
        store.put("rec1", b"record").await.unwrap();

        let secret = Secret::load(store.as_ref()).await.unwrap();

        let gate = AccessGate::new(secret, store);
        assert!(matches!(
            gate.check_and_read("s3cr3t", "rec1").await,
            Err(Error::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_check_and_read() {
        let store = Arc::new(MemoryStore::new());
        store.put("rec1", b"record").await.unwrap();

        let gate = AccessGate::new(Secret::new("s3cr3t"), store);

        assert_eq!(gate.check_and_read("s3cr3t", "rec1").await.unwrap(), b"record");
        assert!(matches!(
            gate.check_and_read("wrong", "rec1").await,
            Err(Error::AccessDenied)
        ));
        assert!(matches!(
            gate.check_and_read("s3cr3t", "rec2").await,
            Err(Error::NotFound(_))
        ));
    }
}
