//! Versioned key/value persistence with safe-parse fallback.
//!
//! Every feature owns one record per bundle. Keys carry a schema version, so
//! a shape change means a new key: records under an old version simply
//! become unreachable instead of being migrated in place.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Prefix shared by every record this workspace writes.
pub const NAMESPACE: &str = "assistive";

/// Namespaced, versioned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub feature: &'static str,
    pub name: &'static str,
    pub version: u32,
}

impl RecordKey {
    pub const fn new(feature: &'static str, name: &'static str, version: u32) -> Self {
        Self { feature, name, version }
    }

    /// The same record under a different schema version.
    pub const fn with_version(self, version: u32) -> Self {
        Self { version, ..self }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:v{}", NAMESPACE, self.feature, self.name, self.version)
    }
}

/// Failures inside the persistence layer. None of these escape `Store::read`
/// or `Store::write`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No storage is available in this environment.
    #[error("storage backend unavailable")]
    Unavailable,

    /// The backend refused the operation (quota exceeded, access denied, ...).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw string storage, shaped after the browser's `localStorage`.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process backend for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    /// Optional cap on total stored bytes (keys + values).
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects writes once `bytes` would be exceeded.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::Backend(format!(
                    "quota exceeded: {} > {} bytes",
                    needed, quota
                )));
            }
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Best-effort typed persistence over a `StorageBackend`.
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by process memory. State is lost when the store drops.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Read a record, substituting `fallback` when it is missing or corrupt.
    pub fn read<T: DeserializeOwned>(&self, key: &RecordKey, fallback: T) -> T {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                log::debug!("store: {} not found, using default", key);
                fallback
            }
            Err(e) => {
                log::warn!("store: {} unreadable ({}), using default", key, e);
                fallback
            }
        }
    }

    /// Read a record, reporting why it could not be decoded.
    /// An absent or empty payload is `Ok(None)`.
    pub fn try_read<T: DeserializeOwned>(&self, key: &RecordKey) -> Result<Option<T>, StoreError> {
        let raw = match self.backend.get_item(&key.to_string())? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Serialize and store a record. Failures are logged and dropped:
    /// in-memory state stays authoritative.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &RecordKey, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            log::warn!("store: failed to persist {}: {}", key, e);
        }
    }

    pub fn try_write<T: Serialize + ?Sized>(
        &mut self,
        key: &RecordKey,
        value: &T,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(&key.to_string(), &raw)
    }

    /// Delete a record. Best-effort, like `write`.
    pub fn remove(&mut self, key: &RecordKey) {
        if let Err(e) = self.backend.remove_item(&key.to_string()) {
            log::warn!("store: failed to remove {}: {}", key, e);
        }
    }

    /// Store a raw payload under a key, bypassing serialization.
    pub fn write_raw(&mut self, key: &RecordKey, raw: &str) {
        if let Err(e) = self.backend.set_item(&key.to_string(), raw) {
            log::warn!("store: failed to persist {}: {}", key, e);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    const KEY: RecordKey = RecordKey::new("test", "bundle", 1);

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Bundle {
        a: u32,
        b: String,
    }

    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn key_format_is_namespaced_and_versioned() {
        assert_eq!(KEY.to_string(), "assistive:test:bundle:v1");
        assert_eq!(KEY.with_version(2).to_string(), "assistive:test:bundle:v2");
    }

    #[test]
    fn missing_key_returns_fallback() {
        let store = Store::in_memory();
        assert_eq!(store.read(&KEY, 7u32), 7);
    }

    #[test]
    fn corrupt_payload_returns_fallback() {
        let mut store = Store::in_memory();
        store.write_raw(&KEY, "{not json");
        let fallback = Bundle { a: 1, b: "x".into() };
        assert_eq!(store.read(&KEY, fallback.clone()), fallback);
    }

    #[test]
    fn wrong_shape_returns_fallback() {
        let mut store = Store::in_memory();
        store.write(&KEY, &vec![1, 2, 3]);
        assert_eq!(store.read(&KEY, Bundle { a: 0, b: String::new() }).a, 0);
    }

    #[test]
    fn empty_payload_counts_as_missing() {
        let mut store = Store::in_memory();
        store.write_raw(&KEY, "");
        assert!(store.try_read::<u32>(&KEY).unwrap().is_none());
    }

    #[test]
    fn new_version_does_not_see_old_record() {
        let mut store = Store::in_memory();
        store.write(&KEY, &42u32);
        assert_eq!(store.read(&KEY.with_version(2), 0u32), 0);
        assert_eq!(store.read(&KEY, 0u32), 42);
    }

    #[test]
    fn remove_forgets_record() {
        let mut store = Store::in_memory();
        store.write(&KEY, &42u32);
        store.remove(&KEY);
        assert_eq!(store.read(&KEY, 0u32), 0);
    }

    #[test]
    fn quota_failure_is_swallowed() {
        let mut store = Store::new(MemoryBackend::with_quota(32));
        store.write(&KEY, &"x".repeat(100));
        assert_eq!(store.read(&KEY, String::from("none")), "none");
        assert!(store.try_write(&KEY, &"x".repeat(100)).is_err());
    }

    #[test]
    fn unavailable_backend_never_panics() {
        let mut store = Store::new(BrokenBackend);
        store.write(&KEY, &1u32);
        store.remove(&KEY);
        assert_eq!(store.read(&KEY, 5u32), 5);
    }

    proptest! {
        #[test]
        fn round_trip_any_bundle(a in any::<u32>(), b in ".*") {
            let mut store = Store::in_memory();
            let value = Bundle { a, b };
            store.write(&KEY, &value);
            prop_assert_eq!(store.read(&KEY, Bundle { a: 0, b: String::new() }), value);
        }

        #[test]
        fn round_trip_any_list(items in proptest::collection::vec(any::<i64>(), 0..32)) {
            let mut store = Store::in_memory();
            store.write(&KEY, &items);
            prop_assert_eq!(store.read(&KEY, Vec::<i64>::new()), items);
        }
    }
}
