//! Remote document store trait and implementations

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;

use crate::credentials::ServiceCredentials;
use crate::error::{StoreError, StoreResult};

/// Key-addressed document store: GET a JSON document (or find it absent),
/// PUT a wholesale replacement.
pub trait RemoteStore: Send + Sync + 'static {
    fn get(&self, path: &str) -> BoxFuture<'_, StoreResult<Option<Value>>>;
    fn put(&self, path: &str, document: Value) -> BoxFuture<'_, StoreResult<()>>;
}

/// HTTP-backed document store.
///
/// The base address is derived from the credential's project id. An absent
/// document reads back as JSON `null`, which maps to `Ok(None)`.
pub struct HttpRemoteStore {
    client: reqwest::Client,
    credentials: ServiceCredentials,
}

impl HttpRemoteStore {
    pub fn new(credentials: ServiceCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    /// Convenience: decode the stored token and build the client in one go
    pub fn from_token(token: &str) -> StoreResult<Self> {
        Ok(Self::new(ServiceCredentials::from_token(token)?))
    }
}

impl RemoteStore for HttpRemoteStore {
    fn get(&self, path: &str) -> BoxFuture<'_, StoreResult<Option<Value>>> {
        let url = self.credentials.database_url(path);
        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| StoreError::RemoteUnavailable(format!("GET {url}: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::RemoteUnavailable(format!(
                    "GET {url}: status {status}"
                )));
            }

            let value: Value = response
                .json()
                .await
                .map_err(|e| StoreError::RemoteUnavailable(format!("GET {url}: {e}")))?;

            Ok(match value {
                Value::Null => None,
                other => Some(other),
            })
        })
    }

    fn put(&self, path: &str, document: Value) -> BoxFuture<'_, StoreResult<()>> {
        let url = self.credentials.database_url(path);
        Box::pin(async move {
            let response = self
                .client
                .put(&url)
                .json(&document)
                .send()
                .await
                .map_err(|e| StoreError::RemoteUnavailable(format!("PUT {url}: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::RemoteUnavailable(format!(
                    "PUT {url}: status {status}"
                )));
            }
            Ok(())
        })
    }
}

/// In-memory document store for tests and offline tooling.
///
/// Holds documents in a map and can be switched into a failing mode to
/// exercise the degradation paths.
#[derive(Default)]
pub struct MemoryRemoteStore {
    documents: Mutex<HashMap<String, Value>>,
    failing: AtomicBool,
    put_count: Mutex<u64>,
}

impl MemoryRemoteStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail with `RemoteUnavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a document directly
    pub fn insert(&self, path: &str, document: Value) {
        self.documents.lock().insert(path.to_string(), document);
    }

    /// Read a document directly (bypasses the failing switch)
    pub fn document(&self, path: &str) -> Option<Value> {
        self.documents.lock().get(path).cloned()
    }

    /// Number of successful PUTs observed
    pub fn put_count(&self) -> u64 {
        *self.put_count.lock()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::RemoteUnavailable("memory store failing".into()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn get(&self, path: &str) -> BoxFuture<'_, StoreResult<Option<Value>>> {
        let path = path.to_string();
        Box::pin(async move {
            self.check_available()?;
            Ok(self.documents.lock().get(&path).cloned())
        })
    }

    fn put(&self, path: &str, document: Value) -> BoxFuture<'_, StoreResult<()>> {
        let path = path.to_string();
        Box::pin(async move {
            self.check_available()?;
            self.documents.lock().insert(path, document);
            *self.put_count.lock() += 1;
            Ok(())
        })
    }
}
