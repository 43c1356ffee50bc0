//! Post-data temporary store for RelayGate.
//!
//! Relayed request and response bodies are stashed in a keyed byte store
//! with a fixed storage period, so a later pipeline stage (or a retry) can
//! replay them without re-reading the wire.
//!
//! # Scoped writers
//!
//! Writing goes through a [`BodyWriter`], a scoped resource: bytes are
//! buffered while the writer lives, and dropping it flushes the buffer into
//! the store under the request id - on every exit path, including early
//! returns and errors.
//!
//! # Expiry
//!
//! Entries older than the storage period are treated as missing and dropped
//! lazily on read; a full sweep runs on write once the entry count crosses a
//! threshold, preventing unbounded growth under sustained traffic.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::debug;

use crate::defaults;
use crate::error::{RelayGateError, Result};

/// A stored body with its storage timestamp.
#[derive(Clone, Debug)]
struct StoredEntry {
    data: Bytes,
    stored_at: Instant,
}

/// Thread-safe in-memory byte store with a fixed storage period.
///
/// Cloning is cheap and shares the underlying map, so one store instance can
/// serve every connection task.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use std::time::Duration;
/// use relaygate_core::store::MemoryStore;
///
/// let store = MemoryStore::new(Duration::from_secs(60)).unwrap();
/// {
///     let mut writer = store.request_writer("req-1");
///     writer.write_all(b"payload").unwrap();
/// } // dropped here - the buffered bytes flush into the store
/// assert_eq!(store.request_body("req-1").as_ref(), b"payload");
/// ```
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, StoredEntry>>>,
    storage_period: Duration,
}

impl MemoryStore {
    /// Creates a store with the given storage period.
    ///
    /// # Errors
    ///
    /// Returns [`RelayGateError::Store`] when the period is zero.
    pub fn new(storage_period: Duration) -> Result<Self> {
        if storage_period.is_zero() {
            return Err(RelayGateError::Store(
                "storage period must be positive".into(),
            ));
        }
        Ok(Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            storage_period,
        })
    }

    /// The configured storage period.
    pub fn storage_period(&self) -> Duration {
        self.storage_period
    }

    /// Returns a scoped writer for a request body.
    pub fn request_writer(&self, request_id: &str) -> BodyWriter {
        debug!(request_id, "creating writer for request body");
        BodyWriter::new(self.clone(), request_key(request_id))
    }

    /// Returns the stored request body, empty when missing or expired.
    pub fn request_body(&self, request_id: &str) -> Bytes {
        debug!(request_id, "reading stored request body");
        self.read(&request_key(request_id))
    }

    /// Returns a scoped writer for a response body.
    pub fn response_writer(&self, request_id: &str) -> BodyWriter {
        debug!(request_id, "creating writer for response body");
        BodyWriter::new(self.clone(), response_key(request_id))
    }

    /// Returns the stored response body, empty when missing or expired.
    pub fn response_body(&self, request_id: &str) -> Bytes {
        debug!(request_id, "reading stored response body");
        self.read(&response_key(request_id))
    }

    /// Re-keys a stored response body from a temporary id to its final
    /// request id, refreshing the expiry.
    ///
    /// Returns the byte length of the promoted body (0 when the temporary id
    /// was missing or expired).
    pub fn promote_response(&self, temporary_id: &str, request_id: &str) -> usize {
        debug!(temporary_id, request_id, "promoting stored response body");

        let mut entries = self.lock();
        let data = match entries.remove(&response_key(temporary_id)) {
            Some(entry) if entry.stored_at.elapsed() < self.storage_period => entry.data,
            _ => Bytes::new(),
        };
        let length = data.len();
        entries.insert(
            response_key(request_id),
            StoredEntry {
                data,
                stored_at: Instant::now(),
            },
        );
        length
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn put(&self, key: String, data: Bytes) {
        let mut entries = self.lock();

        // Sweep expired entries before growing past the threshold.
        if entries.len() >= defaults::STORE_CLEANUP_THRESHOLD {
            let period = self.storage_period;
            let before = entries.len();
            entries.retain(|_, entry| entry.stored_at.elapsed() < period);
            let removed = before - entries.len();
            if removed > 0 {
                debug!(removed_entries = removed, "swept expired store entries");
            }
        }

        entries.insert(
            key,
            StoredEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    fn read(&self, key: &str) -> Bytes {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.storage_period => entry.data.clone(),
            Some(_) => {
                entries.remove(key);
                Bytes::new()
            }
            None => Bytes::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredEntry>> {
        // Nothing panics while holding the lock; recover the map on poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn request_key(request_id: &str) -> String {
    format!("request/{request_id}")
}

fn response_key(request_id: &str) -> String {
    format!("response/{request_id}")
}

/// Scoped writer that flushes its buffer into the store on drop.
///
/// Implements [`std::io::Write`]; writes are infallible buffer appends. The
/// flush-on-drop contract holds on every exit path, including early returns
/// and unwinding.
pub struct BodyWriter {
    store: MemoryStore,
    key: String,
    buffer: Vec<u8>,
}

impl BodyWriter {
    fn new(store: MemoryStore, key: String) -> Self {
        Self {
            store,
            key,
            buffer: Vec::new(),
        }
    }

    /// Number of bytes buffered so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` when nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Write for BodyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for BodyWriter {
    fn drop(&mut self) {
        let data = Bytes::from(std::mem::take(&mut self.buffer));
        self.store.put(std::mem::take(&mut self.key), data);
    }
}
