//! Delivery targets for accepted batches.
//!
//! The bridge never processes attachment content itself; it hands accepted
//! batches to whatever [`AttachmentSink`] the embedding application
//! installed. Until one is installed, deliveries go to [`LogSink`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::batch::AttachmentBatch;

/// A batch the bridge has taken ownership of, with its receive time.
#[derive(Debug, Clone)]
pub struct ReceivedBatch {
    /// When the bridge accepted the batch.
    pub received_at: DateTime<Utc>,
    /// The owned, validated batch.
    pub batch: AttachmentBatch,
}

/// Receives accepted batches.
///
/// Delivery happens synchronously inside the submitting call; a sink that
/// needs to do slow work should enqueue and return.
pub trait AttachmentSink: Send {
    /// Take delivery of one batch. Returning an error surfaces as
    /// [`BridgeError::SinkError`] to the submitter.
    fn receive(&mut self, batch: ReceivedBatch) -> Result<()>;
}

/// Default sink: records each delivery in the log and drops it.
#[derive(Debug, Default)]
pub struct LogSink;

impl AttachmentSink for LogSink {
    fn receive(&mut self, batch: ReceivedBatch) -> Result<()> {
        tracing::info!(
            files = batch.batch.file_count(),
            texts = batch.batch.text_count(),
            wifi = batch.batch.wifi_count(),
            received_at = %batch.received_at,
            "No sink installed, batch logged and dropped"
        );
        Ok(())
    }
}

/// In-memory sink retaining every delivery in arrival order.
///
/// The sink itself is installed into the bridge; the [`MemorySinkHandle`]
/// obtained from [`MemorySink::handle`] stays with the embedder for reading
/// back what arrived. Used by the test suite and by hosts that poll.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Vec<ReceivedBatch>>>,
}

/// Read-side handle to a [`MemorySink`]'s deliveries.
#[derive(Debug, Clone, Default)]
pub struct MemorySinkHandle {
    inner: Arc<Mutex<Vec<ReceivedBatch>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading deliveries after the sink has been installed.
    pub fn handle(&self) -> MemorySinkHandle {
        MemorySinkHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MemorySinkHandle {
    /// Snapshot of all deliveries so far, in arrival order.
    pub fn received(&self) -> Vec<ReceivedBatch> {
        self.inner.lock().expect("sink lock poisoned").clone()
    }

    /// Number of deliveries so far.
    pub fn delivery_count(&self) -> usize {
        self.inner.lock().expect("sink lock poisoned").len()
    }

    /// Drop all recorded deliveries.
    pub fn clear(&self) {
        self.inner.lock().expect("sink lock poisoned").clear();
    }
}

impl AttachmentSink for MemorySink {
    fn receive(&mut self, batch: ReceivedBatch) -> Result<()> {
        self.inner.lock().expect("sink lock poisoned").push(batch);
        Ok(())
    }
}

// ── Global sink registry ────────────────────────────────────────

static SINK: Mutex<Option<Box<dyn AttachmentSink>>> = Mutex::new(None);

/// Install the sink used by [`submit`](crate::marshal::submit) and the FFI
/// transfer path, replacing any previous one.
pub fn install_sink(sink: Box<dyn AttachmentSink>) {
    *SINK.lock().expect("sink registry poisoned") = Some(sink);
}

/// Remove and return the installed sink, if any. Subsequent deliveries fall
/// back to [`LogSink`].
pub fn uninstall_sink() -> Option<Box<dyn AttachmentSink>> {
    SINK.lock().expect("sink registry poisoned").take()
}

/// Deliver to the installed sink, or to [`LogSink`] if none is installed.
pub(crate) fn deliver(batch: ReceivedBatch) -> Result<()> {
    let mut guard = SINK.lock().expect("sink registry poisoned");
    match guard.as_mut() {
        Some(sink) => sink.receive(batch),
        None => LogSink.receive(batch),
    }
}
