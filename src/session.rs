//! Per-request protocol sessions.
//!
//! Every POST to the MCP endpoint gets its own [`Weather`] server, built by
//! [`SessionFactory::create`]. The streamable HTTP transport binds that server
//! to a one-shot transport for the single request and drops it once the
//! response has been written, which closes the [`Session`] it owns. Nothing
//! here is shared across requests except the immutable upstream client.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::service::Weather;
use crate::upstream::NwsClient;

/// Counts sessions opened and closed by a factory
#[derive(Debug, Default)]
pub struct SessionTracker {
    opened: AtomicU64,
    closed: AtomicU64,
}

impl SessionTracker {
    /// Total sessions opened so far
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::Acquire)
    }

    /// Total sessions closed so far
    pub fn closed(&self) -> u64 {
        self.closed.load(Ordering::Acquire)
    }

    /// Sessions opened but not yet closed
    pub fn active(&self) -> u64 {
        self.opened().saturating_sub(self.closed())
    }
}

/// Lifecycle marker for one request/response cycle.
///
/// A session starts active and moves to closed exactly once, either through
/// [`Session::close`] or when it is dropped along with its server.
#[derive(Debug)]
pub struct Session {
    closed: AtomicBool,
    opened_at: Instant,
    tracker: Arc<SessionTracker>,
}

impl Session {
    /// Opens a session and records it with `tracker`
    pub fn open(tracker: Arc<SessionTracker>) -> Self {
        tracker.opened.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(active = tracker.active(), "Session opened");
        Self {
            closed: AtomicBool::new(false),
            opened_at: Instant::now(),
            tracker,
        }
    }

    /// Moves the session to closed. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.tracker.closed.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            active = self.tracker.active(),
            "Session closed"
        );
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builds a fresh server for each inbound request
#[derive(Debug, Clone)]
pub struct SessionFactory {
    upstream: Arc<NwsClient>,
    tracker: Arc<SessionTracker>,
}

impl SessionFactory {
    /// Creates a factory whose servers share `upstream`
    pub fn new(upstream: Arc<NwsClient>) -> Self {
        Self {
            upstream,
            tracker: Arc::default(),
        }
    }

    /// Session counters shared by every server this factory builds
    pub fn tracker(&self) -> Arc<SessionTracker> {
        Arc::clone(&self.tracker)
    }

    /// Builds a new server owning a new session
    pub fn create(&self) -> io::Result<Weather> {
        let session = Session::open(self.tracker());
        Ok(Weather::new(Arc::clone(&self.upstream), session))
    }
}
