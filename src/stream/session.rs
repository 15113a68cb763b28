//! Consumer handle for a live stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, bounded, unbounded};
use log::warn;
use parking_lot::Mutex;

use crate::client::{HttpClient, HttpRequest};
use crate::error::TransportError;

use super::StreamEvent;
use super::worker;

/// Margin on top of one read-timeout tick when waiting for the reader to
/// acknowledge shutdown.
const TEARDOWN_GRACE: Duration = Duration::from_secs(1);

/// A live stream of records.
///
/// Events arrive on an internal channel fed by a background reader thread.
/// The session ends when the body reaches EOF, the connection fails, or
/// [`destroy`](StreamSession::destroy) is called; after any of these the
/// event methods return `None`.
pub struct StreamSession {
    events: Receiver<StreamEvent>,
    done: Receiver<()>,
    shutdown: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    teardown_timeout: Duration,
}

impl StreamSession {
    /// Starts the reader thread. A request that failed to assemble is
    /// relayed as the session's only event.
    pub(crate) fn spawn(
        client: Arc<dyn HttpClient>,
        request: Result<HttpRequest, TransportError>,
        read_timeout: Duration,
    ) -> Self {
        let (event_tx, event_rx) = unbounded();
        let (done_tx, done_rx) = bounded(1);
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = match request {
            Ok(request) => worker::spawn_reader(
                client,
                request,
                Arc::clone(&shutdown),
                event_tx,
                done_tx,
            ),
            Err(err) => {
                let _ = event_tx.send(StreamEvent::Error(err));
                let _ = done_tx.send(());
                None
            }
        };

        Self {
            events: event_rx,
            done: done_rx,
            shutdown,
            handle: Mutex::new(handle),
            teardown_timeout: read_timeout + TEARDOWN_GRACE,
        }
    }

    /// Blocks until the next event. `None` once the stream has ended or the
    /// session was destroyed.
    pub fn next_event(&self) -> Option<StreamEvent> {
        if self.is_destroyed() {
            return None;
        }
        self.events.recv().ok()
    }

    /// Like [`next_event`](StreamSession::next_event) but waits at most
    /// `timeout`.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<StreamEvent> {
        if self.is_destroyed() {
            return None;
        }
        self.events.recv_timeout(timeout).ok()
    }

    /// Returns a pending event without blocking.
    pub fn try_next_event(&self) -> Option<StreamEvent> {
        if self.is_destroyed() {
            return None;
        }
        self.events.try_recv().ok()
    }

    pub fn is_destroyed(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Signals the reader to stop and waits briefly for it to exit.
    ///
    /// Idempotent. Subsequent event calls return `None`. If the reader does
    /// not acknowledge within the teardown window it is detached rather than
    /// blocking the caller.
    pub fn destroy(&self) {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if self.done.recv_timeout(self.teardown_timeout).is_err() {
            warn!(
                "slack stream reader did not stop within {:?}; detaching",
                self.teardown_timeout
            );
            return;
        }
        if handle.join().is_err() {
            warn!("slack stream reader thread panicked");
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.destroy();
    }
}
