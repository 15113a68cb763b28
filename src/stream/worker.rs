//! Background reader that turns a streaming body into events.

use std::io::{ErrorKind, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::warn;

use crate::client::{HttpClient, HttpRequest};
use crate::error::TransportError;

use super::StreamEvent;
use super::splitter::LineSplitter;

const READ_CHUNK: usize = 8 * 1024;

/// Spawns the reader thread. Returns `None` when the thread could not be
/// started; the failure is relayed as an event instead of a panic.
pub(super) fn spawn_reader(
    client: Arc<dyn HttpClient>,
    request: HttpRequest,
    shutdown: Arc<AtomicBool>,
    events: Sender<StreamEvent>,
    done: Sender<()>,
) -> Option<JoinHandle<()>> {
    let spawn_failure_events = events.clone();
    let result = thread::Builder::new()
        .name("slack-stream-reader".to_string())
        .spawn(move || {
            run_reader(client.as_ref(), &request, &shutdown, &events);
            let _ = done.send(());
        });
    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!("slack transport could not spawn stream reader: {err}");
            let _ = spawn_failure_events.send(StreamEvent::Error(TransportError::Request(
                format!("failed to spawn stream reader: {err}"),
            )));
            None
        }
    }
}

fn run_reader(
    client: &dyn HttpClient,
    request: &HttpRequest,
    shutdown: &AtomicBool,
    events: &Sender<StreamEvent>,
) {
    let mut body = match client.open_stream(request) {
        Ok(body) => body,
        Err(err) => {
            let _ = events.send(StreamEvent::Error(err));
            return;
        }
    };

    let mut splitter = LineSplitter::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        if shutdown.load(Ordering::SeqCst) {
            return;
        }
        match body.read(&mut chunk) {
            Ok(0) => return,
            Ok(read) => {
                if !emit_lines(&mut splitter, &chunk[..read], shutdown, events) {
                    return;
                }
            }
            // Read timeouts are poll ticks; they exist so the shutdown flag
            // gets observed on idle streams.
            Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {}
            Err(err) => {
                if !shutdown.load(Ordering::SeqCst) {
                    let _ = events.send(StreamEvent::Error(TransportError::Request(
                        err.to_string(),
                    )));
                }
                return;
            }
        }
    }
}

/// Parses each completed line and forwards the outcome. A line that is not
/// valid JSON produces an error event and the stream carries on.
fn emit_lines(
    splitter: &mut LineSplitter,
    chunk: &[u8],
    shutdown: &AtomicBool,
    events: &Sender<StreamEvent>,
) -> bool {
    for line in splitter.push(chunk) {
        if shutdown.load(Ordering::SeqCst) {
            return false;
        }
        let event = match serde_json::from_slice(&line) {
            Ok(value) => StreamEvent::Record(value),
            Err(err) => StreamEvent::Error(TransportError::Parse(err)),
        };
        if events.send(event).is_err() {
            return false;
        }
    }
    true
}
