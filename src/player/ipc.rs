//! mpv IPC client so all player traffic funnels through one socket and one dispatch path.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use serde_json::{json, Value};

use super::protocol::{Incoming, MpvEvent, Request};
use super::Player;
use crate::osd::OsdBackend;

/// Max buffered socket messages before the reader thread blocks.
const INCOMING_CHANNEL_CAPACITY: usize = 256;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the player's JSON IPC socket.
///
/// A reader thread parses newline-delimited JSON off the socket and forwards
/// every message through a channel; the owning thread is the only consumer.
/// Requests block until the matching `request_id` comes back, queueing any
/// events that arrive in between so no notification is lost.
pub struct MpvClient {
    writer: RefCell<UnixStream>,
    incoming: Receiver<Incoming>,
    pending: RefCell<VecDeque<MpvEvent>>,
    next_request_id: Cell<u64>,
    next_observe_id: Cell<u64>,
}

impl MpvClient {
    pub fn connect(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .with_context(|| format!("connecting to player socket {}", path.display()))?;
        let reader = stream.try_clone().context("cloning player socket")?;
        let (tx, rx) = bounded(INCOMING_CHANNEL_CAPACITY);
        thread::spawn(move || read_socket(reader, tx));
        tracing::info!(socket = %path.display(), "connected to player");
        Ok(Self {
            writer: RefCell::new(stream),
            incoming: rx,
            pending: RefCell::new(VecDeque::new()),
            next_request_id: Cell::new(1),
            next_observe_id: Cell::new(1),
        })
    }

    /// Next asynchronous event, blocking until one arrives.
    ///
    /// Returns `None` once the player has closed the connection.
    pub fn next_event(&self) -> Option<MpvEvent> {
        if let Some(event) = self.pending.borrow_mut().pop_front() {
            return Some(event);
        }
        loop {
            match self.incoming.recv() {
                Ok(Incoming::Event(event)) => return Some(event),
                Ok(Incoming::Response(response)) => {
                    tracing::debug!(request_id = ?response.request_id, "dropping unpaired response");
                }
                Err(_) => return None,
            }
        }
    }

    fn request(&self, command: Vec<Value>) -> Result<Value> {
        let request_id = self.next_request_id.get();
        self.next_request_id.set(request_id + 1);
        let mut line = serde_json::to_string(&Request {
            command,
            request_id,
        })?;
        line.push('\n');
        self.writer
            .borrow_mut()
            .write_all(line.as_bytes())
            .context("writing to player socket")?;

        loop {
            match self.incoming.recv_timeout(REQUEST_TIMEOUT) {
                Ok(Incoming::Event(event)) => self.pending.borrow_mut().push_back(event),
                Ok(Incoming::Response(response)) => {
                    if response.request_id != Some(request_id) {
                        tracing::debug!(request_id = ?response.request_id, "dropping stale response");
                        continue;
                    }
                    if response.is_success() {
                        return Ok(response.data);
                    }
                    bail!("player error: {}", response.error);
                }
                Err(RecvTimeoutError::Timeout) => bail!("player response timed out"),
                Err(RecvTimeoutError::Disconnected) => bail!("player connection closed"),
            }
        }
    }

    fn get_property(&self, name: &str) -> Result<Value> {
        self.request(vec![json!("get_property"), json!(name)])
    }

    fn set_property(&self, name: &str, value: Value) -> Result<()> {
        self.request(vec![json!("set_property"), json!(name), value])
            .map(|_| ())
    }
}

impl Player for MpvClient {
    fn get_bool(&self, name: &str) -> Result<bool> {
        self.get_property(name)?
            .as_bool()
            .ok_or_else(|| anyhow!("not a boolean: {name}"))
    }

    fn get_i64(&self, name: &str) -> Result<i64> {
        self.get_property(name)?
            .as_i64()
            .ok_or_else(|| anyhow!("not an integer: {name}"))
    }

    fn get_f64(&self, name: &str) -> Result<f64> {
        self.get_property(name)?
            .as_f64()
            .ok_or_else(|| anyhow!("not a number: {name}"))
    }

    fn get_str(&self, name: &str) -> Result<String> {
        let data = self.request(vec![json!("get_property_string"), json!(name)])?;
        data.as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("not coercible to text: {name}"))
    }

    fn get_node(&self, name: &str) -> Result<Value> {
        self.get_property(name)
    }

    fn set_bool(&self, name: &str, value: bool) -> Result<()> {
        self.set_property(name, json!(value))
    }

    fn set_i64(&self, name: &str, value: i64) -> Result<()> {
        self.set_property(name, json!(value))
    }

    fn set_f64(&self, name: &str, value: f64) -> Result<()> {
        self.set_property(name, json!(value))
    }

    fn set_str(&self, name: &str, value: &str) -> Result<()> {
        self.request(vec![
            json!("set_property_string"),
            json!(name),
            json!(value),
        ])
        .map(|_| ())
    }

    fn set_node(&self, name: &str, value: &Value) -> Result<()> {
        self.set_property(name, value.clone())
    }

    fn command(&self, args: &[&str]) -> Result<()> {
        self.request(args.iter().map(|arg| json!(arg)).collect())
            .map(|_| ())
    }

    fn command_text(&self, line: &str) -> Result<()> {
        // Raw lines are parsed by the player like input.conf entries and get
        // no response. Anything after a newline would become a second command.
        let line = line.trim();
        if line.contains('\n') {
            bail!("input line must be a single line");
        }
        let mut writer = self.writer.borrow_mut();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .context("writing to player socket")
    }

    fn observe(&self, name: &str) -> Result<()> {
        let id = self.next_observe_id.get();
        self.next_observe_id.set(id + 1);
        self.request(vec![json!("observe_property"), json!(id), json!(name)])
            .map(|_| ())
    }
}

impl OsdBackend for MpvClient {
    fn update(&self, id: u64, payload: &str) -> Result<()> {
        self.request(vec![
            json!("osd-overlay"),
            json!(id),
            json!("ass-events"),
            json!(payload),
        ])
        .map(|_| ())
    }

    fn remove(&self, id: u64) -> Result<()> {
        self.request(vec![json!("osd-overlay"), json!(id), json!("none"), json!("")])
            .map(|_| ())
    }
}

fn read_socket(stream: UnixStream, tx: Sender<Incoming>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Incoming>(trimmed) {
            Ok(message) => {
                if tx.send(message).is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!("unparseable player message: {err}");
            }
        }
    }
    tracing::debug!("player socket reader exiting");
}
