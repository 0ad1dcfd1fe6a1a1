//! mpv JSON IPC wire types.
//!
//! Messages are newline-delimited JSON on the player's IPC socket. Requests
//! carry a `request_id` echoed back in the matching response; everything else
//! the player sends is an asynchronous event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command request (array form).
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub command: Vec<Value>,
    pub request_id: u64,
}

/// Reply to a request. `error` is `"success"` on success, a reason otherwise.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Response {
    pub error: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub request_id: Option<u64>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.error == "success"
    }
}

/// Asynchronous events emitted by the player.
///
/// Tagged by the `"event"` field; events this client does not care about
/// collapse into `Other`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum MpvEvent {
    /// An observed property changed value.
    PropertyChange {
        #[serde(default)]
        id: u64,
        name: String,
        #[serde(default)]
        data: Value,
    },

    /// `script-message` dispatched from a key binding.
    ClientMessage { args: Vec<String> },

    /// A new file finished loading.
    FileLoaded,

    /// The player is shutting down.
    Shutdown,

    #[serde(other)]
    Other,
}

/// One parsed line off the socket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Incoming {
    Event(MpvEvent),
    Response(Response),
}
