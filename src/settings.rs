//! Settings persistence so a fixed property subset survives player restarts.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::player::{osd_message, Player};

/// The only properties ever persisted or restored.
const SAVED_PROPS: &[&str] = &[
    "fullscreen",
    "audio",
    "sub",
    "audio-delay",
    "sub-delay",
    "sub-scale",
    "sub-pos",
];

/// Flat persisted property bag plus the in-memory autoload flag.
pub struct Settings {
    pub autoload: bool,
    path: PathBuf,
}

impl Settings {
    pub fn new(path: PathBuf) -> Self {
        Self {
            autoload: false,
            path,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Serialize the allow-listed properties and the autoload flag.
    ///
    /// Explicit saves always notify; failures degrade to a notice, never an
    /// error.
    pub fn save(&self, player: &dyn Player) {
        let mut bag = Map::new();
        bag.insert("autoload".to_string(), Value::Bool(self.autoload));
        for prop in SAVED_PROPS {
            if let Ok(value) = player.get_node(prop) {
                bag.insert(prop.to_string(), value);
            }
        }
        let written = serde_json::to_string_pretty(&Value::Object(bag))
            .map_err(anyhow::Error::from)
            .and_then(|body| fs::write(&self.path, body).map_err(anyhow::Error::from));
        match written {
            Ok(()) => osd_message(player, "tvosd settings saved"),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "settings save failed: {err:#}");
                osd_message(player, "Settings save failed");
            }
        }
    }

    /// Read the bag back and apply it to the player.
    ///
    /// With `autoloaded` set, a persisted `autoload: false` turns the whole
    /// load into a silent no-op, and read failures stay silent too; explicit
    /// loads notify either way.
    pub fn load(&mut self, player: &dyn Player, autoloaded: bool) {
        let parsed = fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|body| serde_json::from_str::<Value>(&body).map_err(anyhow::Error::from));
        let bag = match parsed {
            Ok(Value::Object(bag)) => bag,
            Ok(_) | Err(_) => {
                tracing::debug!(path = %self.path.display(), "no readable settings file");
                if !autoloaded {
                    osd_message(player, "Settings load failed");
                }
                return;
            }
        };

        self.autoload = bag
            .get("autoload")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if autoloaded && !self.autoload {
            return;
        }
        for prop in SAVED_PROPS {
            if let Some(value) = bag.get(*prop) {
                if !value.is_null() {
                    let _ = player.set_node(prop, value);
                }
            }
        }
        osd_message(player, "tvosd settings loaded");
    }
}
