//! User command and preset configuration so menu extras load from one optional file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Map;

/// A named raw input command shown under the `Command` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCommand {
    pub name: String,
    pub cmd: String,
}

/// A named property value for the filter/shader items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPreset {
    pub name: String,
    pub value: String,
}

/// Menu extras from the config file. Missing file or malformed content
/// degrades to empty lists; declaration order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuConfig {
    pub commands: Vec<UserCommand>,
    pub audio_filters: Vec<NamedPreset>,
    pub shaders: Vec<NamedPreset>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    commands: Map<String, serde_json::Value>,
    #[serde(default, rename = "audio-filters")]
    audio_filters: Map<String, serde_json::Value>,
    #[serde(default)]
    shaders: Map<String, serde_json::Value>,
}

impl MenuConfig {
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(body) => match serde_json::from_str::<RawConfig>(&body) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "unparseable config: {err}");
                    RawConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(path = %path.display(), "no config file");
                RawConfig::default()
            }
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Self {
        let text_entries = |map: Map<String, serde_json::Value>| {
            map.into_iter()
                .filter_map(|(name, value)| value.as_str().map(|text| (name, text.to_string())))
                .collect::<Vec<_>>()
        };
        Self {
            commands: text_entries(raw.commands)
                .into_iter()
                .map(|(name, cmd)| UserCommand { name, cmd })
                .collect(),
            audio_filters: text_entries(raw.audio_filters)
                .into_iter()
                .map(|(name, value)| NamedPreset { name, value })
                .collect(),
            shaders: text_entries(raw.shaders)
                .into_iter()
                .map(|(name, value)| NamedPreset { name, value })
                .collect(),
        }
    }
}
