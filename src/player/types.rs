//! Track and chapter list models so list-valued properties parse once, leniently.

use serde::Deserialize;
use serde_json::Value;

use super::Player;

/// One entry of the player's `track-list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

/// One entry of the player's `chapter-list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time: f64,
}

/// Malformed or missing list data degrades to an empty list.
pub fn parse_tracks(node: Value) -> Vec<Track> {
    serde_json::from_value(node).unwrap_or_default()
}

pub fn parse_chapters(node: Value) -> Vec<Chapter> {
    serde_json::from_value(node).unwrap_or_default()
}

fn tracks_of_kind(player: &dyn Player, kind: &str) -> usize {
    let tracks = parse_tracks(player.get_node("track-list").unwrap_or(Value::Null));
    tracks.iter().filter(|track| track.kind == kind).count()
}

/// Human-readable summary of the current track of a kind: optional title and
/// language, then `id/count`. `N/A` when no track of that kind exists.
pub fn track_display(player: &dyn Player, kind: &str) -> String {
    let count = tracks_of_kind(player, kind);
    if count == 0 {
        return "N/A".to_string();
    }
    let id = player.get_str(kind).unwrap_or_else(|_| "no".to_string());
    let mut out = String::new();
    if let Ok(title) = player.get_str(&format!("current-tracks/{kind}/title")) {
        out.push_str(&title);
        out.push(' ');
    }
    if let Ok(lang) = player.get_str(&format!("current-tracks/{kind}/lang")) {
        out.push_str(&lang);
        out.push(' ');
    }
    out.push_str(&format!("{id}/{count}"));
    out
}

/// Step the selected track of a kind, cycling through `no, 1, .., count`.
pub fn cycle_track(player: &dyn Player, kind: &str, direction: i32) {
    let count = tracks_of_kind(player, kind) as i64;
    let current = match player.get_str(kind).as_deref() {
        Ok("no") | Err(_) => 0,
        Ok(id) => id.parse::<i64>().unwrap_or(0),
    };
    let next = (current + count + 1 + i64::from(direction)) % (count + 1);
    let value = if next == 0 {
        "no".to_string()
    } else {
        next.to_string()
    };
    let _ = player.set_str(kind, &value);
}
