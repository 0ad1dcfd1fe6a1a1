//! Title and playback-position overlay so paused or menu-open states show where playback is.

use crate::ass::{Alignment, AssBuilder, Rgba};
use crate::osd::OsdHandle;
use crate::player::Player;

const TITLE_FONT_SIZE: u32 = 32;
const TIME_FONT_SIZE: u32 = 24;
const BAR_HEIGHT: f64 = 5.0;

/// Script-space height the player scales overlays from; width follows the
/// current display aspect.
const OSD_SPACE_HEIGHT: f64 = 720.0;
const FALLBACK_ASPECT: f64 = 16.0 / 9.0;

const BAR_PLAYED: Rgba = Rgba::new(255, 0, 0, 200);
const BAR_REMAINING: Rgba = Rgba::new(255, 255, 255, 200);

/// Everything the indicator displays, captured in one read pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub title: String,
    pub time_pos: f64,
    pub duration: f64,
    pub fraction: f64,
    pub aspect: f64,
}

impl ProgressView {
    /// Snapshot the player, substituting defaults for anything unavailable.
    pub fn capture(player: &dyn Player) -> Self {
        Self {
            title: player
                .get_str("media-title")
                .unwrap_or_else(|_| "<unknown>".to_string()),
            time_pos: player.get_f64("time-pos").unwrap_or(0.0),
            duration: player.get_f64("duration").unwrap_or(0.0),
            fraction: player.get_f64("percent-pos").unwrap_or(0.0) / 100.0,
            aspect: player
                .get_f64("osd-dimensions/aspect")
                .unwrap_or(FALLBACK_ASPECT),
        }
    }
}

/// `H:MM:SS` when hours are in play, `M:SS` otherwise.
pub fn format_hhmmss(seconds: f64, force_hours: bool) -> String {
    let total = seconds.max(0.0).round() as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if force_hours || hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Compose the indicator payload: the two-segment bar event across the top,
/// then the centered title and `current/total` readout.
pub fn format_title_progress(view: &ProgressView) -> String {
    let width = OSD_SPACE_HEIGHT * view.aspect;
    let split = width * view.fraction.clamp(0.0, 1.0);

    let mut ass = AssBuilder::new();
    ass.align(Alignment::TopLeft);
    ass.color(BAR_REMAINING)
        .rect(split, 0.0, width - split, BAR_HEIGHT);
    ass.color(BAR_PLAYED).rect(0.0, 0.0, split, BAR_HEIGHT);
    ass.next_event();

    let show_hours = view.duration >= 3600.0;
    ass.align(Alignment::TopCenter)
        .font_size(TITLE_FONT_SIZE)
        .bold(true)
        .border(2);
    ass.text(&view.title);
    ass.font_size(TIME_FONT_SIZE).border(1);
    ass.newline();
    ass.text(&format!(
        "{}/{}",
        format_hhmmss(view.time_pos, show_hours),
        format_hhmmss(view.duration, false)
    ));
    ass.finish()
}

/// Owner of the indicator overlay; a thin shell around capture + compose.
pub struct TitleProgress {
    osd: OsdHandle,
}

impl TitleProgress {
    pub fn new(osd: OsdHandle, player: &dyn Player) -> Self {
        let mut progress = Self { osd };
        progress.update(player);
        progress
    }

    pub fn update(&mut self, player: &dyn Player) {
        let view = ProgressView::capture(player);
        self.osd.set_payload(format_title_progress(&view));
    }

    pub fn release(&mut self) {
        self.osd.release();
    }
}
