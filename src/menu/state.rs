//! Menu controller so directional input maps to selection moves and item handlers.

use crate::osd::OsdHandle;

use super::item::{partition, MenuEntry, MenuItem};
use super::render::format_menu;

/// The five navigation events a remote-style input device produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

/// Open menu instance: gap-annotated items, selection, and the overlay it
/// exclusively owns. Dropping the menu releases the overlay.
pub struct Menu {
    items: Vec<(usize, MenuItem)>,
    selected: usize,
    osd: OsdHandle,
}

impl Menu {
    /// Build from declared entries and render once. An empty list is legal;
    /// it renders without a visible selection and ignores navigation.
    pub fn new(entries: Vec<MenuEntry>, osd: OsdHandle) -> Self {
        let mut menu = Self {
            items: partition(entries),
            selected: 0,
            osd,
        };
        menu.update();
        menu
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dispatch one navigation event.
    ///
    /// Up/Down wrap around; Left/Right/Enter go to the selected item's
    /// handlers when present and are no-ops otherwise. Every event ends with
    /// a full re-render so live values stay current even after a no-op.
    /// Handler faults are not caught here.
    pub fn handle_key(&mut self, key: NavKey) {
        if !self.items.is_empty() {
            let len = self.items.len();
            let item = &mut self.items[self.selected].1;
            match key {
                NavKey::Up => self.selected = (self.selected + len - 1) % len,
                NavKey::Down => self.selected = (self.selected + 1) % len,
                NavKey::Left => item.adjust(-1),
                NavKey::Right => item.adjust(1),
                NavKey::Enter => item.press(),
            }
        }
        self.update();
    }

    /// Recompose and push the overlay payload.
    pub fn update(&mut self) {
        let payload = format_menu(&self.items, self.selected);
        self.osd.set_payload(payload);
    }

    /// Release the owned overlay. Safe to call more than once.
    pub fn release(&mut self) {
        self.osd.release();
    }
}
