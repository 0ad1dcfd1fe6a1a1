//! Menu composer so selection state maps to one stable overlay payload.

use crate::ass::{Alignment, AssBuilder};

use super::item::MenuItem;

const MENU_FONT_SIZE: u32 = 22;
const MENU_BORDER: u32 = 1;
const SELECTED_BORDER: u32 = 2;

/// Blank lines above the first row, clearing the progress indicator area.
const TOP_MARGIN_LINES: usize = 6;

/// Compose the full menu payload from the gap-annotated sequence.
///
/// Rows are decorated inside-out: value suffix, press brackets, adjust
/// markers. The selected row gets bold plus a heavier border. Values are
/// rendered fresh on every call.
pub fn format_menu(items: &[(usize, MenuItem)], selected: usize) -> String {
    let mut ass = AssBuilder::new();
    ass.align(Alignment::TopLeft)
        .font_size(MENU_FONT_SIZE)
        .border(MENU_BORDER);
    ass.newlines(TOP_MARGIN_LINES);
    for (index, (gaps, item)) in items.iter().enumerate() {
        ass.newlines(*gaps);
        let is_selected = index == selected;
        if is_selected {
            ass.bold(true).border(SELECTED_BORDER);
        }
        ass.text(&format_row(item));
        ass.newline();
        if is_selected {
            ass.bold(false).border(MENU_BORDER);
        }
    }
    ass.finish()
}

fn format_row(item: &MenuItem) -> String {
    let mut row = item.title().to_string();
    if let Some(value) = item.value() {
        row.push_str(&format!(" ({})", value.render()));
    }
    if item.is_actionable() {
        row = format!("[ {row} ]");
    }
    if item.is_adjustable() {
        row = format!("[<] {row} [>]");
    }
    row
}
