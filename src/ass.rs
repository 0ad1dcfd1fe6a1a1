//! ASS override-tag assembly so overlay payloads stay centralized and consistent.
//!
//! mpv's `osd-overlay` command takes `ass-events` data: one event per physical
//! line, `\N` for soft breaks inside an event, `{\...}` override tags inline.

/// Numpad-style event alignment (`\an` tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    BottomLeft = 1,
    BottomCenter = 2,
    BottomRight = 3,
    MiddleLeft = 4,
    Center = 5,
    MiddleRight = 6,
    TopLeft = 7,
    TopCenter = 8,
    TopRight = 9,
}

/// Primary fill color plus opacity (0 transparent, 255 opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Default)]
pub struct AssBuilder {
    buf: String,
}

impl AssBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.tag(&format!("\\an{}", alignment as u8))
    }

    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.tag(&format!("\\fs{size}"))
    }

    pub fn bold(&mut self, enabled: bool) -> &mut Self {
        self.tag(if enabled { "\\b1" } else { "\\b0" })
    }

    pub fn border(&mut self, width: u32) -> &mut Self {
        self.tag(&format!("\\bord{width}"))
    }

    /// ASS stores color as BGR and alpha as transparency, inverted from `Rgba`.
    pub fn color(&mut self, color: Rgba) -> &mut Self {
        self.tag(&format!(
            "\\1c&H{:02X}{:02X}{:02X}&",
            color.b, color.g, color.r
        ));
        self.tag(&format!("\\1a&H{:02X}&", 255 - color.a))
    }

    /// Append literal text; embedded newlines become soft breaks.
    pub fn text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            match ch {
                '\n' => self.buf.push_str("\\N"),
                '{' => self.buf.push_str("\\{"),
                '}' => self.buf.push_str("\\}"),
                _ => self.buf.push(ch),
            }
        }
        self
    }

    /// Soft break inside the current event.
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push_str("\\N");
        self
    }

    pub fn newlines(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.newline();
        }
        self
    }

    /// Terminate the current event; later output starts a new one.
    pub fn next_event(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Axis-aligned rectangle in script coordinates via vector drawing mode.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.tag("\\p1");
        self.buf.push_str(&format!(
            "m {x} {y} l {rx} {y} l {rx} {by} l {x} {by}",
            rx = x + w,
            by = y + h,
        ));
        self.tag("\\p0")
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn tag(&mut self, tag: &str) -> &mut Self {
        self.buf.push('{');
        self.buf.push_str(tag);
        self.buf.push('}');
        self
    }
}
