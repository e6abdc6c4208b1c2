//! Reader presentation settings: font size, line height, and font family.
//!
//! The terminal has no real fonts, so these settings drive the character
//! grid the layout engine measures against. A larger font size means fewer
//! cells per rendered line, which can change how many columns a text page
//! needs, exactly as it would in a print view.

use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u16 = 12;
pub const MAX_FONT_SIZE: u16 = 32;
pub const FONT_SIZE_STEP: u16 = 2;

pub const MIN_LINE_HEIGHT: f32 = 1.2;
pub const MAX_LINE_HEIGHT: f32 = 2.4;
pub const LINE_HEIGHT_STEP: f32 = 0.2;

/// Typeface choice for the reading surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Serif,
    Sans,
    Mono,
}

impl FontFamily {
    /// Average glyph advance in em units, used when measuring text width.
    pub fn advance_em(&self) -> f32 {
        match self {
            FontFamily::Serif => 0.50,
            FontFamily::Sans => 0.52,
            FontFamily::Mono => 0.60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FontFamily::Serif => "Serif",
            FontFamily::Sans => "Sans",
            FontFamily::Mono => "Mono",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FontFamily::Serif => FontFamily::Sans,
            FontFamily::Sans => FontFamily::Mono,
            FontFamily::Mono => FontFamily::Serif,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default = "default_font_family")]
    pub font_family: FontFamily,
}

fn default_font_size() -> u16 {
    18
}

fn default_line_height() -> f32 {
    1.8
}

fn default_font_family() -> FontFamily {
    FontFamily::Serif
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            line_height: default_line_height(),
            font_family: default_font_family(),
        }
    }
}

impl ReaderSettings {
    /// Character advance in pixels for the current size and family.
    pub fn advance_px(&self) -> f32 {
        f32::from(self.font_size) * self.font_family.advance_em()
    }

    /// Line box height in pixels.
    pub fn line_height_px(&self) -> f32 {
        f32::from(self.font_size) * self.line_height
    }

    /// Returns true when the size actually changed.
    pub fn increase_font(&mut self) -> bool {
        if self.font_size + FONT_SIZE_STEP <= MAX_FONT_SIZE {
            self.font_size += FONT_SIZE_STEP;
            true
        } else {
            false
        }
    }

    pub fn decrease_font(&mut self) -> bool {
        if self.font_size >= MIN_FONT_SIZE + FONT_SIZE_STEP {
            self.font_size -= FONT_SIZE_STEP;
            true
        } else {
            false
        }
    }

    pub fn loosen_line_height(&mut self) -> bool {
        let next = self.line_height + LINE_HEIGHT_STEP;
        if next <= MAX_LINE_HEIGHT + f32::EPSILON {
            self.line_height = next;
            true
        } else {
            false
        }
    }

    pub fn tighten_line_height(&mut self) -> bool {
        let next = self.line_height - LINE_HEIGHT_STEP;
        if next >= MIN_LINE_HEIGHT - f32::EPSILON {
            self.line_height = next;
            true
        } else {
            false
        }
    }

    pub fn cycle_family(&mut self) {
        self.font_family = self.font_family.next();
    }
}
