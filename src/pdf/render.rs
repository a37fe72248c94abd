//! Drawing text onto a single page content stream
//!
//! Slipsheets use the standard Type1 font Times-Bold, which every PDF viewer
//! provides, so nothing has to be embedded.

use crate::layout::Margins;

/// Base font used for slipsheet text
pub const FONT_NAME: &str = "Times-Bold";

/// Resource name the content stream uses for [`FONT_NAME`]
pub const FONT_RESOURCE: &str = "F1";

/// Default designation size in points
pub const DEFAULT_FONT_SIZE: f32 = 72.0;

/// Times-Bold glyph widths for chars 32-126, in 1/1000ths of the em square
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, // space - /
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0 - 9
    333, 333, 570, 570, 570, 500, 930, // : - @
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, // A - M
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, // N - Z
    333, 278, 333, 581, 500, 333, // [ - `
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, // a - m
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, // n - z
    394, 220, 394, 520, // { - ~
];

/// Width used for characters outside the table
const FALLBACK_WIDTH: u16 = 500;

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        TIMES_BOLD_WIDTHS[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` set in Times-Bold at `font_size`
pub fn string_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c))).sum();
    units as f32 * font_size / 1000.0
}

/// Escape special characters in PDF strings
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

/// Accumulates content-stream operators for one page
#[derive(Debug, Clone)]
pub struct Canvas {
    content: String,
    margins: Margins,
    font_size: f32,
}

impl Canvas {
    pub fn new(margins: Margins) -> Self {
        Self {
            content: String::new(),
            margins,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn save_state(&mut self) {
        self.content.push_str("q\n");
    }

    pub fn restore_state(&mut self) {
        self.content.push_str("Q\n");
    }

    pub fn set_font(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Draw `text` with its baseline centred on `x`
    pub fn draw_centred_string(&mut self, x: f32, y: f32, text: &str) {
        let left = x - string_width(text, self.font_size) / 2.0;

        self.content.push_str("BT\n");
        self.content.push_str("0 g\n");
        self.content
            .push_str(&format!("/{} {} Tf\n", FONT_RESOURCE, self.font_size));
        self.content
            .push_str(&format!("1 0 0 1 {:.2} {:.2} Tm\n", left, y));
        self.content
            .push_str(&format!("({}) Tj\n", escape_pdf_string(text)));
        self.content.push_str("ET\n");
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

/// Draws the visible body of a slipsheet
pub trait PageRenderer {
    fn draw(&self, canvas: &mut Canvas, width: f32, height: f32, title: &str);
}

/// Default renderer: the title centred horizontally and vertically
#[derive(Debug, Clone, Copy)]
pub struct CenteredTitle {
    pub font_size: f32,
}

impl Default for CenteredTitle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl PageRenderer for CenteredTitle {
    fn draw(&self, canvas: &mut Canvas, width: f32, height: f32, title: &str) {
        let margins = canvas.margins();

        // Shrink long designations so they stay inside the side margins
        let available = width - 2.0 * margins.left.pt();
        let natural = string_width(title, self.font_size);
        let size = if natural > available && available > 0.0 {
            self.font_size * available / natural
        } else {
            self.font_size
        };

        // Keep the text below the top spacer on short pages
        let y = (height / 2.0).min(height - margins.top.pt() - size);

        canvas.save_state();
        canvas.set_font(size);
        canvas.draw_centred_string(width / 2.0, y, title);
        canvas.restore_state();
    }
}
