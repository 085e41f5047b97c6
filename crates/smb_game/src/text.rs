//! Word-wrapped text placement and the name entry field.
//!
//! Layout only decides where each line goes; drawing glyphs is up to the
//! presentation layer, which also supplies the font metrics.

use glam::Vec2;
use smb_core::Rect;

/// Measures rendered text. Implemented by whatever owns the font.
pub trait GlyphMetrics {
    fn text_size(&self, text: &str) -> Vec2;
}

/// Fixed advance per character. Good enough for the headless runner and tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 18.0,
            line_height: 36.0,
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(self.advance * text.chars().count() as f32, self.line_height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Top-left of the line, relative to the layout box.
    pub position: Vec2,
}

/// Wrap `text` into `bounds`, honouring explicit line breaks.
pub fn layout_text(
    text: &str,
    metrics: &impl GlyphMetrics,
    bounds: &Rect,
    justify: Justify,
) -> Result<Vec<TextLine>, String> {
    let mut wrapped = Vec::new();
    for requested in text.lines() {
        if metrics.text_size(requested).x <= bounds.width {
            wrapped.push(requested.to_string());
            continue;
        }
        let words: Vec<&str> = requested.split(' ').collect();
        if let Some(word) = words
            .iter()
            .find(|word| metrics.text_size(word).x >= bounds.width)
        {
            return Err(format!("The word '{word}' is too long to fit in the box"));
        }
        let mut line = String::new();
        for word in words {
            let candidate = format!("{line}{word} ");
            if metrics.text_size(candidate.trim_end()).x < bounds.width {
                line = candidate;
            } else {
                if !line.is_empty() {
                    wrapped.push(line.trim_end().to_string());
                }
                line = format!("{word} ");
            }
        }
        wrapped.push(line.trim_end().to_string());
    }

    let mut lines = Vec::with_capacity(wrapped.len());
    let mut y = 0.0;
    for text in wrapped {
        let size = metrics.text_size(&text);
        if y + size.y >= bounds.height {
            return Err("Wrapped text is too tall to fit in the box".to_string());
        }
        let x = match justify {
            Justify::Left => 0.0,
            Justify::Center => (bounds.width - size.x) / 2.0,
            Justify::Right => bounds.width - size.x,
        };
        lines.push(TextLine {
            text,
            position: Vec2::new(x, y),
        });
        y += size.y;
    }
    Ok(lines)
}

const CURSOR_BLINK_TICKS: u32 = 24;

/// Single-line text field used for entering a record name.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    max_len: usize,
    ticks: u32,
}

impl TextInput {
    pub fn new(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len,
            ticks: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Feed one tick of typed text and backspaces.
    pub fn update(&mut self, typed: &str, backspace: bool) {
        self.ticks = self.ticks.wrapping_add(1);
        if backspace {
            self.value.pop();
        }
        for ch in typed.chars().filter(|c| !c.is_control()) {
            if self.value.chars().count() >= self.max_len {
                break;
            }
            self.value.push(ch);
        }
    }

    pub fn cursor_visible(&self) -> bool {
        (self.ticks / CURSOR_BLINK_TICKS) % 2 == 0
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.ticks = 0;
    }
}
