//! Text measurement
//!
//! Line breaking needs horizontal advances and a line height. Hosts with a real
//! shaping engine implement [`TextMeasurer`]; [`EstimatedTextMeasurer`] is a
//! deterministic fallback used when no font backend is available.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::style::{FontDescriptor, TextStyle};
use crate::styled_text::{RunAttributes, StyledText};

/// Trait for measuring text during line breaking
pub trait TextMeasurer: Send + Sync {
    /// Horizontal advance of `text` set in `font`
    ///
    /// `bold` reflects a surviving per-run bold attribute on top of the font's
    /// own weight.
    fn advance(&self, text: &str, font: &FontDescriptor, bold: bool) -> f32;

    /// Natural line height of `font`
    fn line_height(&self, font: &FontDescriptor) -> f32;

    /// Advance of a styled byte range, honoring per-run bold and letter spacing
    fn measure_range(&self, text: &StyledText, range: Range<usize>, style: &TextStyle) -> f32 {
        text.segments(range)
            .into_iter()
            .map(|(segment, attrs)| {
                let slice = &text.content()[segment];
                let attrs = attrs.unwrap_or_default();
                let advance = self.advance(slice, &style.font, attrs.bold);
                advance + letter_spacing(slice, &attrs)
            })
            .sum()
    }
}

fn letter_spacing(slice: &str, attrs: &RunAttributes) -> f32 {
    match attrs.letter_spacing {
        Some(spacing) => spacing * slice.chars().count() as f32,
        None => 0.0,
    }
}

/// A text measurer that uses estimates
///
/// Each display column is 0.55 em wide (wide CJK glyphs take two columns),
/// bold text is 5% wider and lines are 1.2 em tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    const COLUMN_EM: f32 = 0.55;
    const BOLD_FACTOR: f32 = 1.05;
    const LINE_HEIGHT_EM: f32 = 1.2;
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn advance(&self, text: &str, font: &FontDescriptor, bold: bool) -> f32 {
        let columns = text.width() as f32;
        let base = columns * font.size * Self::COLUMN_EM;
        if bold || font.weight.is_bold() {
            base * Self::BOLD_FACTOR
        } else {
            base
        }
    }

    fn line_height(&self, font: &FontDescriptor) -> f32 {
        font.size * Self::LINE_HEIGHT_EM
    }
}
