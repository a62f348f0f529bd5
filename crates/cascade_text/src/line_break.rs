//! Line breaking
//!
//! Greedy line filling over Unicode (UAX #14) break opportunities:
//!
//! - A mandatory break (newline, end of text) always ends the current line
//! - Otherwise the line takes as many words as fit in the wrap width
//! - A single word wider than the wrap width is split between characters
//! - Trailing whitespace stays in the line's range but does not count toward
//!   its width
//! - `max_lines` (when non-zero) truncates the result

use std::ops::Range;

use cascade_core::Rect;
use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::cache::LineRecord;
use crate::measure::TextMeasurer;
use crate::style::TextStyle;
use crate::styled_text::StyledText;

/// Tolerance for floating point width comparisons
const WIDTH_EPSILON: f32 = 0.01;

/// Splits styled text into visual lines at a fixed wrap width
pub struct LineBreaker<'a> {
    measurer: &'a dyn TextMeasurer,
    max_width: f32,
}

impl<'a> LineBreaker<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, max_width: f32) -> Self {
        Self {
            measurer,
            max_width,
        }
    }

    /// Byte ranges of each visual line, top to bottom
    pub fn break_lines(&self, text: &StyledText, style: &TextStyle) -> Vec<Range<usize>> {
        let content = text.content();
        if content.is_empty() || self.max_width <= 0.0 {
            return Vec::new();
        }

        let opportunities: Vec<(usize, BreakOpportunity)> = if style.line_break.wraps_words() {
            linebreaks(content).collect()
        } else {
            // Character wrapping: every character boundary is allowed, newlines stay mandatory
            char_opportunities(content)
        };

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut cursor = 0;

        while line_start < content.len() {
            if style.max_lines > 0 && lines.len() >= style.max_lines {
                break;
            }

            while cursor < opportunities.len() && opportunities[cursor].0 <= line_start {
                cursor += 1;
            }

            let mut line_end = None;
            let mut scan = cursor;
            while scan < opportunities.len() {
                let (pos, kind) = opportunities[scan];
                if !self.fits(text, line_start..pos, style) {
                    break;
                }
                line_end = Some(pos);
                scan += 1;
                if kind == BreakOpportunity::Mandatory {
                    break;
                }
            }

            let end = match line_end {
                Some(end) => end,
                None => {
                    let limit = opportunities
                        .get(cursor)
                        .map(|&(pos, _)| pos)
                        .unwrap_or(content.len());
                    self.fill_chars(text, line_start, limit, style)
                }
            };

            lines.push(line_start..end);
            line_start = end;
        }

        lines
    }

    /// Width of a range, ignoring trailing whitespace
    fn visible_width(&self, text: &StyledText, range: Range<usize>, style: &TextStyle) -> f32 {
        let slice = &text.content()[range.clone()];
        let visible_end = range.start + slice.trim_end().len();
        self.measurer
            .measure_range(text, range.start..visible_end, style)
    }

    fn fits(&self, text: &StyledText, range: Range<usize>, style: &TextStyle) -> bool {
        self.visible_width(text, range, style) <= self.max_width + WIDTH_EPSILON
    }

    /// Longest prefix of `start..limit` that fits, at least one character
    fn fill_chars(&self, text: &StyledText, start: usize, limit: usize, style: &TextStyle) -> usize {
        let content = text.content();
        let mut end = start;
        for (offset, ch) in content[start..limit].char_indices() {
            let next = start + offset + ch.len_utf8();
            if end > start && !self.fits(text, start..next, style) {
                break;
            }
            end = next;
        }
        if end == start {
            limit
        } else {
            end
        }
    }
}

fn char_opportunities(content: &str) -> Vec<(usize, BreakOpportunity)> {
    content
        .char_indices()
        .map(|(idx, ch)| {
            let pos = idx + ch.len_utf8();
            let kind = if ch == '\n' || pos == content.len() {
                BreakOpportunity::Mandatory
            } else {
                BreakOpportunity::Allowed
            };
            (pos, kind)
        })
        .collect()
}

/// Break `text` into positioned line records
///
/// Each record holds the exact styled sub-range of its line and a box at the
/// line's vertical offset, spanning the full wrap width.
pub fn layout_lines(
    text: &StyledText,
    style: &TextStyle,
    wrap_width: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<LineRecord> {
    let ranges = LineBreaker::new(measurer, wrap_width).break_lines(text, style);
    let line_height = style
        .line_height
        .unwrap_or_else(|| measurer.line_height(&style.font));

    ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| LineRecord {
            content: text.slice(range.clone()),
            range,
            bounds: Rect::new(0.0, index as f32 * line_height, wrap_width, line_height),
        })
        .collect()
}
