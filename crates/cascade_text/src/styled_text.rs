//! Styled text model
//!
//! A [`StyledText`] is plain content plus a list of attribute runs over byte
//! ranges. Runs may overlap; where they do, the later run wins for optional
//! fields and boolean flags are combined.
//!
//! Label-level defaults and per-run attributes meet in [`StyledText::merged`]:
//! per-run decorations (bold, italic, underline, links, language) survive, but
//! the layout-affecting attributes (font, color, alignment, line break) are
//! always taken from the label's [`TextStyle`](crate::TextStyle).

use std::hash::{Hash, Hasher};
use std::ops::Range;

use cascade_core::Color;

use crate::style::{FontDescriptor, LineBreakMode, TextAlign};

/// Attributes applied to a run of text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunAttributes {
    pub font: Option<FontDescriptor>,
    pub color: Option<Color>,
    pub align: Option<TextAlign>,
    pub line_break: Option<LineBreakMode>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: Option<String>,
    /// BCP 47 language tag
    pub language: Option<String>,
    /// Extra spacing between characters in layout units
    pub letter_spacing: Option<f32>,
}

impl RunAttributes {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Drop every attribute the label forces from its own style
    pub fn normalized(&self) -> Self {
        Self {
            font: None,
            color: None,
            align: None,
            line_break: None,
            ..self.clone()
        }
    }

    /// True when the run carries nothing that affects rendering
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Combine `other` over `self` (`other` wins for optional fields)
    pub fn overlay(&self, other: &RunAttributes) -> RunAttributes {
        RunAttributes {
            font: other.font.clone().or_else(|| self.font.clone()),
            color: other.color.or(self.color),
            align: other.align.or(self.align),
            line_break: other.line_break.or(self.line_break),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
            link: other.link.clone().or_else(|| self.link.clone()),
            language: other.language.clone().or_else(|| self.language.clone()),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
        }
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.font.as_ref().map(FontDescriptor::key).hash(state);
        self.color.map(|c| c.key()).hash(state);
        self.align.hash(state);
        self.line_break.hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.underline.hash(state);
        self.strikethrough.hash(state);
        self.link.hash(state);
        self.language.hash(state);
        self.letter_spacing.map(f32::to_bits).hash(state);
    }
}

/// A run of attributes over a byte range of the content
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub range: Range<usize>,
    pub attributes: RunAttributes,
}

/// Text content with attribute runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledText {
    content: String,
    runs: Vec<TextRun>,
}

impl StyledText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            runs: Vec::new(),
        }
    }

    /// Add an attribute run over a byte range
    ///
    /// The range is clamped to the content and snapped inward to character
    /// boundaries. Empty runs are dropped.
    pub fn with_run(mut self, range: Range<usize>, attributes: RunAttributes) -> Self {
        let mut start = range.start.min(self.content.len());
        let mut end = range.end.min(self.content.len());
        while start < end && !self.content.is_char_boundary(start) {
            start += 1;
        }
        while end > start && !self.content.is_char_boundary(end) {
            end -= 1;
        }
        if start < end {
            self.runs.push(TextRun {
                range: start..end,
                attributes,
            });
        }
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Empty or whitespace-only content
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Effective attributes at a byte offset, if any run covers it
    pub fn attributes_at(&self, offset: usize) -> Option<RunAttributes> {
        self.runs
            .iter()
            .filter(|run| run.range.contains(&offset))
            .fold(None, |acc: Option<RunAttributes>, run| {
                Some(match acc {
                    Some(base) => base.overlay(&run.attributes),
                    None => run.attributes.clone(),
                })
            })
    }

    /// Split a byte range into sub-ranges of uniform attributes
    pub fn segments(&self, range: Range<usize>) -> Vec<(Range<usize>, Option<RunAttributes>)> {
        if range.is_empty() {
            return Vec::new();
        }

        let mut cuts = vec![range.start, range.end];
        for run in &self.runs {
            for edge in [run.range.start, run.range.end] {
                if edge > range.start && edge < range.end {
                    cuts.push(edge);
                }
            }
        }
        cuts.sort_unstable();
        cuts.dedup();

        cuts.windows(2)
            .map(|w| (w[0]..w[1], self.attributes_at(w[0])))
            .collect()
    }

    /// Exact sub-range of this text, runs clipped and rebased to the slice
    pub fn slice(&self, range: Range<usize>) -> StyledText {
        let start = range.start.min(self.content.len());
        let end = range.end.clamp(start, self.content.len());
        let content = self.content.get(start..end).unwrap_or_default().to_string();

        let runs = self
            .runs
            .iter()
            .filter_map(|run| {
                let run_start = run.range.start.max(start);
                let run_end = run.range.end.min(end);
                (run_start < run_end).then(|| TextRun {
                    range: run_start - start..run_end - start,
                    attributes: run.attributes.clone(),
                })
            })
            .collect();

        StyledText { content, runs }
    }

    /// Build the text a label actually lays out
    ///
    /// Uses `explicit` when present and non-empty, otherwise `text` as plain
    /// content. Newlines are normalized to `\n`, plain runs are dropped and the
    /// layout-affecting attributes of every run are cleared so that the label's
    /// own font, color, alignment and line break apply everywhere.
    pub fn merged(explicit: Option<&StyledText>, text: &str) -> StyledText {
        let source = match explicit {
            Some(styled) if !styled.is_empty() => styled.clone(),
            _ => StyledText::new(text),
        };

        let mut merged = source.normalize_newlines();
        merged.runs = merged
            .runs
            .into_iter()
            .map(|run| TextRun {
                range: run.range,
                attributes: run.attributes.normalized(),
            })
            .filter(|run| !run.attributes.is_plain())
            .collect();
        merged
    }

    /// Fingerprint of every run (range and attributes)
    pub(crate) fn hash_runs<H: Hasher>(&self, state: &mut H) {
        self.runs.len().hash(state);
        for run in &self.runs {
            run.range.hash(state);
            run.attributes.hash_into(state);
        }
    }

    /// Replace `\r\n` and lone `\r` with `\n`, remapping run ranges
    fn normalize_newlines(self) -> StyledText {
        if !self.content.contains('\r') {
            return self;
        }

        let old = &self.content;
        let mut content = String::with_capacity(old.len());
        // old byte offset -> new byte offset
        let mut map = vec![0usize; old.len() + 1];
        let mut chars = old.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            for k in 0..ch.len_utf8() {
                map[idx + k] = content.len();
            }
            if ch == '\r' {
                if let Some(&(next_idx, '\n')) = chars.peek() {
                    map[next_idx] = content.len();
                    chars.next();
                }
                content.push('\n');
            } else {
                content.push(ch);
            }
        }
        map[old.len()] = content.len();

        let runs = self
            .runs
            .iter()
            .filter_map(|run| {
                let range = map[run.range.start]..map[run.range.end];
                (!range.is_empty()).then(|| TextRun {
                    range,
                    attributes: run.attributes.clone(),
                })
            })
            .collect();

        StyledText { content, runs }
    }
}

impl From<&str> for StyledText {
    fn from(content: &str) -> Self {
        StyledText::new(content)
    }
}

impl From<String> for StyledText {
    fn from(content: String) -> Self {
        StyledText::new(content)
    }
}
