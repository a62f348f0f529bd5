//! Label-level text style
//!
//! [`TextStyle`] carries the presentation defaults of a text element: font,
//! color, paragraph alignment, line-break policy, an optional fixed line height
//! and the maximum number of visual lines.

use cascade_core::Color;

/// Font weight variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    #[default]
    Regular = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
    Black = 900,
}

impl FontWeight {
    /// Convert from numeric weight (100-900)
    pub fn from_number(weight: u16) -> Self {
        match weight {
            0..=149 => FontWeight::Thin,
            150..=249 => FontWeight::ExtraLight,
            250..=349 => FontWeight::Light,
            350..=449 => FontWeight::Regular,
            450..=549 => FontWeight::Medium,
            550..=649 => FontWeight::SemiBold,
            650..=749 => FontWeight::Bold,
            750..=849 => FontWeight::ExtraBold,
            _ => FontWeight::Black,
        }
    }

    /// Get numeric weight value
    pub fn to_number(self) -> u16 {
        self as u16
    }

    pub fn is_bold(self) -> bool {
        self.to_number() >= FontWeight::SemiBold.to_number()
    }
}

/// Font style (normal or italic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// A resolved font: family, point size, weight and style
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
        }
    }

    /// The platform UI font at the given size
    pub fn system(size: f32) -> Self {
        Self::new("system-ui", size)
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Structural identity of this font, usable as a hash key
    pub fn key(&self) -> FontKey {
        FontKey {
            family: self.family.clone(),
            size_bits: self.size.to_bits(),
            weight: self.weight,
            style: self.style,
        }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::system(17.0)
    }
}

/// Hashable font identity (size compared by bit pattern)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    family: String,
    size_bits: u32,
    weight: FontWeight,
    style: FontStyle,
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    /// Leading edge of the writing direction
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

/// How a paragraph is split into visual lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakMode {
    /// Break at word boundaries; words wider than the line fall back to characters
    #[default]
    WordWrap,
    /// Break at any character
    CharWrap,
    /// Breaks like `WordWrap`; the host clips the last visible line
    Clip,
    /// Breaks like `WordWrap`; the host draws an ellipsis on the last visible line
    TruncateTail,
}

impl LineBreakMode {
    pub fn wraps_words(self) -> bool {
        !matches!(self, LineBreakMode::CharWrap)
    }
}

/// Label-level presentation defaults
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontDescriptor,
    pub color: Color,
    pub align: TextAlign,
    pub line_break: LineBreakMode,
    /// Fixed line height in layout units (`None` = derived from the font)
    pub line_height: Option<f32>,
    /// Maximum number of visual lines (0 = unbounded)
    pub max_lines: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            color: Color::BLACK,
            align: TextAlign::Natural,
            line_break: LineBreakMode::WordWrap,
            line_height: None,
            max_lines: 0,
        }
    }
}

impl TextStyle {
    pub fn new(font: FontDescriptor) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn line_break(mut self, mode: LineBreakMode) -> Self {
        self.line_break = mode;
        self
    }

    pub fn line_height(mut self, height: f32) -> Self {
        self.line_height = Some(height);
        self
    }

    pub fn max_lines(mut self, lines: usize) -> Self {
        self.max_lines = lines;
        self
    }
}
