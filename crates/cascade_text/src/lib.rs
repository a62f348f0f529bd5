//! Line layout for Cascade
//!
//! This crate turns a styled text block and a wrap width into an ordered list
//! of visual lines, each carrying its exact styled sub-range and its bounding
//! box inside the block:
//!
//! - Styled text model with label-level defaults merged over per-run attributes
//! - Text measurement (pluggable via [`TextMeasurer`])
//! - Greedy word wrapping over Unicode line break opportunities
//! - A bounded, thread-safe LRU cache keyed by the structural [`LineCacheKey`]

pub mod cache;
pub mod line_break;
pub mod measure;
pub mod style;
pub mod styled_text;

pub use cache::{
    CacheStats, LayoutCacheConfig, LayoutRequest, LineCacheKey, LineLayoutCache, LineRecord,
};
pub use line_break::{layout_lines, LineBreaker};
pub use measure::{EstimatedTextMeasurer, TextMeasurer};
pub use style::{FontDescriptor, FontKey, FontStyle, FontWeight, LineBreakMode, TextAlign, TextStyle};
pub use styled_text::{RunAttributes, StyledText, TextRun};
