//! Memoized line layout
//!
//! [`LineLayoutCache`] maps a text element's content, style and wrap width to
//! its ordered list of visual lines. Entries are computed once per
//! [`LineCacheKey`] and never mutated afterwards; the cache is bounded and
//! evicts the least recently used entry when full.
//!
//! The cache is `Send + Sync`. The lock is held across the computation of a
//! missing entry so concurrent requests for the same key never lay it out
//! twice.

use std::hash::Hasher;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::{Arc, Mutex, PoisonError};

use cascade_core::{ColorKey, Rect};
use lru::LruCache;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::line_break::layout_lines;
use crate::measure::{EstimatedTextMeasurer, TextMeasurer};
use crate::style::{FontKey, LineBreakMode, TextAlign, TextStyle};
use crate::styled_text::StyledText;

/// One visual line: its styled content and its box inside the text block
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// Exact styled sub-range covered by this line
    pub content: StyledText,
    /// Byte range of the line within the merged text
    pub range: Range<usize>,
    /// `origin.y` is the offset from the top of the block; width is the wrap width
    pub bounds: Rect,
}

/// Everything the cache needs to know about a text element
#[derive(Debug, Clone, Default)]
pub struct LayoutRequest {
    /// Plain text, used when `attributed` is absent or empty
    pub text: String,
    /// Rich text set on the element, if any
    pub attributed: Option<StyledText>,
    /// Label-level presentation defaults
    pub style: TextStyle,
    /// Width available for wrapping
    pub wrap_width: f32,
}

impl LayoutRequest {
    pub fn plain(text: impl Into<String>, style: TextStyle, wrap_width: f32) -> Self {
        Self {
            text: text.into(),
            attributed: None,
            style,
            wrap_width,
        }
    }

    pub fn styled(text: StyledText, style: TextStyle, wrap_width: f32) -> Self {
        Self {
            text: String::new(),
            attributed: Some(text),
            style,
            wrap_width,
        }
    }
}

/// Structural memoization key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineCacheKey {
    text: String,
    runs: u64,
    font: FontKey,
    width: i32,
    align: TextAlign,
    line_break: LineBreakMode,
    line_height: Option<u32>,
    color: ColorKey,
    max_lines: usize,
}

impl LineCacheKey {
    /// Key for already merged text; `width` is the rounded wrap width
    pub fn new(merged: &StyledText, style: &TextStyle, width: i32) -> Self {
        let mut hasher = FxHasher::default();
        merged.hash_runs(&mut hasher);

        Self {
            text: merged.content().to_string(),
            runs: hasher.finish(),
            font: style.font.key(),
            width,
            align: style.align,
            line_break: style.line_break,
            line_height: style.line_height.map(f32::to_bits),
            color: style.color.key(),
            max_lines: style.max_lines,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }
}

/// Cache sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCacheConfig {
    /// Maximum number of distinct layouts kept
    pub capacity: usize,
}

impl LayoutCacheConfig {
    pub const DEFAULT_CAPACITY: usize = 256;
}

impl Default for LayoutCacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

/// Counters for cache behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

struct CacheInner {
    entries: LruCache<LineCacheKey, Arc<[LineRecord]>>,
    hits: u64,
    misses: u64,
}

/// Bounded LRU cache of line layouts
pub struct LineLayoutCache {
    inner: Mutex<CacheInner>,
    measurer: Arc<dyn TextMeasurer>,
}

impl LineLayoutCache {
    /// Cache with the estimated measurer
    pub fn new(config: LayoutCacheConfig) -> Self {
        Self::with_measurer(config, Arc::new(EstimatedTextMeasurer))
    }

    /// Cache backed by a host-provided measurer
    ///
    /// A zero capacity is raised to one.
    pub fn with_measurer(config: LayoutCacheConfig, measurer: Arc<dyn TextMeasurer>) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
            measurer,
        }
    }

    /// Ordered visual lines for a text element
    ///
    /// Returns an empty list for blank text or a wrap width that rounds to
    /// zero or less; those requests never touch the cache.
    pub fn lines_for(&self, request: &LayoutRequest) -> Arc<[LineRecord]> {
        let width = if request.wrap_width.is_finite() {
            request.wrap_width.round() as i32
        } else {
            0
        };
        if width <= 0 {
            tracing::trace!(wrap_width = request.wrap_width, "line layout: degenerate width");
            return Arc::from(Vec::new());
        }

        let merged = StyledText::merged(request.attributed.as_ref(), &request.text);
        if merged.is_blank() {
            tracing::trace!("line layout: blank text");
            return Arc::from(Vec::new());
        }

        let key = LineCacheKey::new(&merged, &request.style, width);
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(lines) = inner.entries.get(&key) {
            let lines = Arc::clone(lines);
            inner.hits += 1;
            tracing::trace!(width, lines = lines.len(), "line layout: cache hit");
            return lines;
        }

        let lines: Arc<[LineRecord]> = Arc::from(layout_lines(
            &merged,
            &request.style,
            width as f32,
            self.measurer.as_ref(),
        ));
        inner.misses += 1;
        tracing::trace!(width, lines = lines.len(), "line layout: computed");

        if let Some((evicted, _)) = inner.entries.push(key, Arc::clone(&lines)) {
            tracing::trace!(width = evicted.width(), "line layout: evicted entry");
        }
        lines
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
            capacity: inner.entries.cap().get(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.stats().capacity
    }

    /// Drop every entry; counters are kept
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clear();
    }
}

impl Default for LineLayoutCache {
    fn default() -> Self {
        Self::new(LayoutCacheConfig::default())
    }
}

impl std::fmt::Debug for LineLayoutCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineLayoutCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
