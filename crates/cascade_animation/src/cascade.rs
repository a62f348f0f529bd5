//! Cascade scheduling
//!
//! Spreads the lines of a block over one overall duration: each line animates
//! for the same length of time, and line start times are spaced evenly across
//! the cascade window so the last line finishes exactly at the end.
//!
//! ```text
//! total = 0.56s, fraction = 0.45, 3 lines
//!
//! line 0  |=========|
//! line 1      |=========|
//! line 2          |=========|
//!         0     0.126  0.252   0.56
//! ```

use crate::easing::Easing;
use crate::spring::{SpringConfig, SpringCurve};

/// Per-line timing of a cascade
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeTimeline {
    line_count: usize,
    total_duration: f32,
    cascade_fraction: f32,
    curve: SpringCurve,
}

impl CascadeTimeline {
    pub const DEFAULT_TOTAL_DURATION: f32 = 0.56;
    pub const DEFAULT_CASCADE_FRACTION: f32 = 0.45;

    /// Build the timing for `line_count` lines with the shared cascade spring
    ///
    /// `total_duration` is in seconds. `cascade_fraction` is expected in
    /// `[0, 1)`; other values are not rejected and give stretched or
    /// overlapping timings.
    pub fn build(line_count: usize, total_duration: f32, cascade_fraction: f32) -> Self {
        Self {
            line_count,
            total_duration,
            cascade_fraction,
            curve: SpringCurve::new(SpringConfig::cascade()),
        }
    }

    /// Replace the shared timing curve
    pub fn with_curve(mut self, curve: SpringCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn cascade_fraction(&self) -> f32 {
        self.cascade_fraction
    }

    /// Time each line spends animating, in seconds
    pub fn per_line_duration(&self) -> f32 {
        self.total_duration * (1.0 - self.cascade_fraction)
    }

    /// Span over which line start times are spread, in seconds
    pub fn cascade_window(&self) -> f32 {
        self.total_duration * self.cascade_fraction
    }

    /// Start time of line `index`, in seconds
    pub fn delay(&self, index: usize) -> f32 {
        if self.line_count <= 1 {
            return 0.0;
        }
        let gaps = (self.line_count - 1) as f32;
        self.cascade_window() * index as f32 / gaps
    }

    /// Start time of line `index` as a fraction of the total duration
    pub fn start_fraction(&self, index: usize) -> f32 {
        if self.total_duration <= 0.0 {
            return 0.0;
        }
        self.delay(index) / self.total_duration
    }

    pub fn delays(&self) -> Vec<f32> {
        (0..self.line_count).map(|i| self.delay(i)).collect()
    }

    /// Time at which the last line settles, in seconds
    pub fn end_time(&self) -> f32 {
        match self.line_count {
            0 => 0.0,
            n => self.delay(n - 1) + self.per_line_duration(),
        }
    }

    pub fn total_duration_ms(&self) -> f32 {
        self.total_duration * 1000.0
    }

    pub fn per_line_duration_ms(&self) -> f32 {
        self.per_line_duration() * 1000.0
    }

    pub fn delay_ms(&self, index: usize) -> f32 {
        self.delay(index) * 1000.0
    }

    /// The timing curve shared by every line
    pub fn curve(&self) -> SpringCurve {
        self.curve
    }

    pub fn easing(&self) -> Easing {
        Easing::Spring(self.curve)
    }
}
