//! Timeline orchestration
//!
//! A [`Timeline`] groups animations that share one clock. Each entry has its
//! own start offset and duration inside the timeline's span; values are read
//! by entry id after ticking.
//!
//! Playback can be paused, reversed and resumed at any point. Reversal keeps
//! the current time, so every entry retraces its path from its current
//! interpolated value instead of jumping. A finished run reports where it
//! stopped exactly once through [`Timeline::take_completion`].

use crate::easing::Easing;

/// Handle to an entry inside a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

/// Where a finished run came to rest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionPosition {
    /// Played forward to the end of the span
    End,
    /// Played backward to the beginning of the span
    Start,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayState {
    Idle,
    Playing,
    Paused,
    Finished,
}

#[derive(Clone, Debug)]
struct TimelineEntry {
    offset_ms: f32,
    duration_ms: f32,
    start_value: f32,
    end_value: f32,
    easing: Easing,
}

impl TimelineEntry {
    fn end_ms(&self) -> f32 {
        self.offset_ms + self.duration_ms.max(0.0)
    }

    fn progress_at(&self, time_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if time_ms >= self.offset_ms { 1.0 } else { 0.0 };
        }
        ((time_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    fn value_at(&self, time_ms: f32) -> f32 {
        let eased = self.easing.apply(self.progress_at(time_ms));
        self.start_value + (self.end_value - self.start_value) * eased
    }
}

/// A group of animations driven by one clock
#[derive(Clone, Debug)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    /// Minimum span in ms; the effective span also covers every entry
    span_ms: f32,
    current_ms: f32,
    reversed: bool,
    state: PlayState,
    completion: Option<CompletionPosition>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_span(0.0)
    }

    /// Timeline whose span is at least `span_ms`, even if entries end earlier
    pub fn with_span(span_ms: f32) -> Self {
        Self {
            entries: Vec::new(),
            span_ms: span_ms.max(0.0),
            current_ms: 0.0,
            reversed: false,
            state: PlayState::Idle,
            completion: None,
        }
    }

    /// Add a linearly interpolated entry
    pub fn add(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        start_value: f32,
        end_value: f32,
    ) -> TimelineEntryId {
        self.add_with_easing(offset_ms, duration_ms, start_value, end_value, Easing::Linear)
    }

    /// Add an entry with a specific easing function
    pub fn add_with_easing(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        let id = TimelineEntryId(self.entries.len());
        self.entries.push(TimelineEntry {
            offset_ms: offset_ms.max(0.0),
            duration_ms,
            start_value,
            end_value,
            easing,
        });
        id
    }

    /// Total span in milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.entries
            .iter()
            .map(TimelineEntry::end_ms)
            .fold(self.span_ms, f32::max)
    }

    /// Play forward from the beginning
    pub fn start(&mut self) {
        self.current_ms = 0.0;
        self.reversed = false;
        self.state = PlayState::Playing;
        self.completion = None;
    }

    /// Stop and rewind without reporting completion
    pub fn stop(&mut self) {
        self.current_ms = 0.0;
        self.state = PlayState::Idle;
        self.completion = None;
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Flip the playback direction, keeping the current time
    ///
    /// A finished timeline starts playing back toward the opposite end.
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
        if self.state == PlayState::Finished {
            self.state = PlayState::Playing;
            self.completion = None;
        }
    }

    /// Jump to the end of the current direction and finish the run
    pub fn finish(&mut self) {
        if self.state == PlayState::Idle {
            return;
        }
        if self.state != PlayState::Finished {
            self.complete();
        }
    }

    /// Advance the clock
    pub fn tick(&mut self, dt_ms: f32) {
        if self.state != PlayState::Playing {
            return;
        }

        let step = dt_ms.max(0.0);
        let duration = self.duration_ms();

        if self.reversed {
            self.current_ms -= step;
            if self.current_ms <= 0.0 {
                self.complete();
            }
        } else {
            self.current_ms += step;
            if self.current_ms >= duration {
                self.complete();
            }
        }
    }

    fn complete(&mut self) {
        if self.reversed {
            self.current_ms = 0.0;
            self.completion = Some(CompletionPosition::Start);
        } else {
            self.current_ms = self.duration_ms();
            self.completion = Some(CompletionPosition::End);
        }
        self.state = PlayState::Finished;
    }

    /// Completion of the last run, reported once
    pub fn take_completion(&mut self) -> Option<CompletionPosition> {
        self.completion.take()
    }

    /// Current value of an entry
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries
            .get(id.0)
            .map(|entry| entry.value_at(self.current_ms))
    }

    /// Overall progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return if self.state == PlayState::Finished && !self.reversed {
                1.0
            } else {
                0.0
            };
        }
        (self.current_ms / duration).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
