//! Animation scheduler
//!
//! Owns every registered [`Timeline`] and advances them together. The host
//! drives the clock: call [`AnimationScheduler::tick`] once per frame (or
//! [`AnimationScheduler::tick_by`] with an explicit step), then read values.
//!
//! Animation owners hold a [`SchedulerHandle`], a weak reference that never
//! keeps the scheduler alive. [`AnimatedTimeline`] wraps a registered timeline
//! and removes it from the scheduler when dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::timeline::{CompletionPosition, Timeline, TimelineEntryId};

new_key_type! {
    pub struct TimelineId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, Timeline>,
    last_frame: Instant,
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The animation scheduler that ticks all registered timelines
///
/// Typically held by the host's frame loop and shared with animation owners
/// through [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timelines: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a weak handle for registering animations
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance every timeline by the wall-clock time since the previous tick
    ///
    /// Returns true if any timeline is still playing.
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        Self::advance(&mut inner, dt_ms)
    }

    /// Advance every timeline by a fixed step
    ///
    /// Returns true if any timeline is still playing.
    pub fn tick_by(&self, dt: Duration) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        Self::advance(&mut inner, dt.as_secs_f32() * 1000.0)
    }

    fn advance(inner: &mut SchedulerInner, dt_ms: f32) -> bool {
        // Timelines are only removed when their owners drop them, so a
        // finished run can still be reversed or restarted.
        for (_, timeline) in inner.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }
        inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Check if any timeline is still playing
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner)
            .timelines
            .iter()
            .any(|(_, t)| t.is_playing())
    }

    /// Number of registered timelines
    pub fn timeline_count(&self) -> usize {
        lock(&self.inner).timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the scheduler
///
/// Every operation is a no-op (or returns `None`) once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timelines.insert(timeline))
    }

    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |timeline| timeline.is_playing())
            .unwrap_or(false)
    }

    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).timelines.remove(id);
        }
    }

    /// Run a closure against a registered timeline
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        guard.timelines.get_mut(id).map(f)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// A timeline registered with the scheduler
///
/// Removed from the scheduler when dropped. If the scheduler was already gone
/// at construction, every operation is a no-op and [`is_registered`] is false.
///
/// [`is_registered`]: AnimatedTimeline::is_registered
pub struct AnimatedTimeline {
    handle: SchedulerHandle,
    timeline_id: Option<TimelineId>,
}

impl AnimatedTimeline {
    /// Register an empty timeline whose span is at least `span_ms`
    pub fn new(handle: SchedulerHandle, span_ms: f32) -> Self {
        let timeline_id = handle.register_timeline(Timeline::with_span(span_ms));
        if timeline_id.is_none() {
            tracing::debug!("scheduler dropped, timeline not registered");
        }
        Self {
            handle,
            timeline_id,
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Timeline) -> R) -> Option<R> {
        let id = self.timeline_id?;
        self.handle.with_timeline(id, f)
    }

    pub fn is_registered(&self) -> bool {
        self.with(|_| ()).is_some()
    }

    pub fn add(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        start_value: f32,
        end_value: f32,
    ) -> Option<TimelineEntryId> {
        self.with(|timeline| timeline.add(offset_ms, duration_ms, start_value, end_value))
    }

    pub fn add_with_easing(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> Option<TimelineEntryId> {
        self.with(|timeline| {
            timeline.add_with_easing(offset_ms, duration_ms, start_value, end_value, easing)
        })
    }

    pub fn start(&mut self) {
        self.with(Timeline::start);
    }

    pub fn pause(&mut self) {
        self.with(Timeline::pause);
    }

    pub fn resume(&mut self) {
        self.with(Timeline::resume);
    }

    /// Flip direction in place
    pub fn reverse(&mut self) {
        self.with(Timeline::reverse);
    }

    /// Jump to the end of the current direction
    pub fn finish(&mut self) {
        self.with(Timeline::finish);
    }

    /// Current value of an entry
    pub fn get(&self, entry: TimelineEntryId) -> Option<f32> {
        self.with(|timeline| timeline.value(entry)).flatten()
    }

    pub fn is_playing(&self) -> bool {
        self.with(|timeline| timeline.is_playing()).unwrap_or(false)
    }

    pub fn is_reversed(&self) -> bool {
        self.with(|timeline| timeline.is_reversed()).unwrap_or(false)
    }

    pub fn progress(&self) -> f32 {
        self.with(|timeline| timeline.progress()).unwrap_or(0.0)
    }

    /// Completion of the last run, reported once
    pub fn take_completion(&mut self) -> Option<CompletionPosition> {
        self.with(Timeline::take_completion).flatten()
    }
}

impl Drop for AnimatedTimeline {
    fn drop(&mut self) {
        if let Some(id) = self.timeline_id.take() {
            self.handle.remove_timeline(id);
        }
    }
}
