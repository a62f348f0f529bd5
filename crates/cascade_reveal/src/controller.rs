//! Cascade reveal/hide controller
//!
//! Each target is either idle or running in one direction. A running target
//! owns an animation context holding its overlay, its timeline and the
//! direction it is currently heading in. Requests against a running target never start
//! a second animation:
//!
//! - Same direction: nothing changes, the completion callback is queued
//! - Opposite direction: the timeline is paused, reversed in place and resumed,
//!   so every line retraces its path from where it is
//!
//! Time is driven by the host. After ticking the scheduler, call
//! [`LineRevealController::update`] to push the sampled values to the host and
//! finalize cascades that came to rest.
//!
//! # Example
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let mut controller =
//!     LineRevealController::new(host, scheduler.handle(), RevealConfig::standard())?;
//!
//! controller.reveal(label, RevealOptions::default());
//!
//! // every frame
//! scheduler.tick();
//! controller.update();
//! ```

use std::sync::Arc;

use cascade_animation::{AnimatedTimeline, CascadeTimeline, SchedulerHandle, SpringCurve};
use cascade_text::LineLayoutCache;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::blur::BlurStrategy;
use crate::config::RevealConfig;
use crate::error::Result;
use crate::host::{RevealHost, TargetId};
use crate::overlay::{Overlay, OverlaySpec};
use crate::pose::Direction;

/// Called once when a cascade settles, with the direction it settled in
pub type CompletionCallback = Box<dyn FnOnce(Direction)>;

/// Timing of a single reveal or hide
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// Overall duration in seconds
    pub total_duration: f32,
    /// Share of the duration spent on staggered line starts, in `[0, 1)`
    pub cascade_fraction: f32,
}

impl RevealOptions {
    pub fn new(total_duration: f32, cascade_fraction: f32) -> Self {
        Self {
            total_duration,
            cascade_fraction,
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.total_duration, config.cascade_fraction)
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::new(
            CascadeTimeline::DEFAULT_TOTAL_DURATION,
            CascadeTimeline::DEFAULT_CASCADE_FRACTION,
        )
    }
}

/// In-flight state of one target
struct AnimationContext {
    overlay: Overlay,
    timeline: AnimatedTimeline,
    direction: Direction,
    callbacks: SmallVec<[CompletionCallback; 1]>,
}

/// Drives cascading per-line reveal and hide animations
pub struct LineRevealController<H: RevealHost> {
    host: H,
    scheduler: SchedulerHandle,
    layout_cache: Arc<LineLayoutCache>,
    config: RevealConfig,
    curve: SpringCurve,
    blur: BlurStrategy,
    contexts: FxHashMap<TargetId, AnimationContext>,
}

impl<H: RevealHost> LineRevealController<H> {
    /// Controller with its own layout cache sized from `config.cache`
    pub fn new(host: H, scheduler: SchedulerHandle, config: RevealConfig) -> Result<Self> {
        let cache = Arc::new(LineLayoutCache::new(config.cache));
        Self::with_layout_cache(host, scheduler, cache, config)
    }

    /// Controller sharing an existing layout cache
    pub fn with_layout_cache(
        host: H,
        scheduler: SchedulerHandle,
        layout_cache: Arc<LineLayoutCache>,
        config: RevealConfig,
    ) -> Result<Self> {
        config.validate()?;

        let blur = BlurStrategy::select(host.capabilities(), &config.blur);
        tracing::debug!(?blur, "line reveal: blur strategy selected");

        Ok(Self {
            curve: SpringCurve::new(config.spring.to_spring_config()),
            host,
            scheduler,
            layout_cache,
            config,
            blur,
            contexts: FxHashMap::default(),
        })
    }

    /// Cascade a target's lines into view
    pub fn reveal(&mut self, target: TargetId, options: RevealOptions) {
        self.animate(target, Direction::Reveal, options, None);
    }

    /// Like [`reveal`](Self::reveal), calling `on_complete` once the target settles
    pub fn reveal_then(
        &mut self,
        target: TargetId,
        options: RevealOptions,
        on_complete: impl FnOnce(Direction) + 'static,
    ) {
        self.animate(target, Direction::Reveal, options, Some(Box::new(on_complete)));
    }

    /// Cascade a target's lines out of view
    pub fn hide(&mut self, target: TargetId, options: RevealOptions) {
        self.animate(target, Direction::Hide, options, None);
    }

    /// Like [`hide`](Self::hide), calling `on_complete` once the target settles
    pub fn hide_then(
        &mut self,
        target: TargetId,
        options: RevealOptions,
        on_complete: impl FnOnce(Direction) + 'static,
    ) {
        self.animate(target, Direction::Hide, options, Some(Box::new(on_complete)));
    }

    fn animate(
        &mut self,
        target: TargetId,
        direction: Direction,
        options: RevealOptions,
        on_complete: Option<CompletionCallback>,
    ) {
        if let Some(context) = self.contexts.get_mut(&target) {
            if context.direction != direction {
                tracing::debug!(?target, ?direction, "line reveal: reversing in place");
                context.timeline.pause();
                context.timeline.reverse();
                context.direction = direction;
                context.timeline.resume();
            }
            context.callbacks.extend(on_complete);
            return;
        }

        self.start(target, direction, options, on_complete);
    }

    fn start(
        &mut self,
        target: TargetId,
        direction: Direction,
        options: RevealOptions,
        on_complete: Option<CompletionCallback>,
    ) {
        let Some(info) = self.host.target_info(target) else {
            tracing::trace!(?target, "line reveal: unknown target");
            fire(on_complete, direction);
            return;
        };
        let Some(container) = info.container else {
            tracing::trace!(?target, "line reveal: target has no container");
            fire(on_complete, direction);
            return;
        };
        if info.frame.size().is_degenerate() {
            tracing::trace!(?target, frame = ?info.frame, "line reveal: target has no area");
            fire(on_complete, direction);
            return;
        }

        let lines = self.layout_cache.lines_for(&info.request);
        if lines.is_empty() {
            tracing::trace!(?target, "line reveal: nothing to lay out");
            fire(on_complete, direction);
            return;
        }

        // The target's own text must never show underneath a hide
        if direction == Direction::Hide {
            self.host.set_target_hidden(target, true);
        }

        let cascade = CascadeTimeline::build(
            lines.len(),
            options.total_duration,
            options.cascade_fraction,
        )
        .with_curve(self.curve);
        let mut timeline =
            AnimatedTimeline::new(self.scheduler.clone(), cascade.total_duration_ms());

        let spec = OverlaySpec {
            container,
            frame: info.frame,
            lines: &lines,
            style: &info.request.style,
            direction,
            cascade: &cascade,
            blur: self.blur,
            config: &self.config,
        };
        let Some(overlay) = Overlay::build(&mut self.host, spec, &mut timeline) else {
            tracing::warn!(
                ?target,
                ?direction,
                "line reveal: scheduler unavailable, skipping animation"
            );
            self.host.set_target_hidden(target, direction == Direction::Hide);
            fire(on_complete, direction);
            return;
        };
        debug_assert_eq!(overlay.len(), cascade.line_count());

        tracing::debug!(
            ?target,
            ?direction,
            lines = overlay.len(),
            per_line = cascade.per_line_duration(),
            "line reveal: starting cascade"
        );

        let context = self.contexts.entry(target).or_insert(AnimationContext {
            overlay,
            timeline,
            direction,
            callbacks: on_complete.into_iter().collect(),
        });
        context.timeline.start();
    }

    /// Apply current values to the host and finalize settled cascades
    ///
    /// Returns true while any cascade is still running.
    pub fn update(&mut self) -> bool {
        let mut settled: SmallVec<[TargetId; 4]> = SmallVec::new();
        for (target, context) in self.contexts.iter_mut() {
            context.overlay.apply(&mut self.host, &context.timeline);
            if context.timeline.take_completion().is_some() {
                settled.push(*target);
            }
        }

        for target in settled {
            self.finalize(target);
        }
        !self.contexts.is_empty()
    }

    /// Jump a running cascade to the end of its current direction and finalize it now
    pub fn finish(&mut self, target: TargetId) {
        let Some(context) = self.contexts.get_mut(&target) else {
            return;
        };
        context.timeline.finish();
        self.finalize(target);
    }

    fn finalize(&mut self, target: TargetId) {
        let Some(context) = self.contexts.remove(&target) else {
            return;
        };
        let AnimationContext {
            overlay,
            timeline,
            direction,
            callbacks,
        } = context;

        self.host.remove_overlay(overlay.id());
        self.host.set_target_hidden(target, direction == Direction::Hide);
        // Unregisters the timeline from the scheduler
        drop(timeline);

        tracing::debug!(?target, ?direction, "line reveal: cascade settled");
        for callback in callbacks {
            callback(direction);
        }
    }

    pub fn is_animating(&self, target: TargetId) -> bool {
        self.contexts.contains_key(&target)
    }

    /// Direction a running cascade is heading in
    pub fn direction(&self, target: TargetId) -> Option<Direction> {
        self.contexts.get(&target).map(|context| context.direction)
    }

    /// Overlay of a running cascade
    pub fn overlay(&self, target: TargetId) -> Option<&Overlay> {
        self.contexts.get(&target).map(|context| &context.overlay)
    }

    /// Number of targets currently animating
    pub fn active_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn layout_cache(&self) -> &Arc<LineLayoutCache> {
        &self.layout_cache
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Timing taken from the controller's config
    pub fn default_options(&self) -> RevealOptions {
        RevealOptions::from_config(&self.config)
    }
}

fn fire(callback: Option<CompletionCallback>, direction: Direction) {
    if let Some(callback) = callback {
        callback(direction);
    }
}
