//! Per-line overlay
//!
//! While a cascade runs, the target is hidden and a sibling overlay stands in
//! for it: one wrapper per visual line, each rendering the line's styled
//! content at the line's offset. Every wrapper owns two timeline entries, one
//! for its pose progress and one for its blur parameter, both starting at the
//! line's cascade delay.

use cascade_animation::{AnimatedTimeline, CascadeTimeline, TimelineEntryId};
use cascade_core::{Rect, Size};
use cascade_text::{LineRecord, TextStyle};
use smallvec::SmallVec;

use crate::blur::BlurStrategy;
use crate::config::RevealConfig;
use crate::host::{ContainerId, LineLayerId, OverlayId, RevealHost};
use crate::pose::{Direction, LinePose};

/// Timeline entries driving one line
#[derive(Clone, Copy, Debug)]
struct LineEntries {
    pose: TimelineEntryId,
    blur: TimelineEntryId,
}

/// One wrapper in the overlay
#[derive(Clone, Copy, Debug)]
pub struct LineLayer {
    id: LineLayerId,
    size: Size,
    entries: LineEntries,
}

impl LineLayer {
    pub fn id(&self) -> LineLayerId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Everything needed to build an overlay
pub(crate) struct OverlaySpec<'a> {
    pub container: ContainerId,
    pub frame: Rect,
    pub lines: &'a [LineRecord],
    pub style: &'a TextStyle,
    pub direction: Direction,
    pub cascade: &'a CascadeTimeline,
    pub blur: BlurStrategy,
    pub config: &'a RevealConfig,
}

/// The overlay standing in for a target during a cascade
#[derive(Debug)]
pub struct Overlay {
    id: OverlayId,
    from: LinePose,
    to: LinePose,
    blur: BlurStrategy,
    layers: SmallVec<[LineLayer; 4]>,
}

impl Overlay {
    /// Register every line's entries on `timeline`, then attach the overlay
    ///
    /// Returns `None` without touching the host if the timeline is no longer
    /// registered with a scheduler.
    pub(crate) fn build<H: RevealHost + ?Sized>(
        host: &mut H,
        spec: OverlaySpec<'_>,
        timeline: &mut AnimatedTimeline,
    ) -> Option<Overlay> {
        let cascade = spec.cascade;
        let duration = cascade.per_line_duration_ms();
        let easing = cascade.easing();
        let (blur_start, blur_end) = spec.blur.endpoints(spec.direction, &spec.config.blur);

        let mut entries: SmallVec<[LineEntries; 4]> = SmallVec::with_capacity(spec.lines.len());
        for index in 0..spec.lines.len() {
            let delay = cascade.delay_ms(index);
            entries.push(LineEntries {
                pose: timeline.add_with_easing(delay, duration, 0.0, 1.0, easing)?,
                blur: timeline.add_with_easing(delay, duration, blur_start, blur_end, easing)?,
            });
        }

        let from = spec.direction.from_pose(&spec.config.pose);
        let to = spec.direction.to_pose(&spec.config.pose);
        let id = host.create_overlay(spec.container, spec.frame);

        let layers = spec
            .lines
            .iter()
            .zip(entries)
            .map(|(line, entries)| {
                let bounds = Rect::new(
                    0.0,
                    line.bounds.y(),
                    spec.frame.width(),
                    line.bounds.height(),
                );
                let layer = host.create_line_layer(id, bounds, &line.content, spec.style);
                host.set_line_pose(layer, from.display_opacity(), from.transform(bounds.size()));
                spec.blur.prepare(host, layer, spec.direction, &spec.config.blur);
                LineLayer {
                    id: layer,
                    size: bounds.size(),
                    entries,
                }
            })
            .collect();

        Some(Overlay {
            id,
            from,
            to,
            blur: spec.blur,
            layers,
        })
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[LineLayer] {
        &self.layers
    }

    /// Push the timeline's current values to every wrapper
    pub(crate) fn apply<H: RevealHost + ?Sized>(&self, host: &mut H, timeline: &AnimatedTimeline) {
        for layer in &self.layers {
            if let Some(progress) = timeline.get(layer.entries.pose) {
                let pose = LinePose::lerp(&self.from, &self.to, progress);
                host.set_line_pose(layer.id, pose.display_opacity(), pose.transform(layer.size));
            }
            if let Some(value) = timeline.get(layer.entries.blur) {
                self.blur.apply(host, layer.id, value);
            }
        }
    }
}
