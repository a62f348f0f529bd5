//! Blur transition strategies
//!
//! Lines defocus as they hide and sharpen as they reveal. Hosts with an
//! animatable blur filter get a true per-layer blur radius; everything else
//! gets a translucent panel over the line whose opacity fades instead. The
//! strategy is chosen once per controller.

use crate::config::BlurConfig;
use crate::host::{HostCapabilities, LineLayerId, RevealHost};
use crate::pose::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurStrategy {
    /// Animate the layer's blur radius
    Filter,
    /// Fade a translucent panel covering the layer
    Overlay,
}

impl BlurStrategy {
    /// Filter when the host supports it, otherwise the panel
    pub fn select(capabilities: HostCapabilities, config: &BlurConfig) -> Self {
        if capabilities.blur_filter && !config.force_fallback {
            BlurStrategy::Filter
        } else {
            BlurStrategy::Overlay
        }
    }

    /// Start and end value of the animated parameter
    ///
    /// Radius `radius -> 0` (reveal) or `0 -> radius` (hide) for the filter;
    /// panel opacity `1 -> 0` or `0 -> 1` for the fallback.
    pub fn endpoints(self, direction: Direction, config: &BlurConfig) -> (f32, f32) {
        let blurred = match self {
            BlurStrategy::Filter => config.radius,
            BlurStrategy::Overlay => 1.0,
        };
        match direction {
            Direction::Reveal => (blurred, 0.0),
            Direction::Hide => (0.0, blurred),
        }
    }

    /// Set up a freshly created layer at its starting value
    pub fn prepare<H: RevealHost + ?Sized>(
        self,
        host: &mut H,
        layer: LineLayerId,
        direction: Direction,
        config: &BlurConfig,
    ) {
        if self == BlurStrategy::Overlay {
            host.add_blur_panel(layer);
        }
        let (start, _) = self.endpoints(direction, config);
        self.apply(host, layer, start);
    }

    /// Push a sampled value to the host
    pub fn apply<H: RevealHost + ?Sized>(self, host: &mut H, layer: LineLayerId, value: f32) {
        match self {
            BlurStrategy::Filter => host.set_line_blur_radius(layer, value.max(0.0)),
            BlurStrategy::Overlay => host.set_blur_panel_opacity(layer, value.clamp(0.0, 1.0)),
        }
    }
}
