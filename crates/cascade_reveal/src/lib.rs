//! Cascade Reveal
//!
//! Cascading per-line text reveal and hide. A text target is split into its
//! visual lines, a sibling overlay renders one wrapper per line, and the lines
//! fade, slide and sharpen into place one after another on a shared spring.
//!
//! # Features
//!
//! - **Line Layout**: lines come from a bounded, memoized layout cache
//! - **Cascade Timing**: evenly staggered line starts inside one overall duration
//! - **Blur Strategies**: per-layer blur filter, or a fading translucent panel
//!   on hosts without one
//! - **Reverse In Place**: hiding a target mid-reveal (or the other way round)
//!   retraces the current motion instead of restarting
//!
//! The UI runtime plugs in through [`RevealHost`] and drives time through an
//! [`AnimationScheduler`](cascade_animation::AnimationScheduler).

pub mod blur;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod overlay;
pub mod pose;

pub use blur::BlurStrategy;
pub use config::{BlurConfig, PoseConfig, RevealConfig, SpringSettings};
pub use controller::{CompletionCallback, LineRevealController, RevealOptions};
pub use error::{ConfigError, Result};
pub use host::{
    ContainerId, HostCapabilities, LineLayerId, OverlayId, RevealHost, TargetId, TargetInfo,
};
pub use overlay::{LineLayer, Overlay};
pub use pose::{Direction, LinePose};
