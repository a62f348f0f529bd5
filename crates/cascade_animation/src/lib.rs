//! Cascade Animation System
//!
//! Spring timing curves, reversible timelines and cascade scheduling.
//!
//! # Features
//!
//! - **Spring Curves**: closed-form damped-spring response normalized to its
//!   settling time, usable as an easing
//! - **Timelines**: grouped animations with per-entry start offsets that can be
//!   paused, reversed in place and resumed
//! - **Scheduler**: host-driven ticking of every registered timeline
//! - **Cascade Builder**: per-line delay and duration from one overall duration
//!   and one cascade fraction

pub mod cascade;
pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod timeline;

pub use cascade::CascadeTimeline;
pub use easing::Easing;
pub use scheduler::{AnimatedTimeline, AnimationScheduler, SchedulerHandle, TimelineId};
pub use spring::{SpringConfig, SpringCurve};
pub use timeline::{CompletionPosition, Timeline, TimelineEntryId};
