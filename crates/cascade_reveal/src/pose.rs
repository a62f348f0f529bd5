//! Line poses
//!
//! A hidden line is transparent, pushed down and slightly shrunk toward its
//! bottom edge; a shown line sits at rest. Lines move between the two along a
//! single progress value.

use cascade_core::{Affine2D, Size};

use crate::config::PoseConfig;

/// Which way a cascade runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Reveal,
    Hide,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Reveal => Direction::Hide,
            Direction::Hide => Direction::Reveal,
        }
    }

    /// Pose every line starts from
    pub fn from_pose(self, config: &PoseConfig) -> LinePose {
        match self {
            Direction::Reveal => LinePose::hidden(config),
            Direction::Hide => LinePose::shown(),
        }
    }

    /// Pose every line ends at
    pub fn to_pose(self, config: &PoseConfig) -> LinePose {
        self.opposite().from_pose(config)
    }
}

/// Visual state of one line wrapper
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePose {
    pub opacity: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl LinePose {
    pub fn hidden(config: &PoseConfig) -> Self {
        Self {
            opacity: 0.0,
            offset_y: config.offset_y,
            scale: config.scale,
        }
    }

    pub fn shown() -> Self {
        Self {
            opacity: 1.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Interpolate between two poses; `t` may overshoot with spring timing
    pub fn lerp(from: &LinePose, to: &LinePose, t: f32) -> LinePose {
        LinePose {
            opacity: from.opacity + (to.opacity - from.opacity) * t,
            offset_y: from.offset_y + (to.offset_y - from.offset_y) * t,
            scale: from.scale + (to.scale - from.scale) * t,
        }
    }

    /// Opacity clamped to the displayable range
    pub fn display_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    /// Layer-local transform for a wrapper of `size`
    ///
    /// Scales around the bottom-center point, then translates down.
    pub fn transform(&self, size: Size) -> Affine2D {
        Affine2D::translation(0.0, self.offset_y).then(&Affine2D::scale_anchored(
            self.scale,
            self.scale,
            size.width / 2.0,
            size.height,
        ))
    }
}
