//! Easing functions
//!
//! Map linear progress `0.0..=1.0` to eased progress. Every variant maps 0 to
//! 0 and 1 to 1; springs may leave the unit range in between.

use crate::spring::SpringCurve;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Damped spring response normalized to its settling time
    Spring(SpringCurve),
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Spring(curve) => curve.sample(t),
        }
    }
}

impl From<SpringCurve> for Easing {
    fn from(curve: SpringCurve) -> Self {
        Easing::Spring(curve)
    }
}
