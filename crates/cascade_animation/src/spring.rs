//! Spring physics timing
//!
//! A damped spring released from rest, used as a timing curve. The response is
//! computed in closed form and normalized to the spring's settling time, so a
//! curve maps animation progress `0.0..=1.0` onto spring displacement and ends
//! exactly at `1.0`. Under-damped springs overshoot before settling.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// The spring shared by every line of a cascade (mass 1, stiffness 180, damping 18)
    pub fn cascade() -> Self {
        Self {
            stiffness: 180.0,
            damping: 18.0,
            mass: 1.0,
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping relative to critical damping (ζ)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Natural angular frequency (ω₀)
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Positive stiffness and mass, non-negative damping
    pub fn is_valid(&self) -> bool {
        self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0
            && self.stiffness.is_finite()
            && self.mass.is_finite()
            && self.damping.is_finite()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::cascade()
    }
}

/// Spring response used as a timing curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    config: SpringConfig,
    settle_time: f32,
}

impl SpringCurve {
    /// Distance from the target below which the spring counts as settled
    pub const SETTLE_TOLERANCE: f32 = 0.001;

    const SCAN_STEP: f32 = 1.0 / 240.0;
    const MAX_SETTLE_TIME: f32 = 10.0;

    pub fn new(config: SpringConfig) -> Self {
        let settle_time = if config.is_valid() && config.damping > 0.0 {
            Self::settling_time(&config)
        } else {
            0.0
        };
        Self {
            config,
            settle_time,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Physical time (seconds) after which the response stays within tolerance
    pub fn settle_time(&self) -> f32 {
        self.settle_time
    }

    /// Curve value at normalized progress `t`
    ///
    /// `sample(0.0) == 0.0` and `sample(1.0) == 1.0`. A config that cannot
    /// settle degrades to linear progress.
    pub fn sample(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if self.settle_time <= 0.0 {
            return t;
        }
        response(&self.config, t * self.settle_time)
    }

    fn settling_time(config: &SpringConfig) -> f32 {
        let mut last_outside = 0.0;
        let mut t = 0.0;
        while t < Self::MAX_SETTLE_TIME {
            if (1.0 - response(config, t)).abs() > Self::SETTLE_TOLERANCE {
                last_outside = t;
            }
            t += Self::SCAN_STEP;
        }
        last_outside + Self::SCAN_STEP
    }
}

impl Default for SpringCurve {
    fn default() -> Self {
        Self::new(SpringConfig::cascade())
    }
}

/// Step response of a damped spring from 0 toward 1, starting at rest
fn response(config: &SpringConfig, t: f32) -> f32 {
    let omega = config.natural_frequency();
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < 1e-4 {
        // Critically damped
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    } else if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}
