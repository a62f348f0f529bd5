//! Reveal configuration presets.
//!
//! Every field has a default, so a TOML file only needs the values it changes:
//!
//! ```toml
//! total_duration = 0.4
//!
//! [spring]
//! stiffness = 240.0
//!
//! [cache]
//! capacity = 64
//! ```

use cascade_animation::{CascadeTimeline, SpringConfig};
use cascade_text::LayoutCacheConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Physical constants of the spring shared by every line
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSettings {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringSettings {
    pub fn to_spring_config(self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping, self.mass)
    }
}

impl Default for SpringSettings {
    fn default() -> Self {
        let config = SpringConfig::cascade();
        Self {
            stiffness: config.stiffness,
            damping: config.damping,
            mass: config.mass,
        }
    }
}

/// The hidden pose a line animates from (reveal) or to (hide)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Downward offset of a hidden line
    pub offset_y: f32,
    /// Scale of a hidden line, anchored at its bottom edge
    pub scale: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            offset_y: 8.0,
            scale: 0.96,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Blur radius of a fully hidden line (filter strategy)
    pub radius: f32,
    /// Use the translucent panel even when the host supports blur filters
    pub force_fallback: bool,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            force_fallback: false,
        }
    }
}

/// Configuration for a [`LineRevealController`](crate::LineRevealController)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Default overall duration in seconds
    pub total_duration: f32,
    /// Default share of the duration spent on staggered line starts
    pub cascade_fraction: f32,
    pub spring: SpringSettings,
    pub pose: PoseConfig,
    pub blur: BlurConfig,
    pub cache: LayoutCacheConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RevealConfig {
    /// Standard configuration for body text.
    pub fn standard() -> Self {
        Self {
            total_duration: CascadeTimeline::DEFAULT_TOTAL_DURATION,
            cascade_fraction: CascadeTimeline::DEFAULT_CASCADE_FRACTION,
            spring: SpringSettings::default(),
            pose: PoseConfig::default(),
            blur: BlurConfig::default(),
            cache: LayoutCacheConfig::default(),
        }
    }

    /// Shorter, tighter cascade for small labels.
    pub fn snappy() -> Self {
        Self {
            total_duration: 0.36,
            cascade_fraction: 0.35,
            spring: SpringSettings {
                stiffness: 300.0,
                damping: 26.0,
                mass: 1.0,
            },
            pose: PoseConfig {
                offset_y: 4.0,
                scale: 0.98,
            },
            blur: BlurConfig {
                radius: 4.0,
                force_fallback: false,
            },
            cache: LayoutCacheConfig::default(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: RevealConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Set the default overall duration (seconds).
    pub fn with_total_duration(mut self, seconds: f32) -> Self {
        self.total_duration = seconds;
        self
    }

    /// Set the default cascade fraction.
    pub fn with_cascade_fraction(mut self, fraction: f32) -> Self {
        self.cascade_fraction = fraction;
        self
    }

    /// Set the layout cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache.capacity = capacity;
        self
    }

    /// Always use the translucent panel instead of a blur filter.
    pub fn with_forced_fallback(mut self, force: bool) -> Self {
        self.blur.force_fallback = force;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.total_duration.is_finite() && self.total_duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.total_duration));
        }
        if !(0.0..1.0).contains(&self.cascade_fraction) {
            return Err(ConfigError::InvalidCascadeFraction(self.cascade_fraction));
        }

        let spring = self.spring.to_spring_config();
        if !spring.is_valid() {
            return Err(ConfigError::InvalidSpring {
                stiffness: spring.stiffness,
                damping: spring.damping,
                mass: spring.mass,
            });
        }

        if !(self.pose.scale.is_finite() && self.pose.scale > 0.0) {
            return Err(ConfigError::InvalidPose(format!(
                "scale must be positive, got {}",
                self.pose.scale
            )));
        }
        if !self.pose.offset_y.is_finite() {
            return Err(ConfigError::InvalidPose(format!(
                "offset must be finite, got {}",
                self.pose.offset_y
            )));
        }

        if !(self.blur.radius.is_finite() && self.blur.radius >= 0.0) {
            return Err(ConfigError::InvalidBlurRadius(self.blur.radius));
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }
}
