//! Scroll bar configuration (thumbtrack.toml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use thumbtrack_animation::{DecelerationRate, SpringConfig, DEFAULT_COEFFICIENT};
use thumbtrack_core::{Axis, EdgeInsets, Size};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to render the configuration as TOML
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of its legal range
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// A model rejected its parameters
    #[error(transparent)]
    Model(#[from] thumbtrack_core::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level scroll bar configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollBarConfig {
    /// Axis driven by the bar
    pub direction: Axis,
    /// Run the deceleration model for flicks inside bounds
    pub should_decelerate: bool,
    /// Never auto-hide
    pub always_visible: bool,
    /// Idle seconds before the bar hides
    pub hide_delay: f64,
    /// Pixels per point
    pub display_scale: f64,
    /// Maximum content offset must exceed this for the bar to track it
    pub minimum_content_range: f64,
    pub physics: PhysicsConfig,
    pub indicator: IndicatorConfig,
}

impl Default for ScrollBarConfig {
    fn default() -> Self {
        Self {
            direction: Axis::Vertical,
            should_decelerate: true,
            always_visible: false,
            hide_delay: 2.0,
            display_scale: 1.0,
            minimum_content_range: 30.0,
            physics: PhysicsConfig::default(),
            indicator: IndicatorConfig::default(),
        }
    }
}

/// Motion tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub deceleration_rate: DecelerationRate,
    /// Release speed (points/s) above which a release is a flick
    pub significant_velocity: f64,
    /// Default rubber-band stiffness, also the upper clamp of the scaled one
    pub rubber_band_coefficient: f64,
    /// Lower clamp of the size-ratio scaled coefficient
    pub minimum_rubber_band_coefficient: f64,
    /// Base stiffness of the release-out-of-bounds snap back
    pub snap_back_stiffness: f64,
    /// Added stiffness per viewport length of overscroll
    pub snap_back_stiffness_boost: f64,
    /// Scale handoff velocity by the content/indicator range ratio
    pub handoff_velocity_scaling: bool,
    pub handoff_velocity_multiplier_max: f64,
    pub max_bounce_velocity: f64,
    /// Spring for the bounce leg after a flick crosses a bound
    pub bounce_spring: SpringConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            deceleration_rate: DecelerationRate::Normal,
            significant_velocity: 100.0,
            rubber_band_coefficient: DEFAULT_COEFFICIENT,
            minimum_rubber_band_coefficient: 0.1,
            snap_back_stiffness: 100.0,
            snap_back_stiffness_boost: 400.0,
            handoff_velocity_scaling: true,
            handoff_velocity_multiplier_max: 30.0,
            max_bounce_velocity: 7000.0,
            bounce_spring: SpringConfig::default(),
        }
    }
}

/// Thumb geometry inside the track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub size: Size,
    pub insets: EdgeInsets,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            size: Size::new(4.0, 60.0),
            insets: EdgeInsets::new(8.0, 0.0, 8.0, 2.0),
        }
    }
}

impl ScrollBarConfig {
    /// Horizontal bar with the defaults rotated onto the x axis
    pub fn horizontal() -> Self {
        Self {
            direction: Axis::Horizontal,
            indicator: IndicatorConfig {
                size: Size::new(60.0, 4.0),
                insets: EdgeInsets::new(0.0, 8.0, 2.0, 8.0),
            },
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded scroll bar configuration");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Smallest offset change worth writing (one physical pixel / 2)
    pub fn motion_threshold(&self) -> f64 {
        0.5 / self.display_scale
    }

    pub fn validate(&self) -> Result<()> {
        positive("display_scale", self.display_scale)?;
        non_negative("hide_delay", self.hide_delay)?;
        non_negative("minimum_content_range", self.minimum_content_range)?;
        non_negative("indicator.size.width", self.indicator.size.width)?;
        non_negative("indicator.size.height", self.indicator.size.height)?;

        let physics = &self.physics;
        physics.deceleration_rate.validate()?;
        physics.bounce_spring.validate()?;
        non_negative("physics.significant_velocity", physics.significant_velocity)?;
        positive("physics.rubber_band_coefficient", physics.rubber_band_coefficient)?;
        positive(
            "physics.minimum_rubber_band_coefficient",
            physics.minimum_rubber_band_coefficient,
        )?;
        if physics.minimum_rubber_band_coefficient > physics.rubber_band_coefficient {
            return Err(ConfigError::Invalid {
                key: "physics.minimum_rubber_band_coefficient",
                reason: format!(
                    "{} exceeds rubber_band_coefficient {}",
                    physics.minimum_rubber_band_coefficient, physics.rubber_band_coefficient
                ),
            });
        }
        positive("physics.snap_back_stiffness", physics.snap_back_stiffness)?;
        non_negative("physics.snap_back_stiffness_boost", physics.snap_back_stiffness_boost)?;
        let multiplier_max = physics.handoff_velocity_multiplier_max;
        if multiplier_max.is_nan() || multiplier_max < 1.0 {
            return Err(ConfigError::Invalid {
                key: "physics.handoff_velocity_multiplier_max",
                reason: format!("{multiplier_max} is below 1"),
            });
        }
        positive("physics.max_bounce_velocity", physics.max_bounce_velocity)?;
        Ok(())
    }
}

fn positive(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{value} must be positive"),
        })
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{value} must not be negative"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ScrollBarConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScrollBarConfig::default());
        assert_eq!(config.motion_threshold(), 0.5);
    }

    #[test]
    fn test_partial_document() {
        let config = ScrollBarConfig::from_toml_str(
            r#"
            direction = "horizontal"
            display_scale = 3.0

            [physics]
            deceleration_rate = "fast"
            handoff_velocity_scaling = false

            [physics.bounce_spring]
            stiffness = 300.0

            [indicator.insets]
            left = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.direction, Axis::Horizontal);
        assert!((config.motion_threshold() - 0.5 / 3.0).abs() < 1e-12);
        assert_eq!(config.physics.deceleration_rate, DecelerationRate::Fast);
        assert!(!config.physics.handoff_velocity_scaling);
        assert_eq!(config.physics.bounce_spring.stiffness, 300.0);
        assert_eq!(config.physics.bounce_spring.mass, 1.0);
        assert_eq!(config.indicator.insets.left, 4.0);
        assert_eq!(config.indicator.insets.top, 0.0);
    }

    #[test]
    fn test_numeric_deceleration_rate() {
        let config = ScrollBarConfig::from_toml_str("[physics]\ndeceleration_rate = 0.995\n").unwrap();
        assert_eq!(config.physics.deceleration_rate, DecelerationRate::Custom(0.995));
        assert!(ScrollBarConfig::from_toml_str("[physics]\ndeceleration_rate = 1.5\n").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let err = ScrollBarConfig::from_toml_str("display_scale = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "display_scale", .. }));

        let err = ScrollBarConfig::from_toml_str(
            "[physics]\nminimum_rubber_band_coefficient = 0.9\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("minimum_rubber_band_coefficient"));

        let err = ScrollBarConfig::from_toml_str("[physics.bounce_spring]\nmass = -1.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Model(_)));

        assert!(matches!(
            ScrollBarConfig::from_toml_str("direction = 3").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScrollBarConfig::horizontal();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ScrollBarConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = ScrollBarConfig::load("/nonexistent/thumbtrack.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
