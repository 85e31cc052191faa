//! Tunable parameters for the force simulation
//!
//! All physics constants live here instead of in module-level state, so two
//! simulations in one process never share a temperature or a coefficient.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Default repulsion coefficient (inverse-square law numerator)
pub const DEFAULT_REPULSION: f64 = 360.0;

/// Default spring coefficient for the log-spring law
pub const DEFAULT_SPRING: f64 = 1.0;

/// Default rest length of an edge
pub const DEFAULT_IDEAL_DISTANCE: f64 = 20.0;

/// Default fraction of temperature lost per step
pub const DEFAULT_COOLING_RATE: f64 = 0.05;

/// Default starting temperature
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 4.0;

/// Default temperature floor (the layout never fully freezes)
pub const DEFAULT_MIN_TEMPERATURE: f64 = 0.01;

/// Default displacement magnitude under which a vertex counts as settled
pub const DEFAULT_MINIMUM_FORCE: f64 = 0.1;

/// Default multiplier on the spring pulling every free vertex toward the center
pub const DEFAULT_CENTER_ATTRACTION: f64 = 0.5;

/// Default minimum distance used by the force laws (avoids the singularity)
pub const DEFAULT_DISTANCE_MIN: f64 = 1.0;

/// Default longest distance a vertex may move in one step (prevents numerical explosion)
pub const DEFAULT_MAX_STEP: f64 = 100.0;

/// Configuration for the force simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Repulsion coefficient
    pub repulsion: f64,
    /// Spring coefficient
    pub spring: f64,
    /// Ideal edge length (spring force is zero here)
    pub ideal_distance: f64,
    /// Cooling rate in `[0, 1)`
    pub cooling_rate: f64,
    /// Temperature at step zero
    pub initial_temperature: f64,
    /// Temperature never decays below this
    pub min_temperature: f64,
    /// Convergence threshold on per-vertex displacement magnitude
    pub minimum_force: f64,
    /// Spring multiplier toward the pinned center vertex
    pub center_attraction: f64,
    /// Distances below this are clamped before evaluating a force law
    pub distance_min: f64,
    /// Longest distance a vertex may move in one step
    pub max_step: f64,
    /// Scale each edge spring by the edge weight
    pub weighted_springs: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            repulsion: DEFAULT_REPULSION,
            spring: DEFAULT_SPRING,
            ideal_distance: DEFAULT_IDEAL_DISTANCE,
            cooling_rate: DEFAULT_COOLING_RATE,
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
            minimum_force: DEFAULT_MINIMUM_FORCE,
            center_attraction: DEFAULT_CENTER_ATTRACTION,
            distance_min: DEFAULT_DISTANCE_MIN,
            max_step: DEFAULT_MAX_STEP,
            weighted_springs: false,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter is in range
    pub fn validate(&self) -> LayoutResult<()> {
        fn non_negative(name: &str, value: f64) -> LayoutResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )))
            }
        }

        fn positive(name: &str, value: f64) -> LayoutResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )))
            }
        }

        non_negative("repulsion", self.repulsion)?;
        non_negative("spring", self.spring)?;
        non_negative("center_attraction", self.center_attraction)?;
        non_negative("minimum_force", self.minimum_force)?;
        positive("ideal_distance", self.ideal_distance)?;
        positive("initial_temperature", self.initial_temperature)?;
        positive("min_temperature", self.min_temperature)?;
        positive("distance_min", self.distance_min)?;
        positive("max_step", self.max_step)?;

        if !(0.0..1.0).contains(&self.cooling_rate) {
            return Err(LayoutError::InvalidConfig(format!(
                "cooling_rate must be in [0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.min_temperature > self.initial_temperature {
            return Err(LayoutError::InvalidConfig(format!(
                "min_temperature {} exceeds initial_temperature {}",
                self.min_temperature, self.initial_temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_temperature, 4.0);
        assert_eq!(config.cooling_rate, 0.05);
        assert_eq!(config.minimum_force, 0.1);
        assert_eq!(config.max_step, 100.0);
        assert!(!config.weighted_springs);
    }

    #[test]
    fn rejects_cooling_rate_of_one() {
        let config = SimulationConfig {
            cooling_rate: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_floor_above_initial_temperature() {
        let config = SimulationConfig {
            initial_temperature: 0.5,
            min_temperature: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_step() {
        let config = SimulationConfig {
            max_step: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"invalid simulation config: max_step must be finite and positive, got 0");
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        let config = SimulationConfig {
            repulsion: f64::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid simulation config: repulsion must be finite and non-negative, got NaN"
        );
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: SimulationConfig =
            serde_yaml::from_str("repulsion: 100.0\nweighted_springs: true\n").unwrap();
        assert_eq!(config.repulsion, 100.0);
        assert!(config.weighted_springs);
        assert_eq!(config.ideal_distance, DEFAULT_IDEAL_DISTANCE);
    }
}
