//! Force laws and the cooling schedule
//!
//! Two force functions (inverse-square repulsion, logarithmic spring) and a
//! geometric cooling step, all driven by one [`SimulationConfig`] and one
//! temperature owned by the [`ForceModel`].

use std::f64::consts::TAU;

use crate::config::SimulationConfig;
use crate::vector::Vector2D;
use crate::vertex::VertexId;

/// Unit direction used for a vertex pair sitting on one point.
///
/// Deterministic jiggle based on the indices, so overlapping vertices always
/// separate the same way.
pub fn jiggle(a: VertexId, b: VertexId) -> Vector2D {
    let seed = a
        .index()
        .wrapping_mul(12345)
        .wrapping_add(b.index().wrapping_mul(67890)) as f64;
    let angle = (seed.sin() * 43758.5453).rem_euclid(1.0) * TAU;
    Vector2D::new(angle.cos(), angle.sin())
}

/// Unit vector from `p1` to `p2`, or `coincident` when the points are equal
fn direction(p1: Vector2D, p2: Vector2D, coincident: Vector2D) -> Vector2D {
    let unit = Vector2D::unit_vector(p1, p2);
    if unit.is_zero() { coincident } else { unit }
}

/// Force parameters plus the current annealing temperature
#[derive(Debug, Clone)]
pub struct ForceModel {
    config: SimulationConfig,
    temperature: f64,
}

impl ForceModel {
    /// Create a model at the configured initial temperature
    pub fn new(config: SimulationConfig) -> Self {
        let temperature = config.initial_temperature;
        Self {
            config,
            temperature,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Distance between two points as seen by the force laws
    fn clamped_distance(&self, p1: Vector2D, p2: Vector2D) -> f64 {
        Vector2D::distance(p1, p2).max(self.config.distance_min)
    }

    /// Repulsion felt at `p1` from `p2`, pointing away from `p2`.
    ///
    /// Magnitude `repulsion * temperature * multiplier / d^2`. When the points
    /// coincide, `coincident` stands in for the direction from `p1` to `p2`.
    pub fn repulsive_force(
        &self,
        p1: Vector2D,
        p2: Vector2D,
        multiplier: f64,
        coincident: Vector2D,
    ) -> Vector2D {
        let distance = self.clamped_distance(p1, p2);
        let magnitude = multiplier * self.config.repulsion * self.temperature / (distance * distance);
        let mut force = direction(p1, p2, coincident);
        force.invert();
        force.scale(magnitude);
        force
    }

    /// Spring pull felt at `p1` toward `p2`.
    ///
    /// Magnitude `spring * temperature * multiplier * ln(d / ideal_distance)`:
    /// negative (pushing apart) below the ideal length, zero at it, positive
    /// above it. `coincident` is the direction used when the points coincide.
    pub fn attractive_force(
        &self,
        p1: Vector2D,
        p2: Vector2D,
        multiplier: f64,
        coincident: Vector2D,
    ) -> Vector2D {
        let distance = self.clamped_distance(p1, p2);
        let magnitude = multiplier
            * self.config.spring
            * self.temperature
            * (distance / self.config.ideal_distance).ln();
        let mut force = direction(p1, p2, coincident);
        force.scale(magnitude);
        force
    }

    /// Decay the temperature one step, never below the floor
    pub fn cool(&mut self) {
        self.temperature =
            (self.temperature * (1.0 - self.config.cooling_rate)).max(self.config.min_temperature);
    }
}
