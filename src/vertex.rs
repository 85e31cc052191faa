//! Positioned, displaceable graph vertices

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vector::Vector2D;

/// Index of a vertex in a [`Graph`](crate::graph::Graph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a vertex stands for in the note layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VertexKind {
    /// Pinned reference point in the middle of the hexagon
    Center,
    /// Topic node on the hexagon, `index` in `0..6`
    Anchor { index: usize },
    /// Free-floating note
    Note { label: String, importance: f64 },
    /// Vertex of a hand-built graph with no layout role
    Free,
}

/// A node of the layout graph
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Vector2D,
    /// Movement accumulated during the current step
    pub displacement: Vector2D,
    pub kind: VertexKind,
}

impl Vertex {
    /// Vertex at an explicit position
    pub fn at(position: Vector2D, kind: VertexKind) -> Self {
        Self {
            position,
            displacement: Vector2D::ZERO,
            kind,
        }
    }

    /// Vertex placed uniformly inside the square `[0, side)^2`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, side: f64, kind: VertexKind) -> Self {
        let position = Vector2D::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side));
        Self::at(position, kind)
    }

    /// Pinned vertices never move
    pub fn is_pinned(&self) -> bool {
        matches!(self.kind, VertexKind::Center)
    }

    /// Move by the pending displacement scaled by `temperature`, at most
    /// `max_step` units, then clear it
    pub fn apply_displacement(&mut self, temperature: f64, max_step: f64) {
        self.displacement.scale(temperature);
        self.displacement.clamp_magnitude(max_step);
        self.position.add(self.displacement);
        self.displacement.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn apply_displacement_scales_by_temperature_and_resets() {
        let mut vertex = Vertex::at(Vector2D::new(1.0, 1.0), VertexKind::Free);
        vertex.displacement = Vector2D::new(2.0, -1.0);
        vertex.apply_displacement(0.5, 100.0);
        assert_eq!(vertex.position, Vector2D::new(2.0, 0.5));
        assert!(vertex.displacement.is_zero());
    }

    #[test]
    fn apply_displacement_caps_the_step_length() {
        let mut vertex = Vertex::at(Vector2D::ZERO, VertexKind::Free);
        // 360 * 4 at the clamped distance, scaled by temperature 4
        vertex.displacement = Vector2D::new(0.0, -1440.0);
        vertex.apply_displacement(4.0, 100.0);
        assert_eq!(vertex.position.x, 0.0);
        assert!((vertex.position.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn random_vertices_stay_inside_the_box() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = Vertex::random(&mut rng, 50.0, VertexKind::Free);
            assert!((0.0..50.0).contains(&v.position.x));
            assert!((0.0..50.0).contains(&v.position.y));
        }
    }

    #[test]
    fn only_the_center_is_pinned() {
        assert!(Vertex::at(Vector2D::ZERO, VertexKind::Center).is_pinned());
        assert!(!Vertex::at(Vector2D::ZERO, VertexKind::Anchor { index: 0 }).is_pinned());
    }
}
