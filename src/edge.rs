//! Weighted edges between arena vertices

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::vector::Vector2D;
use crate::vertex::{Vertex, VertexId};

/// A directed edge `start -> end` with a positive weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    pub weight: f64,
}

impl Edge {
    /// Create an edge, rejecting non-positive or non-finite weights and self-loops
    pub fn new(start: VertexId, end: VertexId, weight: f64) -> LayoutResult<Self> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(LayoutError::EdgeWeight(weight));
        }
        if start == end {
            return Err(LayoutError::SelfLoop(start.index()));
        }
        Ok(Self { start, end, weight })
    }

    /// Whether this edge joins `a` and `b` in either direction
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Current Euclidean length, looked up in `vertices`
    pub fn length(&self, vertices: &[Vertex]) -> f64 {
        Vector2D::distance(
            vertices[self.start.index()].position,
            vertices[self.end.index()].position,
        )
    }
}
