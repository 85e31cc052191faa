//! Errors raised while building a layout graph or simulation

use thiserror::Error;

/// Errors that can occur before a simulation starts running
///
/// Every variant is fatal for the graph being built: construction is aborted
/// and no partial graph is returned. Numeric degeneracy during a step is not an
/// error; the force model clamps it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A note's pull weights do not sum to 1
    #[error("note {label:?} has pull weights that sum to {sum}, expected 1")]
    PullWeightSum { label: String, sum: f64 },

    /// A note has a negative or non-finite pull weight
    #[error("note {label:?} has an invalid pull weight {weight} for anchor {anchor}")]
    PullWeight {
        label: String,
        anchor: usize,
        weight: f64,
    },

    /// A note's importance is not a positive finite number
    #[error("note {label:?} has invalid importance {importance}")]
    Importance { label: String, importance: f64 },

    /// The bounding box is too small to hold the hexagon after margins
    #[error("bounding box side length {side} must exceed twice the margin ({margin})")]
    BoundingBox { side: f64, margin: f64 },

    /// Explicit initial positions do not line up with the notes
    #[error("expected {expected} initial note positions, got {actual}")]
    PositionCount { expected: usize, actual: usize },

    /// An edge refers to a vertex outside the arena
    #[error("edge endpoint {0} is not a vertex of this graph")]
    UnknownVertex(usize),

    /// An edge has a non-positive or non-finite weight
    #[error("edge weight must be positive and finite, got {0}")]
    EdgeWeight(f64),

    /// An edge joins a vertex to itself
    #[error("edge from vertex {0} to itself")]
    SelfLoop(usize),

    /// A simulation parameter is out of range
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}

impl LayoutError {
    /// Whether this error stems from note input data rather than engine parameters
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LayoutError::PullWeightSum { .. }
                | LayoutError::PullWeight { .. }
                | LayoutError::Importance { .. }
                | LayoutError::BoundingBox { .. }
                | LayoutError::PositionCount { .. }
        )
    }
}

/// Result type for graph construction
pub type LayoutResult<T> = Result<T, LayoutError>;
