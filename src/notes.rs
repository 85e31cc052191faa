//! Note descriptors and the hexagon layout builder
//!
//! Six anchor (topic) vertices sit on a regular hexagon around a pinned center.
//! Each note pulls toward the anchors named by its pull weights; every positive
//! weight becomes one note → anchor edge.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::graph::Graph;
use crate::simulation::Simulation;
use crate::vector::Vector2D;
use crate::vertex::{Vertex, VertexId, VertexKind};

/// Number of anchors on the hexagon
pub const ANCHOR_COUNT: usize = 6;

/// Margin kept free inside the bounding box (the anchor circle radius)
pub const DEFAULT_MARGIN: f64 = 6.0;

/// Allowed drift of a pull-weight sum away from exactly 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

fn default_importance() -> f64 {
    1.0
}

/// One note to place on the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDescriptor {
    pub label: String,
    /// Relative visual weight (drawn radius)
    #[serde(default = "default_importance")]
    pub importance: f64,
    /// Pull toward each anchor, non-negative, summing to 1
    pub pull_weights: [f64; ANCHOR_COUNT],
}

impl NoteDescriptor {
    pub fn new(label: impl Into<String>, importance: f64, pull_weights: [f64; ANCHOR_COUNT]) -> Self {
        Self {
            label: label.into(),
            importance,
            pull_weights,
        }
    }

    /// Check importance and pull weights
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.importance.is_finite() && self.importance > 0.0) {
            return Err(LayoutError::Importance {
                label: self.label.clone(),
                importance: self.importance,
            });
        }
        for (anchor, &weight) in self.pull_weights.iter().enumerate() {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(LayoutError::PullWeight {
                    label: self.label.clone(),
                    anchor,
                    weight,
                });
            }
        }
        let sum: f64 = self.pull_weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(LayoutError::PullWeightSum {
                label: self.label.clone(),
                sum,
            });
        }
        Ok(())
    }

    /// `(anchor index, weight)` for every positive weight
    pub fn pulls(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.pull_weights
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, weight)| *weight > 0.0)
    }
}

/// Notes plus an optional bounding box, as read from an input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox_side_length: Option<f64>,
    pub notes: Vec<NoteDescriptor>,
}

/// Geometry of the hexagon layout inside a square bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteLayout {
    side_length: f64,
    margin: f64,
}

impl NoteLayout {
    /// Layout for a bounding box of `side_length` with the default margin
    pub fn new(side_length: f64) -> LayoutResult<Self> {
        Self::with_margin(side_length, DEFAULT_MARGIN)
    }

    pub fn with_margin(side_length: f64, margin: f64) -> LayoutResult<Self> {
        if !(side_length.is_finite() && margin.is_finite() && margin >= 0.0)
            || side_length <= 2.0 * margin
        {
            return Err(LayoutError::BoundingBox {
                side: side_length,
                margin,
            });
        }
        Ok(Self {
            side_length,
            margin,
        })
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Side of the square the simulation works in (bounding box minus margins)
    pub fn inner_side(&self) -> f64 {
        self.side_length - 2.0 * self.margin
    }

    /// Hexagon circumradius, also the center coordinate
    pub fn radius(&self) -> f64 {
        self.inner_side() / 2.0
    }

    pub fn center_position(&self) -> Vector2D {
        Vector2D::new(self.radius(), self.radius())
    }

    /// Anchor `i` at angle `i * 60°` on the hexagon
    pub fn anchor_position(&self, index: usize) -> Vector2D {
        let angle = PI / 3.0 * index as f64;
        let r = self.radius();
        Vector2D::new(r * (1.0 + angle.cos()), r * (1.0 + angle.sin()))
    }

    pub fn anchor_positions(&self) -> [Vector2D; ANCHOR_COUNT] {
        std::array::from_fn(|i| self.anchor_position(i))
    }

    /// Where a note would sit if it followed its pull weights exactly: the
    /// weighted average of its anchors.
    pub fn pull_target(&self, note: &NoteDescriptor) -> Vector2D {
        let center = self.center_position();
        let mut target = center;
        for (index, weight) in note.pulls() {
            target.add((self.anchor_position(index) - center) * weight);
        }
        target
    }

    /// Build the graph with notes placed uniformly at random from `seed`
    pub fn build(&self, notes: &[NoteDescriptor], seed: u64) -> LayoutResult<Graph> {
        validate_all(notes)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let side = self.inner_side();
        let vertices = notes
            .iter()
            .map(|note| Vertex::random(&mut rng, side, note_kind(note)))
            .collect();
        self.assemble(notes, vertices)
    }

    /// Build the graph with explicit initial note positions
    pub fn build_with_positions(
        &self,
        notes: &[NoteDescriptor],
        positions: &[Vector2D],
    ) -> LayoutResult<Graph> {
        validate_all(notes)?;
        if positions.len() != notes.len() {
            return Err(LayoutError::PositionCount {
                expected: notes.len(),
                actual: positions.len(),
            });
        }
        let vertices = notes
            .iter()
            .zip(positions)
            .map(|(note, &position)| Vertex::at(position, note_kind(note)))
            .collect();
        self.assemble(notes, vertices)
    }

    /// Build a ready-to-run simulation with random placement from `seed`
    pub fn simulation(
        &self,
        notes: &[NoteDescriptor],
        config: SimulationConfig,
        seed: u64,
    ) -> LayoutResult<Simulation> {
        Simulation::new(self.build(notes, seed)?, config)
    }

    fn assemble(&self, notes: &[NoteDescriptor], note_vertices: Vec<Vertex>) -> LayoutResult<Graph> {
        let mut graph = Graph::new();
        graph.add_vertex(Vertex::at(self.center_position(), VertexKind::Center));

        let anchors: Vec<VertexId> = (0..ANCHOR_COUNT)
            .map(|index| {
                graph.add_vertex(Vertex::at(
                    self.anchor_position(index),
                    VertexKind::Anchor { index },
                ))
            })
            .collect();

        for (note, vertex) in notes.iter().zip(note_vertices) {
            let id = graph.add_vertex(vertex);
            for (anchor, weight) in note.pulls() {
                graph.add_edge(id, anchors[anchor], weight)?;
            }
        }

        debug!(
            notes = notes.len(),
            edges = graph.edges().len(),
            side = self.side_length,
            "note layout assembled"
        );
        Ok(graph)
    }
}

fn note_kind(note: &NoteDescriptor) -> VertexKind {
    VertexKind::Note {
        label: note.label.clone(),
        importance: note.importance,
    }
}

fn validate_all(notes: &[NoteDescriptor]) -> LayoutResult<()> {
    notes.iter().try_for_each(NoteDescriptor::validate)
}
