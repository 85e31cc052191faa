//! notegraph - force-directed layout of notes around a hexagon of anchors.
//!
//! A [`Graph`] of vertices and weighted edges is relaxed by a [`Simulation`]:
//! each step accumulates spring and repulsion forces from a [`ForceModel`],
//! moves the free vertices, and cools the temperature until every vertex
//! settles. [`NoteLayout`] builds the note graph (center, six anchors, notes
//! pulled toward anchors by weight) and readers/writers in [`io`] load note
//! sets and export snapshots.

pub mod config;
pub mod driver;
pub mod edge;
pub mod error;
pub mod forces;
pub mod formats;
pub mod graph;
pub mod io;
pub mod notes;
pub mod observer;
pub mod simulation;
pub mod snapshot;
pub mod svg_writer;
pub mod vector;
pub mod vertex;

pub use config::SimulationConfig;
pub use edge::Edge;
pub use error::{LayoutError, LayoutResult};
pub use forces::ForceModel;
pub use graph::Graph;
pub use notes::{NoteDescriptor, NoteLayout, NoteSet};
pub use simulation::{Simulation, SimulationStatus, StepReport};
pub use snapshot::LayoutSnapshot;
pub use vector::Vector2D;
pub use vertex::{Vertex, VertexId, VertexKind};
