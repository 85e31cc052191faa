//! Read-only copies of a simulation's positions for rendering
//!
//! A snapshot owns its data, so a renderer can keep it around, serialize it or
//! send it elsewhere without ever touching the live vertex arena.

use serde::{Deserialize, Serialize};

use crate::notes::ANCHOR_COUNT;
use crate::simulation::SimulationStatus;
use crate::vector::Vector2D;
use crate::vertex::VertexKind;

/// Position and role of one vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub position: Vector2D,
    pub kind: VertexKind,
}

/// An edge as a pair of indices into [`LayoutSnapshot::vertices`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// A note vertex with its descriptor data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePoint<'a> {
    pub label: &'a str,
    pub importance: f64,
    pub position: Vector2D,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Number of steps taken when the snapshot was made
    pub step: usize,
    /// Temperature that the next step will use
    pub temperature: f64,
    pub status: SimulationStatus,
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl LayoutSnapshot {
    pub fn is_converged(&self) -> bool {
        self.status == SimulationStatus::Converged
    }

    /// Position of the pinned center, if the graph has one
    pub fn center(&self) -> Option<Vector2D> {
        self.vertices
            .iter()
            .find(|v| v.kind == VertexKind::Center)
            .map(|v| v.position)
    }

    /// The six anchor positions ordered by hexagon index, or `None` unless
    /// every index is present
    pub fn anchor_positions(&self) -> Option<[Vector2D; ANCHOR_COUNT]> {
        let mut slots = [None; ANCHOR_COUNT];
        for vertex in &self.vertices {
            if let VertexKind::Anchor { index } = vertex.kind {
                *slots.get_mut(index)? = Some(vertex.position);
            }
        }
        let mut anchors = [Vector2D::ZERO; ANCHOR_COUNT];
        for (anchor, slot) in anchors.iter_mut().zip(slots) {
            *anchor = slot?;
        }
        Some(anchors)
    }

    /// Note vertices in construction order
    pub fn notes(&self) -> impl Iterator<Item = NotePoint<'_>> {
        self.vertices.iter().filter_map(|v| match &v.kind {
            VertexKind::Note { label, importance } => Some(NotePoint {
                label,
                importance: *importance,
                position: v.position,
            }),
            _ => None,
        })
    }

    pub fn note_positions(&self) -> Vec<Vector2D> {
        self.notes().map(|n| n.position).collect()
    }

    /// Edges as `(from, to)` vertex index pairs
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(|e| (e.from, e.to)).collect()
    }

    /// Endpoint positions of every edge, for drawing lines
    pub fn edge_segments(&self) -> impl Iterator<Item = (Vector2D, Vector2D)> + '_ {
        self.edges.iter().map(|e| {
            (
                self.vertices[e.from].position,
                self.vertices[e.to].position,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayoutSnapshot {
        LayoutSnapshot {
            step: 3,
            temperature: 1.5,
            status: SimulationStatus::Running,
            vertices: vec![
                VertexSnapshot {
                    position: Vector2D::new(5.0, 5.0),
                    kind: VertexKind::Center,
                },
                VertexSnapshot {
                    position: Vector2D::new(9.0, 5.0),
                    kind: VertexKind::Anchor { index: 1 },
                },
                VertexSnapshot {
                    position: Vector2D::new(1.0, 5.0),
                    kind: VertexKind::Anchor { index: 0 },
                },
                VertexSnapshot {
                    position: Vector2D::new(4.0, 2.0),
                    kind: VertexKind::Note {
                        label: "A".to_string(),
                        importance: 2.0,
                    },
                },
            ],
            edges: vec![EdgeSnapshot {
                from: 3,
                to: 2,
                weight: 1.0,
            }],
        }
    }

    #[test]
    fn partial_hexagon_has_no_anchor_positions() {
        assert_eq!(sample().anchor_positions(), None);
    }

    #[test]
    fn anchors_are_ordered_by_hexagon_index() {
        let vertices = (0..ANCHOR_COUNT)
            .rev()
            .map(|index| VertexSnapshot {
                position: Vector2D::new(index as f64, 0.0),
                kind: VertexKind::Anchor { index },
            })
            .collect();
        let snapshot = LayoutSnapshot {
            vertices,
            edges: Vec::new(),
            ..sample()
        };

        let anchors = snapshot.anchor_positions().unwrap();
        for (index, anchor) in anchors.iter().enumerate() {
            assert_eq!(*anchor, Vector2D::new(index as f64, 0.0));
        }
    }

    #[test]
    fn notes_carry_label_and_importance() {
        let snapshot = sample();
        let notes: Vec<_> = snapshot.notes().collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].label, "A");
        assert_eq!(notes[0].importance, 2.0);
        assert_eq!(snapshot.center(), Some(Vector2D::new(5.0, 5.0)));
    }

    #[test]
    fn edge_segments_resolve_positions() {
        let snapshot = sample();
        assert_eq!(snapshot.edge_pairs(), vec![(3, 2)]);
        let segments: Vec<_> = snapshot.edge_segments().collect();
        assert_eq!(
            segments,
            vec![(Vector2D::new(4.0, 2.0), Vector2D::new(1.0, 5.0))]
        );
    }

    #[test]
    fn serializes_vertex_kind_as_tag() {
        let json = serde_json::to_string(&sample().vertices[1]).unwrap();
        insta::assert_snapshot!(json, @r#"{"position":{"x":9.0,"y":5.0},"kind":{"kind":"anchor","index":1}}"#);
    }
}
