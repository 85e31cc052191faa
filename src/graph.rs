//! Vertex arena and edge list owned by one simulation
//!
//! Edges refer to vertices by [`VertexId`] rather than by reference, so a step
//! can iterate edges while mutating vertices without borrow conflicts.

use std::collections::HashSet;

use crate::edge::Edge;
use crate::error::{LayoutError, LayoutResult};
use crate::vertex::{Vertex, VertexId};

/// The geometric state of a layout: vertices, edges and the optional pinned center
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    center: Option<VertexId>,
    /// Unordered endpoint pairs, for the repulsion exclusion test
    adjacency: HashSet<(VertexId, VertexId)>,
}

fn unordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex; a [`VertexKind::Center`](crate::vertex::VertexKind::Center)
    /// vertex becomes the graph's pinned center.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len());
        if vertex.is_pinned() {
            self.center = Some(id);
        }
        self.vertices.push(vertex);
        id
    }

    /// Add an edge between two existing vertices
    pub fn add_edge(&mut self, start: VertexId, end: VertexId, weight: f64) -> LayoutResult<()> {
        for id in [start, end] {
            if id.index() >= self.vertices.len() {
                return Err(LayoutError::UnknownVertex(id.index()));
            }
        }
        let edge = Edge::new(start, end, weight)?;
        self.adjacency.insert(unordered(start, end));
        self.edges.push(edge);
        Ok(())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn center(&self) -> Option<VertexId> {
        self.center
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether any edge joins `a` and `b`
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.adjacency.contains(&unordered(a, b))
    }

    /// Ids of every vertex that is not pinned
    pub fn free_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_pinned())
            .map(|(i, _)| VertexId(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;
    use crate::vertex::VertexKind;

    fn free(x: f64, y: f64) -> Vertex {
        Vertex::at(Vector2D::new(x, y), VertexKind::Free)
    }

    #[test]
    fn center_vertex_is_tracked() {
        let mut graph = Graph::new();
        graph.add_vertex(free(0.0, 0.0));
        let center = graph.add_vertex(Vertex::at(Vector2D::ZERO, VertexKind::Center));
        assert_eq!(graph.center(), Some(center));
        assert_eq!(graph.free_vertices().count(), 1);
    }

    #[test]
    fn adjacency_is_undirected() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(free(0.0, 0.0));
        let b = graph.add_vertex(free(1.0, 0.0));
        let c = graph.add_vertex(free(2.0, 0.0));
        graph.add_edge(a, b, 1.0).unwrap();

        assert!(graph.are_adjacent(a, b));
        assert!(graph.are_adjacent(b, a));
        assert!(!graph.are_adjacent(a, c));
    }

    #[test]
    fn edge_to_missing_vertex_is_rejected() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(free(0.0, 0.0));
        assert_eq!(
            graph.add_edge(a, VertexId(5), 1.0),
            Err(LayoutError::UnknownVertex(5))
        );
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn zero_weight_edge_is_rejected() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(free(0.0, 0.0));
        let b = graph.add_vertex(free(1.0, 0.0));
        assert!(graph.add_edge(a, b, 0.0).is_err());
        assert!(!graph.are_adjacent(a, b));
    }
}
