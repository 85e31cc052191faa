//! CPU force simulation for the note layout
//!
//! Owns one [`Graph`] and advances it one step at a time: repulsion between
//! unconnected vertex pairs, a pull toward the pinned center, log-springs along
//! edges, convergence detection, temperature-scaled movement and cooling.
//! Scheduling is left to the caller; see [`crate::driver`] for a timer-driven
//! loop.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::LayoutResult;
use crate::forces::{ForceModel, jiggle};
use crate::graph::Graph;
use crate::observer::LayoutObserver;
use crate::snapshot::{EdgeSnapshot, LayoutSnapshot, VertexSnapshot};
use crate::vertex::VertexId;

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Graph constructed, no step taken yet
    Building,
    /// At least one step taken, not yet settled
    Running,
    /// Terminal: every vertex settled; `step()` no longer does anything
    Converged,
}

/// What one call to [`Simulation::step`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// 1-based index of this step
    pub step: usize,
    /// Temperature the step's forces and movement were scaled by
    pub temperature: f64,
    /// Largest accumulated displacement magnitude over all vertices
    pub max_displacement: f64,
    /// Whether this step detected convergence
    pub converged: bool,
}

/// Outcome of [`Simulation::run_to_convergence`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Steps executed by this call
    pub steps: usize,
    pub converged: bool,
    pub temperature: f64,
}

/// Force-directed layout of one graph
pub struct Simulation {
    graph: Graph,
    forces: ForceModel,
    status: SimulationStatus,
    steps: usize,
    observers: Vec<Box<dyn LayoutObserver>>,
}

impl Simulation {
    /// Create a simulation over `graph`, validating `config` first
    pub fn new(graph: Graph, config: SimulationConfig) -> LayoutResult<Self> {
        config.validate()?;
        debug!(
            vertices = graph.len(),
            edges = graph.edges().len(),
            "simulation built"
        );
        Ok(Self {
            graph,
            forces: ForceModel::new(config),
            status: SimulationStatus::Building,
            steps: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer notified after every step
    pub fn subscribe<O: LayoutObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SimulationConfig {
        self.forces.config()
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn is_converged(&self) -> bool {
        self.status == SimulationStatus::Converged
    }

    /// Steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn temperature(&self) -> f64 {
        self.forces.temperature()
    }

    /// Copy of the current positions
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            step: self.steps,
            temperature: self.forces.temperature(),
            status: self.status,
            vertices: self
                .graph
                .vertices()
                .iter()
                .map(|v| VertexSnapshot {
                    position: v.position,
                    kind: v.kind.clone(),
                })
                .collect(),
            edges: self
                .graph
                .edges()
                .iter()
                .map(|e| EdgeSnapshot {
                    from: e.start.index(),
                    to: e.end.index(),
                    weight: e.weight,
                })
                .collect(),
        }
    }

    /// Run one simulation step.
    ///
    /// Returns `None` once the simulation has converged; nothing moves then.
    /// The step that detects convergence still applies its displacement
    /// before the simulation halts.
    pub fn step(&mut self) -> Option<StepReport> {
        if self.is_converged() {
            return None;
        }

        let temperature = self.forces.temperature();
        let free: Vec<VertexId> = self.graph.free_vertices().collect();

        for vertex in self.graph.vertices_mut() {
            vertex.displacement.reset();
        }

        self.apply_repulsion(&free);
        self.apply_center_force(&free);
        self.apply_edge_springs();

        let max_displacement = free
            .iter()
            .map(|&id| self.graph.vertex(id).displacement.magnitude())
            .fold(0.0, f64::max);
        let converged = max_displacement <= self.forces.config().minimum_force;
        let max_step = self.forces.config().max_step;

        for vertex in self.graph.vertices_mut() {
            if vertex.is_pinned() {
                vertex.displacement.reset();
            } else {
                vertex.apply_displacement(temperature, max_step);
            }
        }

        self.forces.cool();
        self.steps += 1;
        self.status = if converged {
            SimulationStatus::Converged
        } else {
            SimulationStatus::Running
        };

        debug!(
            step = self.steps,
            temperature,
            max_displacement,
            "simulation step"
        );
        if converged {
            info!(steps = self.steps, "simulation converged");
        }
        self.notify(converged);

        Some(StepReport {
            step: self.steps,
            temperature,
            max_displacement,
            converged,
        })
    }

    /// Step until converged or `max_steps` steps have run
    pub fn run_to_convergence(&mut self, max_steps: usize) -> RunSummary {
        let mut steps = 0;
        while steps < max_steps {
            match self.step() {
                Some(report) => {
                    steps += 1;
                    if report.converged {
                        break;
                    }
                }
                None => break,
            }
        }
        if !self.is_converged() {
            warn!(max_steps, "simulation did not converge within the step limit");
        }
        RunSummary {
            steps,
            converged: self.is_converged(),
            temperature: self.forces.temperature(),
        }
    }

    /// Repulsion between every unordered pair of free vertices without an edge
    fn apply_repulsion(&mut self, free: &[VertexId]) {
        for (i, &a) in free.iter().enumerate() {
            for &b in &free[i + 1..] {
                if self.graph.are_adjacent(a, b) {
                    continue;
                }
                let force = self.forces.repulsive_force(
                    self.graph.vertex(a).position,
                    self.graph.vertex(b).position,
                    1.0,
                    jiggle(a, b),
                );
                let vertices = self.graph.vertices_mut();
                vertices[a.index()].displacement.add(force);
                vertices[b.index()].displacement.subtract(force);
            }
        }
    }

    /// Weak spring toward the center plus repulsion from it
    fn apply_center_force(&mut self, free: &[VertexId]) {
        let Some(center) = self.graph.center() else {
            return;
        };
        let center_position = self.graph.vertex(center).position;
        let attraction = self.forces.config().center_attraction;

        for &id in free {
            let position = self.graph.vertex(id).position;
            let fallback = jiggle(id, center);
            let mut force = self
                .forces
                .attractive_force(position, center_position, attraction, fallback);
            force.add(
                self.forces
                    .repulsive_force(position, center_position, 1.0, fallback),
            );
            self.graph.vertices_mut()[id.index()].displacement.add(force);
        }
    }

    /// One spring per edge: added to `start`, subtracted from `end`
    fn apply_edge_springs(&mut self) {
        let weighted = self.forces.config().weighted_springs;
        for index in 0..self.graph.edges().len() {
            let edge = self.graph.edges()[index];
            let multiplier = if weighted { edge.weight } else { 1.0 };
            let force = self.forces.attractive_force(
                self.graph.vertex(edge.start).position,
                self.graph.vertex(edge.end).position,
                multiplier,
                jiggle(edge.start, edge.end),
            );
            let vertices = self.graph.vertices_mut();
            if !vertices[edge.start.index()].is_pinned() {
                vertices[edge.start.index()].displacement.add(force);
            }
            if !vertices[edge.end.index()].is_pinned() {
                vertices[edge.end.index()].displacement.subtract(force);
            }
        }
    }

    fn notify(&mut self, converged: bool) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.positions_changed(&snapshot);
            if converged {
                observer.converged(&snapshot);
            }
        }
    }
}
