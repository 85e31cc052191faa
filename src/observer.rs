//! Position-changed notifications for rendering collaborators
//!
//! The simulation calls every subscribed [`LayoutObserver`] once per step with
//! a fresh snapshot, and once more with the converged signal on the terminal
//! step. Observers receive shared references only; they cannot move vertices.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::snapshot::LayoutSnapshot;

/// Receives layout updates from a [`Simulation`](crate::simulation::Simulation)
pub trait LayoutObserver {
    /// New positions are available
    fn positions_changed(&mut self, snapshot: &LayoutSnapshot);

    /// The simulation reached its terminal state; no further steps follow
    fn converged(&mut self, snapshot: &LayoutSnapshot) {
        let _ = snapshot;
    }
}

/// Logs every step at debug level and convergence at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LayoutObserver for TracingObserver {
    fn positions_changed(&mut self, snapshot: &LayoutSnapshot) {
        debug!(
            step = snapshot.step,
            temperature = snapshot.temperature,
            vertices = snapshot.vertices.len(),
            "layout positions changed"
        );
    }

    fn converged(&mut self, snapshot: &LayoutSnapshot) {
        info!(
            steps = snapshot.step,
            temperature = snapshot.temperature,
            "layout converged"
        );
    }
}

/// Publishes the latest snapshot on a tokio watch channel
///
/// Renderers hold the [`watch::Receiver`] and read whatever frame is current;
/// intermediate frames they miss are simply skipped.
#[derive(Debug)]
pub struct WatchPublisher {
    tx: watch::Sender<LayoutSnapshot>,
}

impl WatchPublisher {
    /// Create a publisher seeded with `initial`, plus the receiving end
    pub fn channel(initial: LayoutSnapshot) -> (Self, watch::Receiver<LayoutSnapshot>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }
}

impl LayoutObserver for WatchPublisher {
    fn positions_changed(&mut self, snapshot: &LayoutSnapshot) {
        // Nobody listening is fine; the frame is dropped.
        self.tx.send_replace(snapshot.clone());
    }
}
