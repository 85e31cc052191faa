//! Timer-driven stepping of a simulation
//!
//! [`TickDriver`] calls [`Simulation::step`] once per tick of a tokio interval.
//! The step runs to completion inside the loop body before the next tick is
//! awaited, so steps never overlap, and missed ticks are delayed rather than
//! replayed in a burst. The owning context stops the loop through a
//! [`CancelHandle`] at any point between steps.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::simulation::Simulation;

/// Why a [`TickDriver`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// The simulation converged after `steps` driven steps
    Converged { steps: usize },
    /// The cancel handle fired (or was dropped)
    Cancelled { steps: usize },
    /// The step limit was reached first
    StepLimit { steps: usize },
}

impl DriverExit {
    pub fn steps(&self) -> usize {
        match *self {
            DriverExit::Converged { steps }
            | DriverExit::Cancelled { steps }
            | DriverExit::StepLimit { steps } => steps,
        }
    }
}

/// Stops a running [`TickDriver`]
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiving side of a [`CancelHandle`]
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled or once every handle is gone
    async fn cancelled(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Create a linked cancel handle and token
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Periodic scheduler for one simulation
#[derive(Debug, Clone, Copy)]
pub struct TickDriver {
    period: Duration,
    max_steps: Option<usize>,
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            max_steps: None,
        }
    }

    /// Stop after at most `max_steps` steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Drive `simulation` until it converges, the step limit is hit, or
    /// `cancel` fires.
    pub async fn run(&self, simulation: &mut Simulation, mut cancel: CancelToken) -> DriverExit {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut steps = 0;

        loop {
            if simulation.is_converged() {
                return DriverExit::Converged { steps };
            }
            if self.max_steps.is_some_and(|max| steps >= max) {
                info!(steps, "tick driver reached its step limit");
                return DriverExit::StepLimit { steps };
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(steps, "tick driver cancelled");
                    return DriverExit::Cancelled { steps };
                }
                _ = interval.tick() => {}
            }

            if simulation.step().is_some() {
                steps += 1;
                debug!(steps, temperature = simulation.temperature(), "driven step");
            }
        }
    }
}
