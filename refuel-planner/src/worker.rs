//! Background planning on a dedicated thread.
//!
//! One request goes in, exactly one [`PlanOutcome`] comes out. Dropping the
//! [`PlanHandle`] abandons the result; the thread finishes its computation
//! and the send is discarded.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use refuel_core::{PlanOutcome, PlanRequest};
use thiserror::Error;

use crate::plan_outcome;

/// Name given to planner threads.
const THREAD_NAME: &str = "refuel-planner";

/// Errors returned while collecting a background plan.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The planning thread panicked before reporting.
    #[error("planning thread panicked")]
    Panicked,
    /// The planning thread exited without reporting.
    #[error("planning thread exited without a result")]
    Disconnected,
}

/// Handle to a plan running in the background.
#[derive(Debug)]
pub struct PlanHandle {
    receiver: Receiver<PlanOutcome>,
    thread: JoinHandle<()>,
}

/// Start planning `request` on a new thread.
///
/// # Errors
/// Returns the operating-system error when the thread cannot be spawned.
///
/// # Examples
/// ```
/// use refuel_core::test_support::{equator_route, vehicle};
/// use refuel_core::{PlanRequest, Strategy};
/// use refuel_planner::spawn_plan;
///
/// let request = PlanRequest::new(
///     equator_route(100.0, 1),
///     Vec::new(),
///     vehicle(50.0, 6.5, 50.0, 0.0, Strategy::Optimal),
/// );
/// let outcome = spawn_plan(request).expect("spawn").wait().expect("result");
/// assert!(outcome.plan().is_some_and(|plan| plan.stops.is_empty()));
/// ```
pub fn spawn_plan(request: PlanRequest) -> io::Result<PlanHandle> {
    let (sender, receiver) = mpsc::channel();
    let thread = thread::Builder::new()
        .name(THREAD_NAME.to_owned())
        .spawn(move || {
            let outcome = plan_outcome(&request);
            if sender.send(outcome).is_err() {
                debug!("plan result discarded; the requester went away");
            }
        })?;
    Ok(PlanHandle { receiver, thread })
}

impl PlanHandle {
    /// Block until the outcome arrives.
    ///
    /// # Errors
    /// Returns a [`WorkerError`] when the thread died without reporting.
    pub fn wait(self) -> Result<PlanOutcome, WorkerError> {
        match self.receiver.recv() {
            Ok(outcome) => {
                if self.thread.join().is_err() {
                    warn!("planning thread panicked after reporting its result");
                }
                Ok(outcome)
            }
            Err(_) => Err(match self.thread.join() {
                Ok(()) => WorkerError::Disconnected,
                Err(_) => WorkerError::Panicked,
            }),
        }
    }

    /// The outcome if it is ready, without blocking.
    ///
    /// # Errors
    /// Returns [`WorkerError::Disconnected`] when the thread died without
    /// reporting.
    pub fn try_outcome(&self) -> Result<Option<PlanOutcome>, WorkerError> {
        match self.receiver.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Whether the planning thread has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}
