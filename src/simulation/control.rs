//! Shared pause/resume/skip/stop handle
//!
//! A `SimulationControl` is cheap to clone and safe to hand to other threads,
//! such as a stdin reader, while the controller runs on the caller's thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::types::SimulationState;

#[derive(Debug, Default)]
struct ControlInner {
    paused: AtomicBool,
    stopped: AtomicBool,
    skip: AtomicBool,
    state: Mutex<SimulationState>,
}

/// Cloneable handle used to steer a running simulation
#[derive(Debug, Clone, Default)]
pub struct SimulationControl {
    inner: Arc<ControlInner>,
}

impl SimulationControl {
    /// Create a handle in the `Idle` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend pacing waits until `resume`, `skip` or `stop`
    pub fn pause(&self) {
        let mut state = self.lock_state();
        self.inner.paused.store(true, Ordering::SeqCst);
        if *state == SimulationState::Running {
            *state = SimulationState::Paused;
        }
        debug!("Pause requested");
    }

    /// Clear the paused flag
    pub fn resume(&self) {
        let mut state = self.lock_state();
        self.inner.paused.store(false, Ordering::SeqCst);
        if *state == SimulationState::Paused {
            *state = SimulationState::Running;
        }
        debug!("Resume requested");
    }

    /// Clear the paused flag and end the current wait immediately
    pub fn skip(&self) {
        self.resume();
        self.inner.skip.store(true, Ordering::SeqCst);
        debug!("Skip requested");
    }

    /// Request termination; the next wait resolves negatively
    pub fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        debug!("Stop requested");
    }

    /// Whether the paused flag is set
    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::SeqCst)
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Current lifecycle state
    pub fn state(&self) -> SimulationState {
        *self.lock_state()
    }

    /// Claim the handle for a new run
    ///
    /// Returns false if a run is already `Running` or `Paused`. Otherwise
    /// clears every flag and enters `Running` under the state lock, so two
    /// callers racing on the same handle cannot both succeed.
    pub(crate) fn try_begin(&self) -> bool {
        let mut state = self.lock_state();
        if state.is_active() {
            return false;
        }
        self.reset();
        *state = SimulationState::Running;
        true
    }

    fn reset(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
        self.inner.stopped.store(false, Ordering::SeqCst);
        self.inner.skip.store(false, Ordering::SeqCst);
    }

    /// Consume a pending skip request
    pub(crate) fn take_skip(&self) -> bool {
        self.inner.skip.swap(false, Ordering::SeqCst)
    }

    /// Store `next` and return the state it replaced
    pub(crate) fn set_state(&self, next: SimulationState) -> SimulationState {
        std::mem::replace(&mut *self.lock_state(), next)
    }

    fn lock_state(&self) -> MutexGuard<'_, SimulationState> {
        self.inner.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
