// SPDX-License-Identifier: MIT

//! Single-shot completion tracking for a test run.
//!
//! The engine's terminal notification is easy to lose: it arrives through
//! a reporter callback, while exit-code determination happens at process
//! shutdown on a different call path. [`CompletionReporter`] bridges the
//! two with an explicit Pending -> Completed state machine that fires at
//! most once.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{Reporter, RunResult};

type CompleteCallback = Box<dyn FnMut(bool) + Send>;

#[derive(Default)]
struct State {
    completed: bool,
    passed: bool,
    callbacks: Vec<CompleteCallback>,
}

/// Reporter that records the terminal pass/fail signal exactly once.
///
/// Clones share one underlying state, so the runner can keep a handle for
/// queries while a boxed clone sits in the engine's reporter list and a
/// third lives inside the process-exit hook.
///
/// Callback policy: callbacks registered before completion are invoked in
/// registration order when the terminal signal arrives; a callback
/// registered after completion is invoked immediately with the recorded
/// result, so no registrant ever misses the notification.
#[derive(Clone, Default)]
pub struct CompletionReporter {
    state: Arc<Mutex<State>>,
}

impl CompletionReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the terminal pass/fail signal.
    pub fn on_complete(&self, callback: impl FnMut(bool) + Send + 'static) {
        let mut callback = Box::new(callback);
        let mut state = self.lock();
        if state.completed {
            let passed = state.passed;
            drop(state);
            callback(passed);
        } else {
            state.callbacks.push(callback);
        }
    }

    /// Whether the terminal signal has been observed.
    pub fn is_complete(&self) -> bool {
        self.lock().completed
    }

    /// The recorded overall result, if the run has completed.
    pub fn passed(&self) -> Option<bool> {
        let state = self.lock();
        state.completed.then_some(state.passed)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Callbacks run with the lock released, so the only way to poison
        // this mutex is a panic inside the struct's own field updates.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Reporter for CompletionReporter {
    fn run_done(&mut self, result: &RunResult) {
        let callbacks = {
            let mut state = self.lock();
            if state.completed {
                // Transition already fired; a second terminal signal from
                // a misbehaving engine is ignored.
                return;
            }
            state.completed = true;
            state.passed = result.overall_passed;
            std::mem::take(&mut state.callbacks)
        };
        for mut callback in callbacks {
            callback(result.overall_passed);
        }
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
