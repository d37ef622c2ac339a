// SPDX-License-Identifier: MIT

//! Process-lifecycle seam.
//!
//! The runner never calls `std::process::exit`. It records the intended
//! exit code on a [`ProcessHandle`] and registers shutdown hooks with it;
//! the embedding `main` runs the hooks and converts the recorded code at
//! the very end. Tests drive the same surface without a process boundary.

use std::process::ExitCode;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shutdown hook. Receives the handle so it can still adjust the code.
pub type ExitHook = Box<dyn FnOnce(&dyn ProcessHandle) + Send>;

/// Abstraction over the pieces of the process boundary the runner touches.
pub trait ProcessHandle: Send + Sync {
    /// Record the exit code. Later calls overwrite earlier ones.
    fn set_exit_code(&self, code: i32);

    /// The recorded exit code, if any was set.
    fn exit_code(&self) -> Option<i32>;

    /// Register a hook to run once at shutdown, in registration order.
    fn on_exit(&self, hook: ExitHook);

    /// Run registered hooks. Only the first call has any effect, so the
    /// shutdown path stays idempotent even if reached twice.
    fn run_exit_hooks(&self);
}

/// Convert a recorded exit code into a [`std::process::ExitCode`].
///
/// No recorded code means nothing went wrong before shutdown: success.
pub fn to_exit_code(code: Option<i32>) -> ExitCode {
    ExitCode::from(exit_byte(code))
}

fn exit_byte(code: Option<i32>) -> u8 {
    match code {
        // Codes are clamped rather than truncated so an out-of-range
        // value cannot wrap around to 0 and read as success.
        Some(code) => code.clamp(0, u8::MAX.into()) as u8,
        None => 0,
    }
}

/// The real process handle used by [`crate::command::run`].
#[derive(Default)]
pub struct SystemProcess {
    code: Mutex<Option<i32>>,
    hooks: Mutex<Vec<ExitHook>>,
    hooks_ran: AtomicBool,
}

impl SystemProcess {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessHandle for SystemProcess {
    fn set_exit_code(&self, code: i32) {
        if let Ok(mut slot) = self.code.lock() {
            *slot = Some(code);
        }
    }

    fn exit_code(&self) -> Option<i32> {
        self.code.lock().ok().and_then(|slot| *slot)
    }

    fn on_exit(&self, hook: ExitHook) {
        if let Ok(mut hooks) = self.hooks.lock() {
            hooks.push(hook);
        }
    }

    fn run_exit_hooks(&self) {
        if self.hooks_ran.swap(true, Ordering::SeqCst) {
            return;
        }
        let hooks = match self.hooks.lock() {
            Ok(mut hooks) => std::mem::take(&mut *hooks),
            Err(_) => return,
        };
        for hook in hooks {
            hook(self);
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
