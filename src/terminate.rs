//! Process termination for the crash-after policy
//!
//! The engine only reports that the crash limit was reached. Whoever drives
//! the engine hands that outcome to a [`Terminator`], which in production
//! exits the process immediately: no cleanup, no graceful shutdown.
//!
//! # Usage
//!
//! ```ignore
//! use fault_service::terminate::{ProcessExit, Terminator};
//!
//! if let EngineOutcome::Terminate { request_count } = engine.invoke()? {
//!     ProcessExit.terminate(request_count);
//! }
//! ```

use std::sync::{Mutex, PoisonError};

/// Exit code used when the crash limit is reached
pub const CRASH_EXIT_CODE: i32 = 1;

/// Acts on a crash decision
pub trait Terminator: Send + Sync {
    /// Called once, with the invocation count at which the crash fired
    fn terminate(&self, request_count: u64);
}

/// Exits the process with [`CRASH_EXIT_CODE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, _request_count: u64) {
        std::process::exit(CRASH_EXIT_CODE);
    }
}

/// Records crash decisions instead of exiting
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    calls: Mutex<Vec<u64>>,
}

impl RecordingTerminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request counts passed to `terminate`, in call order
    pub fn calls(&self) -> Vec<u64> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, request_count: u64) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recording_terminator_keeps_order() {
        let terminator = RecordingTerminator::new();
        terminator.terminate(9);
        terminator.terminate(12);
        assert_eq!(terminator.calls(), vec![9, 12]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let recorder = Arc::new(RecordingTerminator::new());
        let terminator: Arc<dyn Terminator> = recorder.clone();
        terminator.terminate(3);
        assert_eq!(recorder.calls(), vec![3]);
    }
}
