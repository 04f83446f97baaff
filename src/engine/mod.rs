//! # Fault Engine
//!
//! Decides, per invocation, which synthetic failures happen. Invocations
//! come from HTTP requests and from the background ticker; both share one
//! engine through an `Arc`.
//!
//! Policies run in a fixed order on every invocation:
//!
//! 1. count the invocation
//! 2. crash-after: stop everything once the configured count is reached
//! 3. memory pressure: leak one block
//! 4. probabilistic error: log a random catalog error, escalate on `panic`
//! 5. fixed error type: log the line for the configured failure class
//!
//! The engine never exits the process. A crash is reported as
//! [`EngineOutcome::Terminate`] and the caller acts on it.

mod catalog;
mod errors;
mod state;

pub use catalog::{fixed_error_line, ERROR_MESSAGES};
pub use errors::{ErrorResponse, InjectedFault};
pub use state::{EngineState, LEAK_BLOCK_UNITS, LEAK_WARN_EVERY};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

use crate::config::{ErrorType, FaultConfig};
use crate::observability::CRITICAL_TARGET;

/// Something the engine logged during one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultEvent {
    /// Leak warning, emitted every [`LEAK_WARN_EVERY`] blocks
    MemoryLeak { total_units: usize },
    /// Catalog error chosen by the probabilistic policy
    RandomError { message: &'static str },
    /// Line for the configured fixed error type
    FixedError { error_type: ErrorType, message: &'static str },
}

/// Summary of a completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    pub request_count: u64,
    pub events: Vec<FaultEvent>,
}

impl InvocationReport {
    /// Number of probabilistic errors in this invocation (0 or 1)
    pub fn random_errors(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FaultEvent::RandomError { .. }))
            .count()
    }
}

/// What the caller should do after an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// Keep serving
    Continue(InvocationReport),
    /// The crash limit was reached on this invocation; exit the process
    Terminate { request_count: u64 },
    /// A previous invocation already terminated; nothing was done
    Halted,
}

/// Shared fault engine
#[derive(Debug)]
pub struct FaultEngine {
    config: Arc<FaultConfig>,
    state: Mutex<EngineState>,
}

impl FaultEngine {
    pub fn new(config: FaultConfig) -> Self {
        let state = EngineState::new(config.seed);
        Self {
            config: Arc::new(config),
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &FaultConfig {
        &self.config
    }

    /// Run one invocation under the engine lock
    pub fn invoke(&self) -> Result<EngineOutcome, InjectedFault> {
        let mut state = self.lock();
        Self::invoke_with(&self.config, &mut state)
    }

    /// Current invocation count
    pub fn request_count(&self) -> u64 {
        self.lock().request_count()
    }

    pub fn leaked_blocks(&self) -> usize {
        self.lock().leaked_blocks()
    }

    pub fn leaked_units(&self) -> usize {
        self.lock().leaked_units()
    }

    pub fn is_terminated(&self) -> bool {
        self.lock().is_terminated()
    }

    // Every policy leaves the state consistent, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply all policies to `state`. The caller provides exclusive access.
    pub fn invoke_with(
        config: &FaultConfig,
        state: &mut EngineState,
    ) -> Result<EngineOutcome, InjectedFault> {
        if state.terminated {
            return Ok(EngineOutcome::Halted);
        }

        state.request_count += 1;
        let request_count = state.request_count;

        if config.crash_enabled() && request_count >= config.crash_after {
            tracing::error!(
                target: CRITICAL_TARGET,
                "💥 FATAL: Crash limit reached after {} requests!",
                request_count
            );
            state.terminated = true;
            return Ok(EngineOutcome::Terminate { request_count });
        }

        let mut events = Vec::new();

        if config.oom_trigger {
            let blocks = state.leak_block();
            if blocks % LEAK_WARN_EVERY == 0 {
                let total_units = blocks * LEAK_BLOCK_UNITS;
                tracing::warn!("⚠️  Memory leak: {} items allocated", total_units);
                events.push(FaultEvent::MemoryLeak { total_units });
            }
        }

        if state.rng.gen::<f64>() < config.error_rate {
            let message = ERROR_MESSAGES[state.rng.gen_range(0..ERROR_MESSAGES.len())];
            tracing::error!("❌ ERROR [{}]: {}", request_count, message);
            events.push(FaultEvent::RandomError { message });

            if config.error_type == ErrorType::Panic {
                return Err(InjectedFault::Panic {
                    request_count,
                    message: message.to_string(),
                });
            }
        }

        if let Some(message) = fixed_error_line(&config.error_type) {
            tracing::error!("❌ {}", message);
            events.push(FaultEvent::FixedError {
                error_type: config.error_type.clone(),
                message,
            });
        }

        Ok(EngineOutcome::Continue(InvocationReport {
            request_count,
            events,
        }))
    }
}
