//! Background ticker
//!
//! Invokes the engine on a fixed interval for the life of the process, so
//! faults keep happening even when nobody sends requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::{EngineOutcome, FaultEngine, InjectedFault};
use crate::terminate::Terminator;

/// Default tick interval
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Why the ticker loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerExit {
    /// Crash limit reached on a tick; the terminator was called
    Terminated { request_count: u64 },
    /// Another path had already terminated the engine
    Halted,
    /// An injected fault escaped a tick and killed the task
    Faulted(InjectedFault),
}

/// Spawn the ticker on the current tokio runtime
pub fn spawn_ticker(
    engine: Arc<FaultEngine>,
    terminator: Arc<dyn Terminator>,
    interval: Duration,
) -> JoinHandle<TickerExit> {
    tokio::spawn(run_ticker(engine, terminator, interval))
}

/// Tick until something stops the loop
pub async fn run_ticker(
    engine: Arc<FaultEngine>,
    terminator: Arc<dyn Terminator>,
    interval: Duration,
) -> TickerExit {
    loop {
        tokio::time::sleep(interval).await;

        match engine.invoke() {
            Ok(EngineOutcome::Continue(report)) => {
                tracing::info!("📈 Status: {} requests processed", report.request_count);
            }
            Ok(EngineOutcome::Terminate { request_count }) => {
                terminator.terminate(request_count);
                return TickerExit::Terminated { request_count };
            }
            Ok(EngineOutcome::Halted) => return TickerExit::Halted,
            Err(fault) => {
                tracing::error!("Exception in background task: {}", fault.message());
                return TickerExit::Faulted(fault);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ErrorType, FaultConfig};
    use crate::terminate::RecordingTerminator;

    const FAST: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn test_ticker_terminates_at_crash_limit() {
        let engine = Arc::new(FaultEngine::new(FaultConfig {
            crash_after: 3,
            ..Default::default()
        }));
        let terminator = Arc::new(RecordingTerminator::new());

        let exit = run_ticker(engine.clone(), terminator.clone(), FAST).await;

        assert_eq!(exit, TickerExit::Terminated { request_count: 3 });
        assert_eq!(terminator.calls(), vec![3]);
        assert_eq!(engine.request_count(), 3);
    }

    #[tokio::test]
    async fn test_ticker_dies_on_injected_panic() {
        let engine = Arc::new(FaultEngine::new(FaultConfig {
            error_type: ErrorType::Panic,
            error_rate: 1.0,
            ..Default::default()
        }));
        let terminator = Arc::new(RecordingTerminator::new());

        let exit = spawn_ticker(engine.clone(), terminator.clone(), FAST)
            .await
            .unwrap();

        assert!(matches!(exit, TickerExit::Faulted(InjectedFault::Panic { request_count: 1, .. })));
        assert!(terminator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ticker_stops_when_already_halted() {
        let engine = Arc::new(FaultEngine::new(FaultConfig {
            crash_after: 1,
            ..Default::default()
        }));
        let _ = engine.invoke();
        let terminator = Arc::new(RecordingTerminator::new());

        let exit = run_ticker(engine, terminator.clone(), FAST).await;

        assert_eq!(exit, TickerExit::Halted);
        assert!(terminator.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_keeps_counting() {
        let engine = Arc::new(FaultEngine::new(FaultConfig::default()));
        let terminator = Arc::new(RecordingTerminator::new());

        let handle = spawn_ticker(engine.clone(), terminator, DEFAULT_TICK_INTERVAL);
        tokio::time::sleep(DEFAULT_TICK_INTERVAL * 3 + Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(engine.request_count(), 3);
    }
}
