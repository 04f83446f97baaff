//! Mutable engine state
//!
//! Lives for the whole process. Only the engine mutates it, always while
//! holding the engine lock.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Units per leaked block
pub const LEAK_BLOCK_UNITS: usize = 10_000;

/// Emit a leak warning every this many blocks
pub const LEAK_WARN_EVERY: usize = 10;

/// Process-wide fault state
#[derive(Debug)]
pub struct EngineState {
    pub(crate) request_count: u64,
    pub(crate) leaked_blocks: Vec<Vec<u64>>,
    pub(crate) terminated: bool,
    pub(crate) rng: StdRng,
}

impl EngineState {
    /// Create fresh state; `seed` pins the probabilistic draws
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            request_count: 0,
            leaked_blocks: Vec::new(),
            terminated: false,
            rng,
        }
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Number of leaked blocks
    pub fn leaked_blocks(&self) -> usize {
        self.leaked_blocks.len()
    }

    /// Total leaked units across all blocks
    pub fn leaked_units(&self) -> usize {
        self.leaked_blocks.iter().map(Vec::len).sum()
    }

    /// Whether the crash policy has fired
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Append one zeroed block, returning the new block count
    pub(crate) fn leak_block(&mut self) -> usize {
        self.leaked_blocks.push(vec![0u64; LEAK_BLOCK_UNITS]);
        self.leaked_blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = EngineState::new(None);
        assert_eq!(state.request_count(), 0);
        assert_eq!(state.leaked_blocks(), 0);
        assert_eq!(state.leaked_units(), 0);
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_leak_block_grows() {
        let mut state = EngineState::new(Some(1));
        assert_eq!(state.leak_block(), 1);
        assert_eq!(state.leak_block(), 2);
        assert_eq!(state.leaked_units(), 2 * LEAK_BLOCK_UNITS);
    }
}
