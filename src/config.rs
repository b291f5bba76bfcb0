use crate::error::CompressorError;
use std::str::FromStr;

/// Widest lookback the planner accepts. A zero run, the longest single
/// instruction, decompresses to at most this many bytes.
pub const MAX_LOOKBACK: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerMode {
    /// Prefix dynamic programming over a bounded lookback window.
    Optimal,
    /// One greedy segment pass over the whole input.
    Greedy,
}

#[derive(Debug, Clone)]
pub struct CompressorConfig {
    pub mode: PlannerMode,
    pub lookback: usize,
    pub threads: usize,
    /// Decode every result and compare it with the input before returning.
    pub verify: bool,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            mode: PlannerMode::Optimal,
            lookback: MAX_LOOKBACK,
            threads: num_cpus::get(),
            verify: true,
        }
    }
}

impl CompressorConfig {
    pub fn with_mode(mut self, mode: PlannerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn validate(&self) -> Result<(), CompressorError> {
        if self.lookback == 0 || self.lookback > MAX_LOOKBACK {
            return Err(CompressorError::ConfigError(format!(
                "lookback must be in 1..={}, got {}",
                MAX_LOOKBACK, self.lookback
            )));
        }
        if self.threads == 0 {
            return Err(CompressorError::ConfigError("threads must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl FromStr for PlannerMode {
    type Err = CompressorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" => Ok(PlannerMode::Optimal),
            "greedy" => Ok(PlannerMode::Greedy),
            _ => Err(CompressorError::ConfigError(format!("Invalid mode: {}", s))),
        }
    }
}
