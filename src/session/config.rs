use crate::Count;
use crate::Probability;
use std::time::Duration;

/// tunables for the inference backends, fixed at session creation.
/// the seed makes every sampled table reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// enumerate exactly when the workload bound stays under this
    pub tau_exact: Count,
    /// rejection sampling needs at least this acceptance rate
    pub alpha_floor: Probability,
    /// attempts spent probing the acceptance rate
    pub pilot: usize,
    /// valid samples to accumulate
    pub target: usize,
    /// swap-chain burn-in, in sweeps
    pub burn_in: usize,
    /// master seed for every generator stream
    pub seed: u64,
    /// optional budget per marginal query
    pub deadline: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tau_exact: crate::TAU_EXACT,
            alpha_floor: crate::ALPHA_FLOOR,
            pilot: crate::PILOT_SAMPLES,
            target: crate::TARGET_SAMPLES,
            burn_in: crate::BURN_IN_SWEEPS,
            seed: 0,
            deadline: None,
        }
    }
}
