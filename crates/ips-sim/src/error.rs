use ips_core::{IpsError, Tick};
use ips_heatmap::HeatmapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] IpsError),

    #[error("suite expects {expected} sensor RNG streams, got {got}")]
    SensorCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("row for {got} does not follow {expected}")]
    OutOfOrder {
        expected: Tick,
        got:      Tick,
    },

    #[error("timestamp {got} at {tick} is not after previous timestamp {previous}")]
    NonMonotonic {
        tick:     Tick,
        got:      i64,
        previous: i64,
    },

    #[error("heatmap error: {0}")]
    Heatmap(#[from] HeatmapError),
}

pub type SimResult<T> = Result<T, SimError>;
