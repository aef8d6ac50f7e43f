use serde::{Deserialize, Serialize};

use crate::network::Coordinate;

/// Shared tuning knobs for a sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of street segments to select from the network.
    pub segment_count: usize,
    /// Target spacing between sample points along a segment, in meters.
    pub spacing_m: f64,
    /// Fraction of the spacing used to perturb each point, in [0, 0.5).
    pub jitter_fraction: f64,
}

/// One camera sampling location produced by the interpolator.
///
/// Carries the source way id rather than a reference so the point can
/// outlive the network table it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub coordinate: Coordinate,
    pub way_id: u64,
    /// Position of this point within its segment, ascending along the arc.
    pub sample_index: u32,
    /// Simulated camera bearing in degrees, in [0, 360).
    pub heading_deg: f64,
    /// Arc-length distance from the segment start, in meters.
    pub distance_m: f64,
}

/// Common error type for the sampling subsystem.
#[derive(thiserror::Error, Debug)]
pub enum SampleError {
    #[error("invalid segment: {0}")]
    InvalidSegment(String),
    #[error("distance {distance_m} outside [0, {length_m}]")]
    OutOfRange { distance_m: f64, length_m: f64 },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type SampleResult<T> = Result<T, SampleError>;
