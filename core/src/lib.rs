//! Geospatial sampling and assessment core for the AutoSense street-survey
//! platform.
//!
//! The modules turn raw street geometry into seeded, evenly spaced camera
//! sampling points and drive each point through the external image and
//! vision collaborators while preserving input order and per-point failure
//! isolation.

pub mod geometry;
pub mod network;
pub mod pipeline;
pub mod prelude;
pub mod sampling;
pub mod telemetry;

pub use prelude::{SampleError, SamplePoint, SampleResult, SamplingConfig};
