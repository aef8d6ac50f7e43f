use rand::rngs::StdRng;
use rand::Rng;

use crate::geometry::ArcHelper;
use crate::network::StreetSegment;
use crate::prelude::{SampleError, SamplePoint, SampleResult};

/// Places evenly spaced sample points along one segment's arc length.
///
/// The randomness source is supplied by the caller per segment, never a
/// global generator, so a fixed sub-seed reproduces the same points and
/// headings regardless of execution order.
pub struct Interpolator {
    spacing_m: f64,
    jitter_fraction: f64,
}

impl Interpolator {
    /// `spacing_m` must be positive. `jitter_fraction` must lie in
    /// [0, 0.5); below one half-step, jittered distances stay strictly
    /// ascending and inside their own cell.
    pub fn new(spacing_m: f64, jitter_fraction: f64) -> SampleResult<Self> {
        if !spacing_m.is_finite() || spacing_m <= 0.0 {
            return Err(SampleError::InvalidInput(format!(
                "spacing must be positive, got {}",
                spacing_m
            )));
        }
        if !jitter_fraction.is_finite() || !(0.0..0.5).contains(&jitter_fraction) {
            return Err(SampleError::InvalidInput(format!(
                "jitter fraction must be in [0, 0.5), got {}",
                jitter_fraction
            )));
        }
        Ok(Self {
            spacing_m,
            jitter_fraction,
        })
    }

    /// Produces points at distances i * length/n for i = 0..n-1 with
    /// n = max(1, round(length / spacing)). The terminal vertex is never
    /// emitted, so a point there cannot duplicate the first point of an
    /// adjacent segment sharing it. When the whole segment is shorter than
    /// the spacing the single point lands at the midpoint rather than an
    /// endpoint.
    pub fn interpolate(
        &self,
        segment: &StreetSegment,
        rng: &mut StdRng,
    ) -> SampleResult<Vec<SamplePoint>> {
        let length_m = ArcHelper::length_m(segment);
        if length_m <= 0.0 {
            return Err(SampleError::InvalidSegment(format!(
                "way {} has zero arc length",
                segment.way_id()
            )));
        }

        let n = ((length_m / self.spacing_m).round() as usize).max(1);
        let step_m = length_m / n as f64;
        let jitter_span = self.jitter_fraction * step_m;

        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let base_m = if n == 1 {
                length_m / 2.0
            } else {
                i as f64 * step_m
            };
            let offset_m = if jitter_span > 0.0 {
                rng.gen_range(-jitter_span..jitter_span)
            } else {
                0.0
            };
            let distance_m = (base_m + offset_m).clamp(0.0, length_m);
            let heading_deg = rng.gen_range(0.0..360.0);

            let coordinate = ArcHelper::point_at_distance(segment, distance_m)?;
            points.push(SamplePoint {
                coordinate,
                way_id: segment.way_id(),
                sample_index: i as u32,
                heading_deg,
                distance_m,
            });
        }
        Ok(points)
    }
}
