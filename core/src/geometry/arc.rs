use crate::geometry::GeodesicHelper;
use crate::network::{Coordinate, StreetSegment};
use crate::prelude::{SampleError, SampleResult};

pub struct ArcHelper;

impl ArcHelper {
    /// Total arc length of a segment's polyline, in meters.
    pub fn length_m(segment: &StreetSegment) -> f64 {
        segment
            .points()
            .windows(2)
            .map(|pair| GeodesicHelper::distance_m(&pair[0], &pair[1]))
            .sum()
    }

    /// Cumulative distance at each vertex, starting at 0.0.
    pub fn cumulative_m(segment: &StreetSegment) -> Vec<f64> {
        let points = segment.points();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += GeodesicHelper::distance_m(&pair[0], &pair[1]);
            cumulative.push(total);
        }
        cumulative
    }

    /// Coordinate at arc-length `distance_m` along the polyline, linearly
    /// interpolated inside the containing edge.
    ///
    /// `OutOfRange` here indicates a caller bug, not bad map data; the
    /// interpolator only requests clamped in-range distances.
    pub fn point_at_distance(
        segment: &StreetSegment,
        distance_m: f64,
    ) -> SampleResult<Coordinate> {
        let cumulative = Self::cumulative_m(segment);
        let length_m = match cumulative.last() {
            Some(&length) => length,
            None => 0.0,
        };
        if !distance_m.is_finite() || distance_m < 0.0 || distance_m > length_m {
            return Err(SampleError::OutOfRange {
                distance_m,
                length_m,
            });
        }

        let points = segment.points();
        for (edge, window) in cumulative.windows(2).enumerate() {
            let (start, end) = (window[0], window[1]);
            if distance_m <= end {
                let edge_len = end - start;
                let t = if edge_len > 0.0 {
                    (distance_m - start) / edge_len
                } else {
                    0.0
                };
                return GeodesicHelper::lerp(&points[edge], &points[edge + 1], t);
            }
        }
        // distance_m == length_m and accumulated rounding left it past the
        // final window; the terminal vertex is the exact answer.
        match points.last() {
            Some(last) => Ok(*last),
            None => Err(SampleError::Internal("segment with no vertices".into())),
        }
    }
}
