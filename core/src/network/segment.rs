use serde::{Deserialize, Serialize};

use crate::network::RoadClass;
use crate::prelude::{SampleError, SampleResult};

/// Geographic position in double-precision degrees.
///
/// Range checked at construction; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl Coordinate {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> SampleResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(SampleError::InvalidSegment(format!(
                "latitude {} outside [-90, 90]",
                latitude_deg
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(SampleError::InvalidSegment(format!(
                "longitude {} outside [-180, 180]",
                longitude_deg
            )));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}

/// One street way as an ordered polyline between two topological nodes.
///
/// Invariants enforced at construction: at least two vertices, no two
/// consecutive vertices identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetSegment {
    way_id: u64,
    points: Vec<Coordinate>,
    road_class: RoadClass,
    name: Option<String>,
}

impl StreetSegment {
    pub fn new(
        way_id: u64,
        points: Vec<Coordinate>,
        road_class: RoadClass,
        name: Option<String>,
    ) -> SampleResult<Self> {
        if points.len() < 2 {
            return Err(SampleError::InvalidSegment(format!(
                "way {} has {} vertices, need at least 2",
                way_id,
                points.len()
            )));
        }
        for pair in points.windows(2) {
            if pair[0] == pair[1] {
                return Err(SampleError::InvalidSegment(format!(
                    "way {} contains a zero-length sub-segment",
                    way_id
                )));
            }
        }
        Ok(Self {
            way_id,
            points,
            road_class,
            name,
        })
    }

    pub fn way_id(&self) -> u64 {
        self.way_id
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn road_class(&self) -> RoadClass {
        self.road_class
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn coordinate_rejects_out_of_range_latitude() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn segment_requires_two_vertices() {
        let result = StreetSegment::new(1, vec![coord(0.0, 0.0)], RoadClass::Residential, None);
        assert!(matches!(result, Err(SampleError::InvalidSegment(_))));
    }

    #[test]
    fn segment_rejects_duplicate_consecutive_vertices() {
        let result = StreetSegment::new(
            2,
            vec![coord(0.0, 0.0), coord(0.0, 0.0), coord(0.0, 0.01)],
            RoadClass::Primary,
            None,
        );
        assert!(matches!(result, Err(SampleError::InvalidSegment(_))));
    }

    #[test]
    fn segment_keeps_vertex_order() {
        let segment = StreetSegment::new(
            3,
            vec![coord(0.0, 0.0), coord(0.0, 0.01), coord(0.01, 0.01)],
            RoadClass::Secondary,
            Some("Harbour Road".into()),
        )
        .unwrap();
        assert_eq!(segment.points().len(), 3);
        assert_eq!(segment.points()[1], coord(0.0, 0.01));
        assert_eq!(segment.name(), Some("Harbour Road"));
    }
}
