use serde::{Deserialize, Serialize};

use crate::network::{Coordinate, RoadClass, StreetSegment};
use crate::prelude::SampleResult;
use crate::telemetry::log::LogManager;

/// Untyped way record as produced by a network provider, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWay {
    pub id: u64,
    pub highway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Vertex list as (latitude, longitude) degree pairs.
    pub points: Vec<(f64, f64)>,
}

/// Source of raw street geometry for a geographic region.
///
/// Total unreachability is the only fatal failure; individual malformed
/// ways are handled downstream by [`StreetNetwork::from_raw_ways`].
pub trait NetworkProvider {
    fn load(&self) -> SampleResult<Vec<RawWay>>;
}

/// Geographic extent of a network, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Extract URL for the upstream map-data service covering this box.
    pub fn extract_url(&self) -> String {
        format!(
            "http://extract.bbbike.org/?sw_lng={}&sw_lat={}&ne_lng={}&ne_lat={}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Immutable table of validated street segments.
#[derive(Debug, Clone, Default)]
pub struct StreetNetwork {
    segments: Vec<StreetSegment>,
}

impl StreetNetwork {
    /// Builds a network from raw ways, keeping only the given road classes.
    ///
    /// Malformed ways (unparseable class, bad coordinates, degenerate
    /// polylines) are skipped with a logged count, never propagated.
    pub fn from_raw_ways(ways: Vec<RawWay>, classes: &[RoadClass]) -> Self {
        let logger = LogManager::new();
        let mut segments = Vec::new();
        let mut skipped = 0usize;
        let mut filtered = 0usize;

        for way in ways {
            let class = match RoadClass::from_tag(&way.highway) {
                Some(class) if classes.contains(&class) => class,
                Some(_) | None => {
                    filtered += 1;
                    continue;
                }
            };
            match Self::build_segment(&way, class) {
                Ok(segment) => segments.push(segment),
                Err(err) => {
                    log::warn!("skipping way {}: {}", way.id, err);
                    skipped += 1;
                }
            }
        }

        logger.record(&format!(
            "network loaded: {} segments kept, {} malformed skipped, {} filtered by class",
            segments.len(),
            skipped,
            filtered
        ));
        Self { segments }
    }

    /// Loads from a provider and validates. Provider failure is fatal and
    /// propagated to the caller.
    pub fn from_provider<P: NetworkProvider>(
        provider: &P,
        classes: &[RoadClass],
    ) -> SampleResult<Self> {
        let ways = provider.load()?;
        Ok(Self::from_raw_ways(ways, classes))
    }

    fn build_segment(way: &RawWay, class: RoadClass) -> SampleResult<StreetSegment> {
        let mut points = Vec::with_capacity(way.points.len());
        for &(lat, lon) in &way.points {
            points.push(Coordinate::new(lat, lon)?);
        }
        StreetSegment::new(way.id, points, class, way.name.clone())
    }

    pub fn segments(&self) -> &[StreetSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Bounding box over every vertex, or `None` for an empty network.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut vertices = self
            .segments
            .iter()
            .flat_map(|segment| segment.points().iter());
        let first = vertices.next()?;
        let mut bbox = BoundingBox {
            min_lat: first.latitude_deg(),
            min_lon: first.longitude_deg(),
            max_lat: first.latitude_deg(),
            max_lon: first.longitude_deg(),
        };
        for vertex in vertices {
            bbox.min_lat = bbox.min_lat.min(vertex.latitude_deg());
            bbox.min_lon = bbox.min_lon.min(vertex.longitude_deg());
            bbox.max_lat = bbox.max_lat.max(vertex.latitude_deg());
            bbox.max_lon = bbox.max_lon.max(vertex.longitude_deg());
        }
        Some(bbox)
    }
}
