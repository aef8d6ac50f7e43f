//! Deterministic stand-ins for the external imagery and vision services.
//! Offline runs and the HTTP bridge use these; real deployments swap in
//! HTTP-backed implementations of the same core traits.

use autosensecore::network::Coordinate;
use autosensecore::pipeline::{
    DetectedObject, ImageProvider, LabelSet, ProviderError, SurfaceCondition, VisionClassifier,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;

/// Mixes a location into a per-request seed so availability and image
/// content are stable for a given (coordinate, heading) across runs.
fn location_seed(seed: u64, coordinate: &Coordinate, heading_deg: f64) -> u64 {
    let lat_bits = (coordinate.latitude_deg() * 1e6).round() as i64 as u64;
    let lon_bits = (coordinate.longitude_deg() * 1e6).round() as i64 as u64;
    let heading_bits = (heading_deg * 10.0).round() as i64 as u64;
    seed ^ lat_bits.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ lon_bits.rotate_left(21)
        ^ heading_bits.rotate_left(42)
}

/// Image source with partial coverage: a seeded fraction of locations has
/// no imagery, mirroring rural gaps in real street-level services.
pub struct SyntheticImageProvider {
    seed: u64,
    coverage: f64,
}

impl SyntheticImageProvider {
    pub fn new(seed: u64, coverage: f64) -> Self {
        Self {
            seed,
            coverage: coverage.clamp(0.0, 1.0),
        }
    }
}

impl ImageProvider for SyntheticImageProvider {
    fn fetch(&self, coordinate: &Coordinate, heading_deg: f64) -> Result<Vec<u8>, ProviderError> {
        let mut rng = StdRng::seed_from_u64(location_seed(self.seed, coordinate, heading_deg));
        if rng.gen::<f64>() >= self.coverage {
            return Err(ProviderError::Unavailable);
        }
        // JPEG SOI marker followed by a deterministic body
        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend((0..64).map(|_| rng.gen::<u8>()));
        Ok(bytes)
    }
}

/// Classifier deriving labels from the image bytes alone, so identical
/// images always classify identically.
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

const OBJECT_LABELS: [&str; 4] = ["pothole", "crack", "faded_marking", "debris"];

impl VisionClassifier for HeuristicClassifier {
    fn classify(&self, image: &[u8]) -> Result<LabelSet, ProviderError> {
        if image.len() < 2 || image[0] != 0xFF || image[1] != 0xD8 {
            return Err(ProviderError::Failed("not a JPEG payload".to_string()));
        }

        let checksum: u64 = image.iter().map(|&b| b as u64).sum();
        let surface = match checksum % 3 {
            0 => SurfaceCondition::Good,
            1 => SurfaceCondition::Fair,
            _ => SurfaceCondition::Poor,
        };
        let objects: Vec<DetectedObject> = OBJECT_LABELS
            .iter()
            .enumerate()
            .filter(|(i, _)| checksum >> i & 1 == 1)
            .map(|(i, label)| DetectedObject {
                label: label.to_string(),
                confidence: 0.5 + 0.1 * i as f32,
            })
            .collect();

        Ok(LabelSet {
            surface,
            objects,
            raw: Some(json!({ "checksum": checksum, "bytes": image.len() })),
        })
    }
}
