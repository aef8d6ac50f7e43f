use autosensecore::network::{NetworkProvider, RawWay, RoadClass, StreetNetwork};
use autosensecore::prelude::{SampleError, SampleResult};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic street grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid size: `blocks` avenues crossed by `blocks` streets.
    pub blocks: usize,
    /// Distance between parallel ways, in degrees.
    pub block_spacing_deg: f64,
    pub origin_lat: f64,
    pub origin_lon: f64,
    /// Per-vertex positional noise, in degrees.
    pub noise_deg: f64,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            blocks: 8,
            block_spacing_deg: 0.004,
            origin_lat: 12.90,
            origin_lon: 77.55,
            noise_deg: 0.0002,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    fn normalized_blocks(&self) -> usize {
        self.blocks.max(2)
    }
}

const CLASS_CYCLE: [(&str, &str); 4] = [
    ("residential", "Lane"),
    ("secondary", "Avenue"),
    ("tertiary", "Cross"),
    ("primary", "Main Road"),
];

/// Builds the raw ways of a jittered street grid: horizontal avenues and
/// vertical streets, each a polyline with one vertex per crossing.
pub fn build_raw_ways(config: &GeneratorConfig) -> SampleResult<Vec<RawWay>> {
    let blocks = config.normalized_blocks();
    let span = config.block_spacing_deg;
    if !span.is_finite() || span <= 0.0 {
        return Err(SampleError::InvalidInput(format!(
            "block spacing must be positive, got {}",
            span
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut noisy = |value: f64| {
        if config.noise_deg > 0.0 {
            value + rng.gen_range(-config.noise_deg..config.noise_deg)
        } else {
            value
        }
    };

    let mut ways = Vec::with_capacity(2 * blocks);
    for row in 0..blocks {
        let lat = config.origin_lat + row as f64 * span;
        let points = (0..blocks)
            .map(|col| {
                let lon = config.origin_lon + col as f64 * span;
                (noisy(lat), noisy(lon))
            })
            .collect();
        let (class, suffix) = CLASS_CYCLE[row % CLASS_CYCLE.len()];
        ways.push(RawWay {
            id: 10_000 + row as u64,
            highway: class.to_string(),
            name: Some(format!("{} {}", ordinal(row + 1), suffix)),
            points,
        });
    }
    for col in 0..blocks {
        let lon = config.origin_lon + col as f64 * span;
        let points = (0..blocks)
            .map(|row| {
                let lat = config.origin_lat + row as f64 * span;
                (noisy(lat), noisy(lon))
            })
            .collect();
        let (class, suffix) = CLASS_CYCLE[col % CLASS_CYCLE.len()];
        ways.push(RawWay {
            id: 20_000 + col as u64,
            highway: class.to_string(),
            name: Some(format!("{} {}", ordinal(col + 1), suffix)),
            points,
        });
    }
    Ok(ways)
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Network provider producing the synthetic grid, used where the real
/// map-data collaborator would plug in.
pub struct GridNetworkProvider {
    config: GeneratorConfig,
}

impl GridNetworkProvider {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }
}

impl NetworkProvider for GridNetworkProvider {
    fn load(&self) -> SampleResult<Vec<RawWay>> {
        build_raw_ways(&self.config)
    }
}

/// Convenience used by tests and the offline path.
pub fn build_network(config: &GeneratorConfig) -> SampleResult<StreetNetwork> {
    let provider = GridNetworkProvider::new(config.clone());
    StreetNetwork::from_provider(&provider, &RoadClass::default_survey_set())
}
