use anyhow::Context;
use autosensecore::prelude::SamplingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub segment_count: usize,
    pub spacing_m: f64,
    #[serde(default)]
    pub jitter_fraction: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    /// Fraction of locations the synthetic image provider covers.
    #[serde(default = "default_coverage")]
    pub coverage: f64,
}

fn default_max_in_flight() -> usize {
    4
}

fn default_coverage() -> f64 {
    0.9
}

impl SurveyConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading survey config {}", path_ref.display()))?;
        let config: SurveyConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing survey config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(segment_count: usize, spacing_m: f64, jitter_fraction: f64, seed: u64) -> Self {
        Self {
            segment_count,
            spacing_m,
            jitter_fraction,
            seed,
            max_in_flight: default_max_in_flight(),
            coverage: default_coverage(),
        }
    }

    pub fn to_sampling_config(&self) -> SamplingConfig {
        SamplingConfig {
            segment_count: self.segment_count,
            spacing_m: self.spacing_m,
            jitter_fraction: self.jitter_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_sampling_config() {
        let cfg = SurveyConfig::from_args(12, 250.0, 0.2, 7);
        let sampling = cfg.to_sampling_config();
        assert_eq!(sampling.segment_count, 12);
        assert_eq!(sampling.spacing_m, 250.0);
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"segment_count: 6\nspacing_m: 400.0\nseed: 3\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = SurveyConfig::load(&path).unwrap();
        assert_eq!(cfg.segment_count, 6);
        assert_eq!(cfg.seed, 3);
        assert_eq!(cfg.max_in_flight, 4);
        assert_eq!(cfg.jitter_fraction, 0.0);
    }
}
