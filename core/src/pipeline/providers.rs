use serde::{Deserialize, Serialize};

use crate::network::Coordinate;

/// Failure modes of the external image and vision collaborators.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// The provider has no data for the request (for imagery: no coverage
    /// at the coordinate). Expected and routine.
    #[error("no data available")]
    Unavailable,
    #[error("provider failure: {0}")]
    Failed(String),
}

/// Road surface condition as judged by the vision collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub confidence: f32,
}

/// Structured classification output for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSet {
    pub surface: SurfaceCondition,
    pub objects: Vec<DetectedObject>,
    /// Raw provider response, kept for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl LabelSet {
    /// A classifier returning no labels at all is treated as a
    /// classification failure by the pipeline.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.raw.is_none()
    }
}

/// Fetches a street-level photograph for a coordinate and camera heading.
pub trait ImageProvider: Send + Sync {
    fn fetch(&self, coordinate: &Coordinate, heading_deg: f64) -> Result<Vec<u8>, ProviderError>;
}

/// Classifies a fetched photograph into structured labels.
pub trait VisionClassifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> Result<LabelSet, ProviderError>;
}
