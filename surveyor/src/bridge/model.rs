use autosensecore::pipeline::AssessmentResult;
use serde::{Deserialize, Serialize};

/// Snapshot of the latest survey, served by the HTTP bridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyModel {
    pub point_count: usize,
    pub classified: usize,
    pub image_unavailable: usize,
    pub classification_failed: usize,
    pub cancelled: usize,
    pub results: Vec<AssessmentResult>,
    pub scenario: Option<String>,
}

impl SurveyModel {
    pub fn from_result(result: &crate::workflow::runner::SurveyResult, scenario: Option<String>) -> Self {
        Self {
            point_count: result.point_count,
            classified: result.classified,
            image_unavailable: result.image_unavailable,
            classification_failed: result.classification_failed,
            cancelled: result.cancelled,
            results: result.results.clone(),
            scenario,
        }
    }
}
