use std::sync::Arc;

use anyhow::Context;
use autosensecore::network::StreetNetwork;
use autosensecore::pipeline::{
    AssessmentOutcome, AssessmentPipeline, AssessmentResult, CancelFlag, FailureReason,
};
use autosensecore::sampling::Sampler;
use tokio::runtime::Builder as TokioBuilder;

use crate::providers::{HeuristicClassifier, SyntheticImageProvider};
use crate::workflow::config::SurveyConfig;

pub struct SurveyResult {
    pub point_count: usize,
    pub classified: usize,
    pub image_unavailable: usize,
    pub classification_failed: usize,
    pub cancelled: usize,
    pub results: Vec<AssessmentResult>,
}

#[derive(Clone)]
pub struct Runner {
    config: SurveyConfig,
}

impl Runner {
    pub fn new(config: SurveyConfig) -> Self {
        Self { config }
    }

    pub async fn execute_async(
        &self,
        network: &StreetNetwork,
        cancel: CancelFlag,
    ) -> anyhow::Result<SurveyResult> {
        let sampler =
            Sampler::new(self.config.to_sampling_config()).context("building sampler")?;
        let points = sampler
            .sample(network, self.config.seed)
            .context("sampling street network")?;
        let point_count = points.len();

        let pipeline = AssessmentPipeline::new(self.config.max_in_flight);
        let provider = Arc::new(SyntheticImageProvider::new(
            self.config.seed,
            self.config.coverage,
        ));
        let classifier = Arc::new(HeuristicClassifier::new());
        let results = pipeline.assess(points, provider, classifier, cancel).await;

        let mut summary = SurveyResult {
            point_count,
            classified: 0,
            image_unavailable: 0,
            classification_failed: 0,
            cancelled: 0,
            results,
        };
        for result in &summary.results {
            match &result.outcome {
                AssessmentOutcome::Classified(_) => summary.classified += 1,
                AssessmentOutcome::Failed(FailureReason::ImageUnavailable) => {
                    summary.image_unavailable += 1
                }
                AssessmentOutcome::Failed(FailureReason::ClassificationFailed(_)) => {
                    summary.classification_failed += 1
                }
                AssessmentOutcome::Failed(FailureReason::Cancelled) => summary.cancelled += 1,
            }
        }
        Ok(summary)
    }

    /// Blocking wrapper for the offline path; builds its own runtime.
    pub fn execute(&self, network: &StreetNetwork) -> anyhow::Result<SurveyResult> {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for survey execution")?;
        runtime.block_on(self.execute_async(network, CancelFlag::new()))
    }
}
