use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::providers::{ImageProvider, LabelSet, ProviderError, VisionClassifier};
use crate::prelude::SamplePoint;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// Why a point produced no classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FailureReason {
    /// The image provider had no imagery for the coordinate.
    ImageUnavailable,
    /// Imagery existed but the vision collaborator errored or returned an
    /// empty label set.
    ClassificationFailed(String),
    /// The batch was cancelled before this point was dispatched.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Classified(LabelSet),
    Failed(FailureReason),
}

impl AssessmentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}

/// Terminal per-point record: the point plus what became of it. Image
/// bytes are released once classification finishes and are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub point: SamplePoint,
    pub outcome: AssessmentOutcome,
}

/// Drives sample points through the image and vision collaborators with
/// bounded concurrency.
///
/// One result per input point, in input order, regardless of completion
/// order. A failure at one point never affects the others, and there are
/// no retries here; retry policy belongs to the providers.
pub struct AssessmentPipeline {
    max_in_flight: usize,
    logger: LogManager,
    metrics: Arc<MetricsRecorder>,
}

impl AssessmentPipeline {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            logger: LogManager::new(),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Returns (assessed, failures) for everything run so far.
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    pub async fn assess<P, C>(
        &self,
        points: Vec<SamplePoint>,
        provider: Arc<P>,
        classifier: Arc<C>,
        cancel: CancelFlag,
    ) -> Vec<AssessmentResult>
    where
        P: ImageProvider + 'static,
        C: VisionClassifier + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut slots: Vec<Option<AssessmentOutcome>> = vec![None; points.len()];
        let mut tasks = Vec::new();

        for (index, point) in points.iter().enumerate() {
            if cancel.is_cancelled() {
                slots[index] = Some(AssessmentOutcome::Failed(FailureReason::Cancelled));
                continue;
            }
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    slots[index] = Some(AssessmentOutcome::Failed(FailureReason::Cancelled));
                    continue;
                }
            };
            // waiting on the permit may have raced a cancellation
            if cancel.is_cancelled() {
                slots[index] = Some(AssessmentOutcome::Failed(FailureReason::Cancelled));
                continue;
            }

            let point = point.clone();
            let provider = provider.clone();
            let classifier = classifier.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let outcome = evaluate_point(&point, provider.as_ref(), classifier.as_ref());
                drop(permit);
                outcome
            });
            tasks.push((index, handle));
        }

        for (index, handle) in tasks {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => AssessmentOutcome::Failed(FailureReason::ClassificationFailed(
                    format!("assessment task failed: {}", err),
                )),
            };
            self.metrics.record_assessed();
            if !outcome.is_success() {
                self.metrics.record_failure();
            }
            slots[index] = Some(outcome);
        }

        let results: Vec<AssessmentResult> = points
            .into_iter()
            .zip(slots)
            .map(|(point, slot)| AssessmentResult {
                point,
                outcome: slot
                    .unwrap_or(AssessmentOutcome::Failed(FailureReason::Cancelled)),
            })
            .collect();

        let failures = results.iter().filter(|r| !r.outcome.is_success()).count();
        self.logger.record(&format!(
            "assessed {} points, {} failures",
            results.len(),
            failures
        ));
        results
    }
}

/// Pending -> image fetched -> classified, or a failed outcome at either
/// step. The fetched image lives only inside this call.
fn evaluate_point<P, C>(point: &SamplePoint, provider: &P, classifier: &C) -> AssessmentOutcome
where
    P: ImageProvider + ?Sized,
    C: VisionClassifier + ?Sized,
{
    let image = match provider.fetch(&point.coordinate, point.heading_deg) {
        Ok(bytes) => bytes,
        Err(ProviderError::Unavailable) => {
            return AssessmentOutcome::Failed(FailureReason::ImageUnavailable)
        }
        Err(ProviderError::Failed(msg)) => {
            log::warn!("image fetch failed for way {}: {}", point.way_id, msg);
            return AssessmentOutcome::Failed(FailureReason::ImageUnavailable);
        }
    };

    match classifier.classify(&image) {
        Ok(labels) if labels.is_empty() => AssessmentOutcome::Failed(
            FailureReason::ClassificationFailed("empty label set".to_string()),
        ),
        Ok(labels) => AssessmentOutcome::Classified(labels),
        Err(err) => {
            AssessmentOutcome::Failed(FailureReason::ClassificationFailed(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Coordinate;
    use crate::pipeline::providers::SurfaceCondition;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn run<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn test_points(count: usize) -> Vec<SamplePoint> {
        (0..count)
            .map(|i| SamplePoint {
                coordinate: Coordinate::new(0.0, i as f64 * 0.001).unwrap(),
                way_id: 500,
                sample_index: i as u32,
                heading_deg: i as f64 * 10.0,
                distance_m: i as f64 * 100.0,
            })
            .collect()
    }

    fn labels() -> LabelSet {
        LabelSet {
            surface: SurfaceCondition::Fair,
            objects: vec![crate::pipeline::providers::DetectedObject {
                label: "pothole".to_string(),
                confidence: 0.8,
            }],
            raw: None,
        }
    }

    /// Fails `fetch` for one zero-based call index; sequential under
    /// `max_in_flight = 1`.
    struct FlakyProvider {
        calls: AtomicUsize,
        fail_on: usize,
    }

    impl ImageProvider for FlakyProvider {
        fn fetch(&self, _: &Coordinate, _: f64) -> Result<Vec<u8>, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_on {
                Err(ProviderError::Unavailable)
            } else {
                Ok(vec![0xFF, 0xD8, call as u8])
            }
        }
    }

    struct FixedClassifier;

    impl VisionClassifier for FixedClassifier {
        fn classify(&self, _: &[u8]) -> Result<LabelSet, ProviderError> {
            Ok(labels())
        }
    }

    #[test]
    fn failure_at_one_point_is_isolated() {
        let pipeline = AssessmentPipeline::new(1);
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_on: 2,
        });
        let results = run(pipeline.assess(
            test_points(5),
            provider,
            Arc::new(FixedClassifier),
            CancelFlag::new(),
        ));

        assert_eq!(results.len(), 5);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.point.sample_index, i as u32, "order preserved");
            if i == 2 {
                assert_eq!(
                    result.outcome,
                    AssessmentOutcome::Failed(FailureReason::ImageUnavailable)
                );
            } else {
                assert!(result.outcome.is_success());
            }
        }
        assert_eq!(pipeline.metrics_snapshot(), (5, 1));
    }

    #[test]
    fn classifier_error_is_distinguished_from_missing_imagery() {
        struct BrokenClassifier;
        impl VisionClassifier for BrokenClassifier {
            fn classify(&self, _: &[u8]) -> Result<LabelSet, ProviderError> {
                Err(ProviderError::Failed("model timeout".to_string()))
            }
        }

        let pipeline = AssessmentPipeline::new(2);
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_on: usize::MAX,
        });
        let results = run(pipeline.assess(
            test_points(2),
            provider,
            Arc::new(BrokenClassifier),
            CancelFlag::new(),
        ));
        for result in results {
            assert!(matches!(
                result.outcome,
                AssessmentOutcome::Failed(FailureReason::ClassificationFailed(_))
            ));
        }
    }

    #[test]
    fn empty_label_set_counts_as_classification_failure() {
        struct EmptyClassifier;
        impl VisionClassifier for EmptyClassifier {
            fn classify(&self, _: &[u8]) -> Result<LabelSet, ProviderError> {
                Ok(LabelSet {
                    surface: SurfaceCondition::Good,
                    objects: Vec::new(),
                    raw: None,
                })
            }
        }

        let pipeline = AssessmentPipeline::new(1);
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_on: usize::MAX,
        });
        let results = run(pipeline.assess(
            test_points(1),
            provider,
            Arc::new(EmptyClassifier),
            CancelFlag::new(),
        ));
        assert!(matches!(
            results[0].outcome,
            AssessmentOutcome::Failed(FailureReason::ClassificationFailed(_))
        ));
    }

    /// Cancels the shared flag after its second successful fetch.
    struct CancellingProvider {
        calls: AtomicUsize,
        cancel_after: usize,
        flag: CancelFlag,
    }

    impl ImageProvider for CancellingProvider {
        fn fetch(&self, _: &Coordinate, _: f64) -> Result<Vec<u8>, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.cancel_after {
                self.flag.cancel();
            }
            Ok(vec![0xFF, 0xD8])
        }
    }

    #[test]
    fn cancellation_keeps_completed_results_and_marks_the_rest() {
        let flag = CancelFlag::new();
        let pipeline = AssessmentPipeline::new(1);
        let provider = Arc::new(CancellingProvider {
            calls: AtomicUsize::new(0),
            cancel_after: 2,
            flag: flag.clone(),
        });
        let results = run(pipeline.assess(
            test_points(5),
            provider,
            Arc::new(FixedClassifier),
            flag,
        ));

        assert_eq!(results.len(), 5);
        let completed = results.iter().filter(|r| r.outcome.is_success()).count();
        assert!(completed >= 2);
        for result in &results[completed..] {
            assert_eq!(
                result.outcome,
                AssessmentOutcome::Failed(FailureReason::Cancelled)
            );
        }
    }

    #[test]
    fn pre_cancelled_batch_marks_every_point() {
        let flag = CancelFlag::new();
        flag.cancel();
        let pipeline = AssessmentPipeline::new(4);
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_on: usize::MAX,
        });
        let results = run(pipeline.assess(
            test_points(3),
            provider.clone(),
            Arc::new(FixedClassifier),
            flag,
        ));
        assert!(results.iter().all(|r| r.outcome
            == AssessmentOutcome::Failed(FailureReason::Cancelled)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
