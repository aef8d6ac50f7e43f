pub mod assessment;
pub mod cancel;
pub mod providers;

pub use assessment::{AssessmentOutcome, AssessmentPipeline, AssessmentResult, FailureReason};
pub use cancel::CancelFlag;
pub use providers::{
    DetectedObject, ImageProvider, LabelSet, ProviderError, SurfaceCondition, VisionClassifier,
};
