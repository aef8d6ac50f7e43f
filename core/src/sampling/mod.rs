pub mod interpolator;
pub mod sampler;
pub mod seed;

pub use interpolator::Interpolator;
pub use sampler::Sampler;
pub use seed::segment_seed;
