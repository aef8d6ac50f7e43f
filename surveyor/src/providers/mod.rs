pub mod synthetic;

pub use synthetic::{HeuristicClassifier, SyntheticImageProvider};
