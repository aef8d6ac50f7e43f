pub mod arc;
pub mod geodesic;

pub use arc::ArcHelper;
pub use geodesic::GeodesicHelper;
