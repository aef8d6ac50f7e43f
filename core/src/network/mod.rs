pub mod road_class;
pub mod segment;
pub mod street_network;

pub use road_class::RoadClass;
pub use segment::{Coordinate, StreetSegment};
pub use street_network::{BoundingBox, NetworkProvider, RawWay, StreetNetwork};
