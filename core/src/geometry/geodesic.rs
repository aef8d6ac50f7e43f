use crate::network::Coordinate;
use crate::prelude::SampleResult;

/// Mean Earth radius in meters, per the IUGG reference value. Using one
/// radius everywhere keeps spacing comparable across segments at different
/// latitudes.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

pub struct GeodesicHelper;

impl GeodesicHelper {
    /// Great-circle distance between two coordinates, in meters (haversine).
    pub fn distance_m(a: &Coordinate, b: &Coordinate) -> f64 {
        let lat_a = a.latitude_deg().to_radians();
        let lat_b = b.latitude_deg().to_radians();
        let d_lat = (b.latitude_deg() - a.latitude_deg()).to_radians();
        let d_lon = (b.longitude_deg() - a.longitude_deg()).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().asin()
    }

    /// Linear interpolation between two edge endpoints at parameter
    /// `t` in [0, 1]. Edges are short enough that interpolating degrees
    /// directly is within the precision of the input map data.
    pub fn lerp(a: &Coordinate, b: &Coordinate, t: f64) -> SampleResult<Coordinate> {
        let lat = a.latitude_deg() + (b.latitude_deg() - a.latitude_deg()) * t;
        let lon = a.longitude_deg() + (b.longitude_deg() - a.longitude_deg()) * t;
        Coordinate::new(lat, lon)
    }
}
