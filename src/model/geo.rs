//! Geographic primitives: coordinates, named places, great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IUGG value).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A geographic point in decimal degrees.
///
/// `#[repr(C)]` with two `f64` fields, so the same type crosses the FFI
/// boundary verbatim — no raw mirror struct is needed. No range validation
/// is performed; callers may carry whatever the upstream sensor produced.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (positive north).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive east).
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate with the fields set verbatim.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters, by the haversine formula.
    ///
    /// Symmetric and non-negative for finite inputs.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Clamp against rounding drift before asin.
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A named geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Human-readable label. Owned; never borrows caller memory.
    pub name: String,
    /// Location of the place.
    pub coordinate: Coordinate,
}

impl Place {
    /// Build a place from a label and raw coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: Coordinate = Coordinate {
        latitude: 52.52,
        longitude: 13.405,
    };
    const PARIS: Coordinate = Coordinate {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn test_coordinate_identity() {
        let c = Coordinate::new(52.52, 13.405);
        assert_eq!(c.latitude, 52.52);
        assert_eq!(c.longitude, 13.405);
    }

    #[test]
    fn test_place_composition() {
        let p = Place::new("Berlin", 52.52, 13.405);
        assert_eq!(p.name, "Berlin");
        assert_eq!(p.coordinate, Coordinate::new(52.52, 13.405));
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(BERLIN.distance_m(&BERLIN), 0.0);
    }

    #[test]
    fn test_distance_symmetric_and_finite() {
        let d1 = BERLIN.distance_m(&PARIS);
        let d2 = PARIS.distance_m(&BERLIN);
        assert!(d1.is_finite());
        assert!(d1 >= 0.0);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_distance_berlin_paris() {
        // Haversine distance Berlin–Paris is roughly 878 km.
        let d = BERLIN.distance_m(&PARIS);
        assert!(d > 850_000.0 && d < 900_000.0, "got {d}");
    }

    #[test]
    fn test_distance_antipodal_bounded() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = a.distance_m(&b);
        // Half the Earth's circumference, within a kilometer.
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1_000.0);
    }
}
