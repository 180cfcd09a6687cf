use std::hash::{Hash, Hasher};
use num_traits::Float;
use serde::{Deserialize, Serialize};


/// Scale factor turning one degree of latitude or longitude into distance units.
/// Edge distances are expected in the same unit.
pub const DISTANCE_PER_DEGREE: f64 = 364_000.0;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where 
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// Flat-earth distance between two coordinates
/// The latitude delta is scaled by the cosine of the mean latitude, the longitude delta is not.
/// Only meaningful at campus scale, this is not a great-circle distance.
pub fn campus_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let mean_latitude = ((a.latitude + b.latitude) / 2.0).to_radians();
    let delta_x = (a.latitude - b.latitude).abs() * DISTANCE_PER_DEGREE * mean_latitude.cos();
    let delta_y = (a.longitude - b.longitude).abs() * DISTANCE_PER_DEGREE;

    euclidean(0.0, 0.0, delta_x, delta_y)
}


/// Geographic coordinate in degrees
/// Equality and hashing use the coordinate pair only. `-0.0` and `0.0` are the same coordinate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Planar projection matching `campus_distance` when both points sit near `reference_latitude`
    pub fn project(&self, reference_latitude: f64) -> [f64; 2] {
        [
            self.latitude * DISTANCE_PER_DEGREE * reference_latitude.to_radians().cos(),
            self.longitude * DISTANCE_PER_DEGREE,
        ]
    }

    fn identity(&self) -> (u64, u64) {
        (canonical_bits(self.latitude), canonical_bits(self.longitude))
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::FxHashSet;

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(euclidean(1.0f32, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_campus_distance_longitude_only() {
        // No cosine correction on the longitude delta
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        assert!((campus_distance(&a, &b) - DISTANCE_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn test_campus_distance_latitude_uses_mean_latitude_cosine() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = DISTANCE_PER_DEGREE * 0.5f64.to_radians().cos();
        assert!((campus_distance(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_campus_distance_symmetric_and_zero() {
        let fondren = Coordinate::new(29.7184889244895, -95.40003002999113);
        let baker = Coordinate::new(29.71733243453455, -95.39902187616832);
        assert_eq!(campus_distance(&fondren, &baker), campus_distance(&baker, &fondren));
        assert_eq!(campus_distance(&fondren, &fondren), 0.0);
    }

    #[test]
    fn test_coordinate_identity() {
        assert_eq!(Coordinate::new(0.0, 1.5), Coordinate::new(-0.0, 1.5));
        assert_ne!(Coordinate::new(1.0, 2.0), Coordinate::new(2.0, 1.0));

        let mut set = FxHashSet::default();
        set.insert(Coordinate::new(-0.0, 0.0));
        assert!(set.contains(&Coordinate::new(0.0, -0.0)));
    }

    #[test]
    fn test_projection_matches_campus_distance() {
        let a = Coordinate::new(29.716736984405465, -95.39799155165602);
        let b = Coordinate::new(29.716466139816475, -95.39871387154595);
        let reference = (a.latitude + b.latitude) / 2.0;
        let [ax, ay] = a.project(reference);
        let [bx, by] = b.project(reference);
        assert!((euclidean(ax, ay, bx, by) - campus_distance(&a, &b)).abs() < 1e-6);
    }
}
