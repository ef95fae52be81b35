use crate::point::Location;
use num::Float;

/// Squared euclidean distance on (lat, lon).
#[inline(always)]
pub fn squared_euclidean<A, B>(a: &A, b: &B) -> A::Coord
        where A: Location, B: Location<Coord = A::Coord> {
    let dlat = a.lat() - b.lat();
    let dlon = a.lon() - b.lon();
    dlat * dlat + dlon * dlon
}

/// Euclidean distance on (lat, lon). Coordinates are treated as plain planar values.
#[inline(always)]
pub fn euclidean<A, B>(a: &A, b: &B) -> A::Coord
        where A: Location, B: Location<Coord = A::Coord> {
    squared_euclidean(a, b).sqrt()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Centroid, Point};

    #[test]
    fn three_four_five() {
        let p = Point::new(0, 0.0f64, 0.0);
        let c = Centroid::new(3.0f64, 4.0);
        assert_eq!(squared_euclidean(&p, &c), 25.0);
        assert_eq!(euclidean(&p, &c), 5.0);
        assert_eq!(euclidean(&c, &p), 5.0);
    }

    #[test]
    fn identical_positions() {
        let p = Point::new(3, 52.52f32, 13.405);
        assert_eq!(euclidean(&p, &p.position()), 0.0);
    }

    #[test]
    fn generic_location_distance() {
        fn distance_of<L: Location>(a: &L, b: &L) -> L::Coord {
            euclidean(a, b)
        }
        let a = Centroid::new(1.0f32, 1.0);
        let b = Centroid::new(4.0f32, 5.0);
        assert_eq!(distance_of(&a, &b), 5.0);
    }
}
