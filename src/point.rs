use crate::Primitive;

/// Anything with a geographic position that distances can be measured between.
pub trait Location {
    type Coord: Primitive;
    fn lat(&self) -> Self::Coord;
    fn lon(&self) -> Self::Coord;
}

/// A single input location.
///
/// ## Fields
/// - **id**: Position of the point within the input (0-based). The engine uses it as
///   index into the assignment vector, so ids are always `0..N` in input order.
/// - **lat**: Latitude
/// - **lon**: Longitude
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Primitive> {
    pub id: usize,
    pub lat: T,
    pub lon: T,
}
impl<T: Primitive> Point<T> {
    pub fn new(id: usize, lat: T, lon: T) -> Self {
        Self { id, lat, lon }
    }

    /// Centroid placed exactly on this point (used when drawing initial centroids).
    pub fn position(&self) -> Centroid<T> {
        Centroid::new(self.lat, self.lon)
    }
}
impl<T: Primitive> Location for Point<T> {
    type Coord = T;
    #[inline(always)] fn lat(&self) -> T { self.lat }
    #[inline(always)] fn lon(&self) -> T { self.lon }
}

/// Cluster center. Structurally a [`Point`] without identity: centroids are regenerated
/// every iteration, and their position within a centroid sequence is the cluster index
/// for that iteration only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid<T: Primitive> {
    pub lat: T,
    pub lon: T,
}
impl<T: Primitive> Centroid<T> {
    pub fn new(lat: T, lon: T) -> Self {
        Self { lat, lon }
    }
}
impl<T: Primitive> Location for Centroid<T> {
    type Coord = T;
    #[inline(always)] fn lat(&self) -> T { self.lat }
    #[inline(always)] fn lon(&self) -> T { self.lon }
}
