use crate::{Centroid, KMeans, Primitive};
use rand::prelude::*;

/// Draw `k` distinct points uniformly at random (without replacement) and place one initial
/// centroid on each of them.
#[inline(always)] pub fn calculate<T: Primitive>(kmean: &KMeans<T>, k: usize, rnd: &mut dyn RngCore) -> Vec<Centroid<T>> {
	kmean.points()
		.choose_multiple(rnd, k)
		.map(|p| p.position())
		.collect()
}
