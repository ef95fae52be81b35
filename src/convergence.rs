use crate::{distance::euclidean, Centroid, Primitive};

/// Running minimum a match candidate has to beat.
pub const MATCH_SENTINEL: f64 = 10000.0;
/// Added for every centroid (on either side) that ends up without a partner.
pub const UNMATCHED_PENALTY: f64 = 1000.0;

/// Measure how far a centroid configuration moved between two iterations.
///
/// ## Description
/// Every old centroid, in sequence order, claims the nearest new centroid that has not been
/// claimed yet, provided its distance is below [`MATCH_SENTINEL`]. Earlier old centroids
/// have first claim. The result is the sum of all matched distances, plus
/// [`UNMATCHED_PENALTY`] for every new centroid nobody claimed, plus [`UNMATCHED_PENALTY`]
/// for every old centroid that found no partner.
///
/// This is a greedy scan, not a minimum-cost matching: the result depends on the order of
/// `old`, and can exceed the optimal matching cost.
///
/// ## Arguments
/// - **old**: Centroids before the update
/// - **new**: Centroids after the update (may be shorter than **old**, when clusters emptied)
pub fn centroid_change<T: Primitive>(old: &[Centroid<T>], new: &[Centroid<T>]) -> T {
	let sentinel = T::from_f64(MATCH_SENTINEL);
	let penalty = T::from_f64(UNMATCHED_PENALTY);

	let mut claimed: Vec<Option<T>> = vec![None; new.len()];
	let mut unmatched_old = 0usize;
	for o in old {
		let mut min_dist = sentinel;
		let mut matched = None;
		for (ni, n) in new.iter().enumerate() {
			let dist = euclidean(o, n);
			if dist < min_dist && claimed[ni].is_none() {
				min_dist = dist;
				matched = Some(ni);
			}
		}
		match matched {
			Some(ni) => claimed[ni] = Some(min_dist),
			None => unmatched_old += 1,
		}
	}

	let mut change = T::zero();
	for dist in claimed {
		change += dist.unwrap_or(penalty);
	}
	for _ in 0..unmatched_old {
		change += penalty;
	}
	change
}


/// Decides when a running k-means calculation has settled.
/// The calculation continues until an iteration moved the centroids by less than `threshold`
/// (as measured by [`centroid_change`]).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Convergence<T: Primitive> {
	threshold: T,
}
impl<T: Primitive> Convergence<T> {
	pub(crate) fn new(threshold: T) -> Self {
		Self { threshold }
	}

	/// Function that has to be called once an iteration produced a new centroid change.
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation converged
	pub(crate) fn next(&self, change: T) -> bool {
		!(change < self.threshold)
	}
}
