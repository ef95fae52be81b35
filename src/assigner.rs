use crate::{distance::euclidean, helpers, Centroid, Point, Primitive};

/// Nearest-centroid assignment for a run of points.
///
/// Returns one cluster index per input point, in input order. On ties the centroid with the
/// lowest index wins. `centroids` must not be empty.
pub fn assign_nearest<T: Primitive>(points: &[Point<T>], centroids: &[Centroid<T>]) -> Vec<usize> {
    points.iter()
        .map(|p| {
            let mut min_dist = T::infinity();
            let mut nearest = 0;
            for (ci, c) in centroids.iter().enumerate() {
                let dist = euclidean(p, c);
                if dist < min_dist {
                    min_dist = dist;
                    nearest = ci;
                }
            }
            nearest
        })
        .collect()
}

/// Parallel nearest-centroid assignment over a run of points.
///
/// The points are split into `workers` contiguous partitions (see [`crate::partition_bounds`]).
/// Every partition is handled by its own task, which builds a private result and hands it
/// over exactly once. All tasks are joined before the partial results are concatenated in
/// partition order, so the returned vector follows input order just like [`assign_nearest`].
pub fn assign_parallel<T: Primitive>(points: &[Point<T>], centroids: &[Centroid<T>], workers: usize) -> Vec<usize> {
    let bounds = helpers::partition_bounds(points.len(), workers);
    let mut partials: Vec<Vec<usize>> = vec![Vec::new(); bounds.len()];

    rayon::scope(|s| {
        for (partial, range) in partials.iter_mut().zip(bounds.iter().cloned()) {
            let chunk = &points[range];
            s.spawn(move |_| {
                *partial = assign_nearest(chunk, centroids);
            });
        }
    });

    let mut assignments = Vec::with_capacity(points.len());
    for partial in partials {
        assignments.extend(partial);
    }
    assignments
}
