use crate::{
    convergence::{centroid_change, Convergence},
    distance::squared_euclidean,
    error::ClusterError,
    Centroid, Clustering, KMeans, KMeansConfig, Point, Primitive, Verbosity,
};
use rand::RngCore;
use std::collections::BTreeMap;

/// Estimate new centroids from a complete assignment.
///
/// Every cluster index that occurs in **assignments** yields the mean position of its points.
/// Centroids are emitted in ascending cluster-index order. A cluster without points produces no
/// centroid at all, so the result can be shorter than the previous centroid sequence.
///
/// ## Arguments
/// - **points**: The points to average
/// - **assignments**: Cluster index of every point, in the same order as **points**
pub fn update_centroids<T: Primitive>(points: &[Point<T>], assignments: &[usize]) -> Vec<Centroid<T>> {
    // cluster index -> (lat sum, lon sum, member count)
    let mut sums: BTreeMap<usize, (T, T, usize)> = BTreeMap::new();
    for (p, &cluster) in points.iter().zip(assignments) {
        let entry = sums.entry(cluster).or_insert((T::zero(), T::zero(), 0));
        entry.0 += p.lat;
        entry.1 += p.lon;
        entry.2 += 1;
    }
    sums.into_iter()
        .map(|(_, (lat, lon, cnt))| {
            let cnt = T::from_usize(cnt);
            Centroid::new(lat / cnt, lon / cnt)
        })
        .collect()
}

/// Total squared distance from every point to its assigned centroid.
///
/// **assignments** is positional (one entry per point, in the same order), and has to
/// reference valid indices into **centroids**.
pub fn sum_squared_error<T: Primitive>(points: &[Point<T>], assignments: &[usize], centroids: &[Centroid<T>]) -> T {
    points.iter().zip(assignments)
        .map(|(p, &cluster)| squared_euclidean(p, &centroids[cluster]))
        .sum()
}


pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    pub(crate) fn calculate<'a, F>(data: &KMeans<T>, k: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<Clustering<T>, ClusterError>
                where F: FnOnce(&KMeans<T>, usize, &mut dyn RngCore) -> Vec<Centroid<T>> {
        if k == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        if k > data.len() {
            return Err(ClusterError::NotEnoughPoints { k, points: data.len() });
        }
        let debug = config.verbosity >= Verbosity::Debug;

        // Initialize clusters and notify subscriber
        let mut centroids = config.with_rng(|rnd| init(data, k, rnd));
        if centroids.len() != k {
            return Err(ClusterError::InitMismatch { k, got: centroids.len() });
        }
        (config.init_done)(&centroids);
        if debug {
            log::debug!("k={} initial centroids: {:?}", k, centroids);
        }

        let convergence = Convergence::new(config.threshold);
        let mut iterations = 0;
        loop {
            iterations += 1;
            let assignments = data.update_cluster_assignments(&centroids, config.workers);
            let new_centroids = update_centroids(&data.points, &assignments);
            let change = centroid_change(&centroids, &new_centroids);
            if debug {
                log::debug!("k={} iteration {} assignments: {:?}", k, iterations, assignments);
                log::debug!("k={} iteration {} new centroids: {:?}", k, iterations, new_centroids);
                log::debug!("k={} iteration {} centroid change: {}", k, iterations, change);
            }

            // Notify subscriber about finished iteration
            (config.iteration_done)(iterations, &new_centroids, change);
            centroids = new_centroids;
            if !convergence.next(change) {
                break;
            }
        }

        // Loop assignments refer to the previous centroids; reassign against the adopted ones
        let assignments = data.update_cluster_assignments(&centroids, config.workers);
        let sse = sum_squared_error(&data.points, &assignments, &centroids);
        if debug {
            log::debug!("k={} final assignments: {:?}", k, assignments);
        }
        if config.verbosity >= Verbosity::Normal {
            log::info!("k={} converged after {} iterations with {} centroids, SSE {}", k, iterations, centroids.len(), sse);
        }

        Ok(Clustering { k, assignments, centroids, sse, iterations })
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::assert_same_centroids;
    use rand::prelude::*;
    use std::cell::Cell;

    fn seeded<'a>() -> KMeansConfig<'a, f64> {
        KMeansConfig::build().random_generator(StdRng::seed_from_u64(1337)).build()
    }

    #[test]
    fn single_cluster_is_the_mean() {
        let coords = vec![(1.0f64, 2.0), (3.0, 8.0), (-4.0, 5.0), (6.0, -3.0), (0.5, 0.5), (2.5, 1.5)];
        let kmean = KMeans::from_coordinates(coords.clone()).unwrap();
        let res = kmean.kmeans_lloyd(1, KMeans::init_random_sample, &seeded()).unwrap();

        let n = coords.len() as f64;
        let (mlat, mlon) = (coords.iter().map(|c| c.0).sum::<f64>() / n, coords.iter().map(|c| c.1).sum::<f64>() / n);
        assert_eq!(res.centroids.len(), 1);
        assert_approx_eq!(res.centroids[0].lat, mlat);
        assert_approx_eq!(res.centroids[0].lon, mlon);
        assert_eq!(res.assignments, vec![0; coords.len()]);

        let should_sse: f64 = coords.iter().map(|&(lat, lon)| (lat - mlat).powi(2) + (lon - mlon).powi(2)).sum();
        assert_approx_eq!(res.sse, should_sse);
    }

    #[test]
    fn two_identical_pairs() {
        let kmean = KMeans::from_coordinates(vec![(0.0f64, 0.0), (0.0, 0.0), (10.0, 10.0), (10.0, 10.0)]).unwrap();
        let mut separated = 0;
        for seed in 0..20 {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let res = kmean.kmeans_lloyd(2, KMeans::init_random_sample, &conf).unwrap();
            assert_eq!(res.assignments[0], res.assignments[1]);
            assert_eq!(res.assignments[2], res.assignments[3]);
            if res.centroids.len() == 2 {
                separated += 1;
                assert_same_centroids(&[Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)], &res.centroids, 1e-9);
                assert_ne!(res.assignments[0], res.assignments[2]);
                assert_approx_eq!(res.sse, 0.0);
            } else {
                // both initial draws landed on the same coordinates
                assert_eq!(res.centroids, vec![Centroid::new(5.0, 5.0)]);
                assert_approx_eq!(res.sse, 200.0);
            }
        }
        assert!(separated > 0);
    }

    #[test]
    fn colliding_initial_centroids_empty_a_cluster() {
        // Both initial centroids sit on (0,0): everybody joins cluster 0, cluster 1 vanishes.
        let kmean = KMeans::from_coordinates(vec![(0.0f64, 0.0), (0.0, 0.0), (10.0, 10.0), (10.0, 10.0)]).unwrap();
        let init = KMeans::init_precomputed(vec![Centroid::new(0.0, 0.0), Centroid::new(0.0, 0.0)]);
        let res = kmean.kmeans_lloyd(2, init, &seeded()).unwrap();

        assert_eq!(res.k, 2);
        assert_eq!(res.centroids, vec![Centroid::new(5.0, 5.0)]);
        assert_eq!(res.assignments, vec![0, 0, 0, 0]);
        assert_approx_eq!(res.sse, 200.0);
        assert_eq!(res.iterations, 2);
    }

    #[test]
    fn one_cluster_per_point() {
        let coords: Vec<(f64, f64)> = (0..12).map(|i| ((i * 7 % 12) as f64, (i * i) as f64)).collect();
        let kmean = KMeans::from_coordinates(coords).unwrap();
        let res = kmean.kmeans_lloyd(12, KMeans::init_random_sample, &seeded()).unwrap();
        assert_eq!(res.centroids.len(), 12);
        assert!(res.sse < 0.01);
        let mut seen = res.assignments.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn invariants_hold_on_random_input() {
        let mut rnd = StdRng::seed_from_u64(42);
        let coords: Vec<(f64, f64)> = (0..500).map(|_| (rnd.gen_range(40.0, 50.0), rnd.gen_range(-5.0, 5.0))).collect();
        let kmean = KMeans::from_coordinates(coords).unwrap();
        for k in 1..8 {
            let res = kmean.kmeans_lloyd(k, KMeans::init_random_sample, &seeded()).unwrap();
            assert!(res.centroids.len() <= k);
            assert_eq!(res.assignments.len(), 500);
            assert!(res.assignments.iter().all(|&c| c < res.centroids.len()));
            assert!(res.sse >= 0.0);
            assert_approx_eq!(res.sse, sum_squared_error(kmean.points(), &res.assignments, &res.centroids));
        }
    }

    #[test]
    fn precondition_violations() {
        let kmean = KMeans::from_coordinates(vec![(0.0f64, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(kmean.kmeans_lloyd(0, KMeans::init_random_sample, &seeded()).unwrap_err(), ClusterError::ZeroClusters);
        assert_eq!(kmean.kmeans_lloyd(3, KMeans::init_random_sample, &seeded()).unwrap_err(),
            ClusterError::NotEnoughPoints { k: 3, points: 2 });
    }

    #[test]
    fn callbacks_are_invoked() {
        let inits = Cell::new(0usize);
        let last_iteration = Cell::new(0usize);
        let on_init = |c: &[Centroid<f64>]| { assert_eq!(c.len(), 2); inits.set(inits.get() + 1); };
        let on_iteration = |nr: usize, _: &[Centroid<f64>], _: f64| last_iteration.set(nr);
        let conf = KMeansConfig::build()
            .init_done(&on_init)
            .iteration_done(&on_iteration)
            .random_generator(StdRng::seed_from_u64(5))
            .build();

        let kmean = KMeans::from_coordinates(vec![(0.0f64, 0.0), (0.0, 1.0), (9.0, 9.0), (9.0, 10.0)]).unwrap();
        let res = kmean.kmeans_lloyd(2, KMeans::init_random_sample, &conf).unwrap();
        assert_eq!(inits.get(), 1);
        assert_eq!(last_iteration.get(), res.iterations);
    }

    #[test]
    fn centroid_estimation() {
        let points: Vec<Point<f64>> = vec![(0.0, 0.0), (2.0, 2.0), (10.0, 0.0), (5.0, 5.0)]
            .into_iter().enumerate().map(|(id, (lat, lon))| Point::new(id, lat, lon)).collect();
        let assignments = vec![2, 2, 0, 2];
        let should = vec![Centroid::new(10.0, 0.0), Centroid::new(7.0 / 3.0, 7.0 / 3.0)];
        assert_eq!(update_centroids(&points, &assignments), should);
        // stable under repetition
        assert_eq!(update_centroids(&points, &assignments), should);
    }

    #[test]
    fn sse_of_known_configuration() {
        let points: Vec<Point<f32>> = vec![(0.0, 0.0), (0.0, 2.0), (3.0, 4.0)]
            .into_iter().enumerate().map(|(id, (lat, lon))| Point::new(id, lat, lon)).collect();
        let centroids = vec![Centroid::new(0.0f32, 1.0), Centroid::new(0.0, 0.0)];
        assert_approx_eq!(sum_squared_error(&points, &[0, 0, 1], &centroids), 27.0f32, 1e-5f32);
    }

    #[test]
    fn sse_of_a_partial_run() {
        let points: Vec<Point<f64>> = vec![(0.0, 0.0), (0.0, 2.0), (3.0, 4.0), (6.0, 8.0)]
            .into_iter().enumerate().map(|(id, (lat, lon))| Point::new(id, lat, lon)).collect();
        let centroids = vec![Centroid::new(0.0, 0.0), Centroid::new(6.0, 8.0)];
        assert_approx_eq!(sum_squared_error(&points[2..], &[0, 1], &centroids), 25.0);
        assert_eq!(update_centroids(&points[2..], &[1, 1]), vec![Centroid::new(4.5, 6.0)]);
    }
}
