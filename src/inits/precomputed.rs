use crate::{Centroid, KMeans, Primitive};
use rand::RngCore;

/// Use caller-supplied centroids as the initial configuration.
#[inline(always)]
pub fn calculate<T: Primitive>(_kmean: &KMeans<T>, _k: usize, _rnd: &mut dyn RngCore, computed: Vec<Centroid<T>>) -> Vec<Centroid<T>> {
    computed
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn train_with_precomputed_centroids() {
        let kmean = KMeans::from_coordinates(vec![(0.0, 0.0), (1.0, 0.0), (10.0, 0.0), (11.0, 0.0), (20.0, 0.0), (21.0, 0.0)]).unwrap();
        let centroids = vec![Centroid::new(0.0, 0.0), Centroid::new(21.0, 0.0)];
        let result = kmean.kmeans_lloyd(2, KMeans::init_precomputed(centroids), &KMeansConfig::default()).unwrap();

        assert_eq!(result.centroids, vec![Centroid::new(11.0 / 3.0, 0.0), Centroid::new(52.0 / 3.0, 0.0)]);
        assert_eq!(result.assignments, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn wrong_centroid_count_is_rejected() {
        let kmean = KMeans::from_coordinates(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
        let res = kmean.kmeans_lloyd(2, KMeans::init_precomputed(vec![Centroid::new(0.0, 0.0)]), &KMeansConfig::default());
        assert_eq!(res.unwrap_err(), ClusterError::InitMismatch { k: 2, got: 1 });
    }
}
