use crate::{assigner, error::ClusterError, Centroid, Point, Primitive};
use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&[Centroid<T>]);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &[Centroid<T>], T);

/// Amount of diagnostic output a calculation emits through the [`log`] facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Nothing is logged.
    Quiet,
    /// One line per converged run / evaluated cluster count.
    Normal,
    /// Additionally dumps initial centroids, assignments, new centroids and the centroid
    /// change of every iteration.
    Debug,
}
impl Default for Verbosity {
    fn default() -> Self { Verbosity::Normal }
}

/// This is a structure holding various configuration options for k-means calculations, such as
/// the degree of parallelism, the convergence threshold, the random number generator to use, or a
/// couple of callbacks, that can be set to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **centroids**: The initial centroids
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **iteration_id**: Number of the current iteration
    /// - **centroids**: Newly estimated centroids
    /// - **change**: Centroid change between the previous and the new centroids
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use. When [`None`], every calculation seeds its own
    /// generator from the wall-clock time.
    pub(crate) rnd: Option<Box<RefCell<dyn RngCore>>>,
    /// Amount of concurrent assignment tasks (partitions)
    pub(crate) workers: usize,
    /// A calculation converged once the centroid change drops below this value
    pub(crate) threshold: T,
    /// The cluster-count search stops at the first k whose SSE differs from the previous
    /// k's SSE by less than this value
    pub(crate) min_improvement: T,
    /// Exclusive upper bound for the cluster-count search
    pub(crate) max_k: Option<usize>,
    pub(crate) verbosity: Verbosity,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: None,
            workers: 4,
            threshold: T::from_f64(0.01),
            min_improvement: T::from_f64(1.0),
            max_k: None,
            verbosity: Verbosity::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub fn workers(&self) -> usize { self.workers }
    pub fn verbosity(&self) -> Verbosity { self.verbosity }

    /// Run `f` with the configured random number generator, or with a freshly seeded one.
    pub(crate) fn with_rng<R>(&self, f: impl FnOnce(&mut dyn RngCore) -> R) -> R {
        match self.rnd.as_ref() {
            Some(shared) => f(&mut *shared.borrow_mut()),
            None => f(&mut StdRng::seed_from_u64(clock_seed())),
        }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("workers", &self.workers)
            .field("threshold", &self.threshold)
            .field("min_improvement", &self.min_improvement)
            .field("max_k", &self.max_k)
            .field("verbosity", &self.verbosity)
            .field("seeded", &self.rnd.is_some())
            .finish()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    /// ## Default
    /// A [`StdRng`] seeded from the wall-clock time at the start of every calculation.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Some(Box::new(RefCell::new(rnd))); self
    }
    /// Set the amount of concurrent tasks used for the cluster assignment.
    /// ## Default
    /// `4`
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers.max(1); self
    }
    /// Set the centroid change below which a calculation counts as converged.
    /// ## Default
    /// `0.01`
    pub fn threshold(mut self, threshold: T) -> Self {
        self.config.threshold = threshold; self
    }
    /// Set the SSE improvement below which the cluster-count search stops.
    /// ## Default
    /// `1.0`
    pub fn min_improvement(mut self, min_improvement: T) -> Self {
        self.config.min_improvement = min_improvement; self
    }
    /// Cap the cluster-count search (exclusive upper bound for k).
    /// ## Default
    /// `max(N, 2 * log2(N))`, see [`crate::k_ceiling`]
    pub fn max_k(mut self, max_k: usize) -> Self {
        self.config.max_k = Some(max_k); self
    }
    /// Set the amount of diagnostic output.
    /// ## Default
    /// [`Verbosity::Normal`]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.config.verbosity = verbosity; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Result of one complete k-means calculation for a fixed cluster count.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **assignments**: Cluster index of every point, indexed by point id
/// - **centroids**: Final centroids. Can hold fewer than **k** entries, when clusters ran empty
/// - **sse**: Sum of squared distances from all points to their assigned centroid
/// - **iterations**: Amount of assignment/estimation rounds until convergence
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering<T: Primitive> {
    pub k: usize,
    pub assignments: Vec<usize>,
    pub centroids: Vec<Centroid<T>>,
    pub sse: T,
    pub iterations: usize,
}

/// Outcome of the cluster-count search.
///
/// ## Fields
/// - **k**: The chosen cluster count
/// - **clustering**: The calculation that was run for **k** during the search
/// - **sse_history**: `(k, sse)` of every evaluated cluster count, in evaluation order
/// - **converged**: **false** when no cluster count met the stopping criterion, and the last
///   examined one was reported as fallback
#[derive(Clone, Debug)]
pub struct OptimalK<T: Primitive> {
    pub k: usize,
    pub clustering: Clustering<T>,
    pub sse_history: Vec<(usize, T)>,
    pub converged: bool,
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the points you want to operate on. The primitive type
/// of the coordinates will be the type used internally for all calculations, as well as the result
/// as stored in the returned [`Clustering`] structure.
///
/// The instance is never mutated by a calculation, so multiple runs can share it.
///
/// ## Supported calculations
/// - k-Means clustering with a fixed k [`KMeans::kmeans_lloyd`]
/// - Cluster-count search [`KMeans::search_optimal_k`]
///
/// ## Supported initialization methods
/// - Random-Sample [`KMeans::init_random_sample`]
/// - Precomputed [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) points: Vec<Point<T>>,
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **points**: Points to cluster. Point ids have to match their position (`0..N`) and all
    ///   coordinates have to be finite.
    pub fn new(points: Vec<Point<T>>) -> Result<Self, ClusterError> {
        for (position, p) in points.iter().enumerate() {
            if p.id != position {
                return Err(ClusterError::NonSequentialId { position, id: p.id });
            }
            if !p.lat.is_finite() || !p.lon.is_finite() {
                return Err(ClusterError::NonFiniteCoordinate { id: p.id });
            }
        }
        Ok(Self { points })
    }

    /// Create a new instance from `(lat, lon)` pairs. Ids are assigned in iteration order.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = (T, T)>) -> Result<Self, ClusterError> {
        Self::new(coordinates.into_iter()
            .enumerate()
            .map(|(id, (lat, lon))| Point::new(id, lat, lon))
            .collect())
    }

    pub fn points(&self) -> &[Point<T>] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub(crate) fn update_cluster_assignments(&self, centroids: &[Centroid<T>], workers: usize) -> Vec<usize> {
        assigner::assign_parallel(&self.points, centroids, workers)
    }


    /// Iterative k-means: parallel nearest-centroid assignment, centroid re-estimation and a
    /// centroid-change check, repeated until the change drops below the configured threshold.
    /// A final assignment pass against the converged centroids produces the returned
    /// assignments and SSE.
    ///
    /// There is no iteration limit: a calculation always runs until it converged.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`Clustering`], or a [`ClusterError`] when `k` is 0, exceeds the amount of
    /// points, or the initialization did not produce exactly `k` centroids.
    ///
    /// ## Example
    /// ```rust
    /// use geokmeans::*;
    ///
    /// let kmean = KMeans::from_coordinates(vec![(0.0f64, 0.0), (0.0, 0.0), (10.0, 10.0), (10.0, 10.0)]).unwrap();
    /// let result = kmean.kmeans_lloyd(2, KMeans::init_random_sample, &KMeansConfig::default()).unwrap();
    ///
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// println!("SSE: {}", result.sse);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<Clustering<T>, ClusterError>
            where F: FnOnce(&KMeans<T>, usize, &mut dyn RngCore) -> Vec<Centroid<T>> {
        crate::variants::Lloyd::calculate(self, k, init, config)
    }

    /// Elbow search for the cluster count.
    ///
    /// ## Description
    /// Runs [`KMeans::kmeans_lloyd`] (random-sample initialization) for k = 1, 2, 3, ... and stops
    /// at the first k whose SSE differs from the previous k's SSE by less than the configured
    /// minimum improvement (`1.0` by default). When no k below the ceiling meets this criterion,
    /// the last examined k is reported.
    pub fn search_optimal_k<'a>(&self, config: &KMeansConfig<'a, T>) -> Result<OptimalK<T>, ClusterError> {
        crate::search::calculate(self, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k distinct points as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample(kmean: &KMeans<T>, k: usize, rnd: &mut dyn RngCore) -> Vec<Centroid<T>> {
        crate::inits::randomsample::calculate(kmean, k, rnd)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Starts the calculation from the given centroids. Their amount has to match k.
    pub fn init_precomputed(centroids: Vec<Centroid<T>>) -> impl FnOnce(&KMeans<T>, usize, &mut dyn RngCore) -> Vec<Centroid<T>> {
        move |kmean, k, rnd| crate::inits::precomputed::calculate(kmean, k, rnd, centroids)
    }
}
