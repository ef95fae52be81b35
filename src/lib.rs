//! # geokmeans - API documentation
//!
//! Geokmeans clusters 2-D geographic points (latitude / longitude) with iterative k-means,
//! and picks the amount of clusters automatically with an elbow heuristic on the
//! sum-of-squared-error (SSE) curve.
//!
//! ## Design target
//! The API-surface is deliberately plain: points are simple value types, results are plain
//! vectors. Nearest-centroid assignment, the only expensive step, runs on a fixed amount of
//! concurrent tasks over disjoint partitions of the input.
//!
//! ## Convergence
//! A calculation does not stop after a fixed amount of iterations. After every iteration, the
//! old and new centroids are paired up greedily (see [`centroid_change`]), and the calculation
//! stops once the summed pairing distance falls below a threshold (`0.01` by default).
//! Clusters that run empty simply disappear, so a result can hold fewer than k centroids.
//!
//! ## Choosing k
//! [`KMeans::search_optimal_k`] runs the calculation for k = 1, 2, 3, ... and stops at the first
//! k whose SSE differs from its predecessor's by less than `1.0`.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use geokmeans::*;
//! use rand::prelude::*;
//!
//! let coordinates = vec![(52.52f64, 13.40), (52.51, 13.41), (48.85, 2.35), (48.86, 2.34)];
//! let kmean = KMeans::from_coordinates(coordinates).unwrap();
//!
//! // Seeded generator for reproducible results
//! let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
//! let result = kmean.kmeans_lloyd(2, KMeans::init_random_sample, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("SSE: {}", result.sse);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use geokmeans::*;
//!
//! let coordinates: Vec<(f64, f64)> = (0..200).map(|i| ((i % 4) as f64 * 10.0, (i % 7) as f64 * 0.1)).collect();
//! let kmean = KMeans::from_coordinates(coordinates).unwrap();
//!
//! let conf = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|nr, centroids, change|
//!         println!("Iteration {} - {} centroids, change: {:.4}", nr, centroids.len(), change))
//!     .build();
//!
//! let best = kmean.search_optimal_k(&conf).unwrap();
//! println!("Optimal no of clusters (k): {}", best.k);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It takes over the points, and validates
//! that their ids follow input order. Its instance-methods run calculations without mutating
//! it; each calculation returns a fresh [`Clustering`]. Options such as the degree of
//! parallelism, the random number generator or the verbosity are passed in a [`KMeansConfig`].
//!
//! The individual steps are exported as well: [`assign_nearest`] / [`assign_parallel`],
//! [`update_centroids`], [`centroid_change`] and [`sum_squared_error`].
//!
//! Reading and writing the delimited point / result files lives in [`io`].

#[macro_use] mod helpers;
mod primitive;
mod point;
mod distance;
mod assigner;
mod convergence;
mod api;
mod variants;
mod inits;
mod search;
pub mod error;
pub mod io;

pub use api::{Clustering, KMeans, KMeansConfig, KMeansConfigBuilder, OptimalK, Verbosity};
pub use assigner::{assign_nearest, assign_parallel};
pub use convergence::{centroid_change, MATCH_SENTINEL, UNMATCHED_PENALTY};
pub use distance::{euclidean, squared_euclidean};
pub use error::{ClusterError, InputError, OutputError};
pub use helpers::partition_bounds;
pub use point::{Centroid, Location, Point};
pub use primitive::Primitive;
pub use search::k_ceiling;
pub use variants::{sum_squared_error, update_centroids};
