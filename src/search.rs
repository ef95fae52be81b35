use crate::{error::ClusterError, KMeans, KMeansConfig, OptimalK, Primitive, Verbosity};

/// Default exclusive upper bound of the cluster-count search: `max(N, floor(2 * log2(N)))`.
///
/// For every N above 1 the first term dominates, so the search effectively tries every k
/// below N.
pub fn k_ceiling(points: usize) -> usize {
    if points == 0 {
        return 0;
    }
    let log_bound = (2.0 * (points as f64).log2()) as usize;
    points.max(log_bound)
}

pub(crate) fn calculate<'a, T: Primitive>(data: &KMeans<T>, config: &KMeansConfig<'a, T>) -> Result<OptimalK<T>, ClusterError> {
    if data.is_empty() {
        return Err(ClusterError::NoPoints);
    }
    let n = data.len();
    // never try more clusters than there are points
    let ceiling = config.max_k.unwrap_or_else(|| k_ceiling(n)).min(n + 1);
    let normal = config.verbosity >= Verbosity::Normal;
    if config.verbosity >= Verbosity::Debug {
        log::debug!("searching k in 1..{} over {} points", ceiling.max(2), n);
    }

    let mut best = data.kmeans_lloyd(1, KMeans::init_random_sample, config)?;
    let mut sse_history = vec![(1, best.sse)];
    if normal {
        log::info!("k:1 SSE: {}", best.sse);
    }

    for k in 2..ceiling {
        let next = data.kmeans_lloyd(k, KMeans::init_random_sample, config)?;
        sse_history.push((k, next.sse));
        if normal {
            log::info!("k:{} SSE: {}", k, next.sse);
        }

        let improvement = (next.sse - best.sse).abs();
        if improvement < config.min_improvement {
            if config.verbosity >= Verbosity::Debug {
                log::debug!("k:{} improvement {} below {}, stopping", k, improvement, config.min_improvement);
            }
            return Ok(OptimalK { k, clustering: next, sse_history, converged: true });
        }
        best = next;
    }

    if normal {
        log::info!("no k below {} met the improvement criterion, falling back to k={}", ceiling, best.k);
    }
    Ok(OptimalK { k: best.k, clustering: best, sse_history, converged: false })
}
