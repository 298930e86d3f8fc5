//! Best-of-N clustering restarts.

use log::debug;
use rand::Rng;
use skyroute_core::PointSet;

use super::{ClusterConfig, ClusterError, Clustering, cluster};

/// A clustering together with its sum of squared errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredClustering {
    clustering: Clustering,
    sse: f64,
    trial: usize,
}

impl ScoredClustering {
    /// The winning clustering.
    #[must_use]
    pub const fn clustering(&self) -> &Clustering {
        &self.clustering
    }

    /// Its sum of squared errors.
    #[must_use]
    pub const fn sse(&self) -> f64 {
        self.sse
    }

    /// Zero-based trial that produced it.
    #[must_use]
    pub const fn trial(&self) -> usize {
        self.trial
    }

    /// Consume the score, returning the clustering.
    #[must_use]
    pub fn into_clustering(self) -> Clustering {
        self.clustering
    }
}

/// Run [`cluster`] `trials` times and keep the lowest-SSE result.
///
/// Trials draw from `rng` one after another, so rerunning with the same seed
/// and a larger `trials` replays the earlier trials first and can only lower
/// the returned SSE. Ties keep the earlier trial.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skyroute_core::{Point, PointSet};
/// use skyroute_solver::cluster::{ClusterConfig, best_of_restarts};
///
/// let points: PointSet = [(0.0, 0.0), (1.0, 0.0), (9.0, 9.0), (10.0, 9.0)]
///     .into_iter()
///     .map(Point::from)
///     .collect();
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let best = best_of_restarts(2, &points, 20, &ClusterConfig::default(), &mut rng)?;
/// assert!((best.sse() - 1.0).abs() < 1e-9);
/// # Ok::<(), skyroute_solver::ClusterError>(())
/// ```
pub fn best_of_restarts<R>(
    k: usize,
    points: &PointSet,
    trials: usize,
    config: &ClusterConfig,
    rng: &mut R,
) -> Result<ScoredClustering, ClusterError>
where
    R: Rng + ?Sized,
{
    let mut best: Option<ScoredClustering> = None;
    for trial in 0..trials {
        let clustering = cluster(k, points, config, rng)?;
        let sse = clustering.sse(points);
        if best.as_ref().is_none_or(|current| sse < current.sse) {
            debug!("k = {k}: trial {trial} improved SSE to {sse:.3}");
            best = Some(ScoredClustering {
                clustering,
                sse,
                trial,
            });
        }
    }
    best.ok_or(ClusterError::NoTrials)
}
