use log::{debug, info, warn};
use rand::Rng;

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Default cap on assignment/update passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// What the update step does with a cluster that received no examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Leave the center where it was. This does not count as movement.
    #[default]
    KeepPrevious,
    /// Abort with [`Error::EmptyCluster`].
    Fail,
}

/// Configuration options for k-means clustering.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Maximum number of assignment/update passes before giving up on convergence.
    pub max_iterations: usize,
    /// Handling of clusters left without members.
    pub empty_cluster: EmptyClusterPolicy,
}

impl KMeansConfig {
    /// Create a new config with the default iteration cap (300) and
    /// [`EmptyClusterPolicy::KeepPrevious`].
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            empty_cluster: EmptyClusterPolicy::default(),
        }
    }

    /// Customize the maximum number of passes.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Customize how empty clusters are handled.
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidInput(
                "number of clusters must be at least 1".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidInput(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of Lloyd's algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Final centers, one per cluster.
    pub centers: Vec<Vec<f64>>,
    /// Training example indices per cluster, from the last assignment step.
    pub clusters: Vec<Vec<usize>>,
    /// Passes in which at least one center moved.
    pub iterations: usize,
    /// Total assignment/update passes run.
    pub passes: usize,
    /// `false` when the pass cap was reached while centers were still moving.
    pub converged: bool,
}

/// Euclidean distance between a feature vector and a center.
///
/// # Errors
///
/// `DimensionMismatch` if the two slices differ in length.
pub fn euclidean_distance(features: &[f64], center: &[f64]) -> Result<f64> {
    if features.len() != center.len() {
        return Err(Error::DimensionMismatch {
            expected: center.len(),
            got: features.len(),
        });
    }
    Ok(features
        .iter()
        .zip(center.iter())
        .fold(0.0, |acc, (&x, &c)| acc + (x - c).powi(2))
        .sqrt())
}

/// Index of the closest center. Ties go to the lowest index.
pub fn nearest_center(features: &[f64], centers: &[Vec<f64>]) -> Result<usize> {
    let first = centers
        .first()
        .ok_or_else(|| Error::InvalidInput("no centers to compare against".to_string()))?;

    let mut best_cluster = 0;
    let mut best_dist = euclidean_distance(features, first)?;
    for (cluster_idx, center) in centers.iter().enumerate().skip(1) {
        let dist = euclidean_distance(features, center)?;
        if dist < best_dist {
            best_dist = dist;
            best_cluster = cluster_idx;
        }
    }
    Ok(best_cluster)
}

/// Picks `k` initial centers by sampling training examples uniformly with
/// replacement. Two slots may end up with the same example.
pub fn init_centers<R: Rng + ?Sized>(
    data: &Dataset,
    k: usize,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>> {
    if data.is_empty() {
        return Err(Error::EmptyTrainingData);
    }
    if k == 0 {
        return Err(Error::InvalidInput(
            "number of clusters must be at least 1".to_string(),
        ));
    }

    let centers = (0..k)
        .map(|_| data.examples()[rng.gen_range(0..data.len())].features.clone())
        .collect();
    Ok(centers)
}

/// Assignment step: groups every example index under its nearest center.
pub fn assign(data: &Dataset, centers: &[Vec<f64>]) -> Result<Vec<Vec<usize>>> {
    let mut clusters = vec![Vec::new(); centers.len()];
    for (i, example) in data.iter().enumerate() {
        let c = nearest_center(&example.features, centers)?;
        clusters[c].push(i);
    }
    Ok(clusters)
}

/// Update step: moves each center to the mean of its cluster.
///
/// A center is only replaced when the mean differs from it at `f32`
/// precision. Returns the number of centers that moved.
pub fn update_centers(
    data: &Dataset,
    clusters: &[Vec<usize>],
    centers: &mut [Vec<f64>],
    policy: EmptyClusterPolicy,
    iteration: usize,
) -> Result<usize> {
    let dim = data.n_features();
    let mut moved = 0;

    for (cluster_idx, members) in clusters.iter().enumerate() {
        if members.is_empty() {
            match policy {
                EmptyClusterPolicy::KeepPrevious => {
                    debug!("cluster {cluster_idx} is empty, keeping its center");
                    continue;
                }
                EmptyClusterPolicy::Fail => {
                    return Err(Error::EmptyCluster {
                        cluster: cluster_idx,
                        iteration,
                    });
                }
            }
        }

        let mut new_center = vec![0.0; dim];
        for &i in members {
            let example = data.get(i).ok_or_else(|| {
                Error::InvalidInput(format!("cluster member {i} is out of range"))
            })?;
            for (d, &x) in example.features.iter().enumerate() {
                new_center[d] += x;
            }
        }
        let count = members.len() as f64;
        for value in new_center.iter_mut() {
            *value /= count;
        }

        if !same_at_f32(&centers[cluster_idx], &new_center) {
            centers[cluster_idx] = new_center;
            moved += 1;
        }
    }

    Ok(moved)
}

/// Coordinate-wise equality after narrowing to `f32`.
fn same_at_f32(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| x as f32 == y as f32)
}

/// Runs Lloyd's algorithm from the given starting centers until no center
/// moves or `config.max_iterations` passes have run.
pub fn lloyd(data: &Dataset, centers: Vec<Vec<f64>>, config: &KMeansConfig) -> Result<KMeansFit> {
    config.validate()?;
    if data.is_empty() {
        return Err(Error::EmptyTrainingData);
    }
    if centers.len() != config.k {
        return Err(Error::InvalidInput(format!(
            "expected {} starting centers, got {}",
            config.k,
            centers.len()
        )));
    }
    if let Some(bad) = centers.iter().find(|c| c.len() != data.n_features()) {
        return Err(Error::DimensionMismatch {
            expected: data.n_features(),
            got: bad.len(),
        });
    }

    let mut centers = centers;
    let mut clusters = Vec::new();
    let mut iterations = 0;
    let mut passes = 0;
    let mut converged = false;

    while passes < config.max_iterations {
        passes += 1;
        clusters = assign(data, &centers)?;
        let moved = update_centers(data, &clusters, &mut centers, config.empty_cluster, passes)?;
        debug!("pass {passes}: {moved} of {} centers moved", centers.len());
        if moved == 0 {
            converged = true;
            break;
        }
        iterations += 1;
    }

    if converged {
        info!("k-means converged after {iterations} iterations ({passes} passes)");
    } else {
        warn!(
            "k-means stopped after {} passes without converging",
            config.max_iterations
        );
    }

    Ok(KMeansFit {
        centers,
        clusters,
        iterations,
        passes,
        converged,
    })
}

/// Samples `config.k` starting centers from `data` and runs Lloyd's algorithm.
///
/// # Example
///
/// ```
/// use kmeans::{kmeans, Dataset, KMeansConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let data = Dataset::from_str_with("1 2 0\n1.5 1.8 0\n5 8 1\n8 8 1\n", 2).unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let fit = kmeans(&data, &KMeansConfig::new(2), &mut rng).unwrap();
///
/// assert_eq!(fit.centers.len(), 2);
/// assert!(fit.converged);
/// ```
pub fn kmeans<R: Rng + ?Sized>(
    data: &Dataset,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansFit> {
    config.validate()?;
    let centers = init_centers(data, config.k, rng)?;
    lloyd(data, centers, config)
}
