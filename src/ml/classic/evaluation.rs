use log::info;
use rand::Rng;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::ml::classic::cluster_labels::label_clusters;
use crate::ml::classic::k_means::{kmeans, nearest_center, KMeansConfig, KMeansFit};

/// Nearest-center classifier built from converged k-means centers and their
/// majority labels.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansModel {
    centers: Vec<Vec<f64>>,
    labels: Vec<i32>,
}

/// Tally of a classifier run over a test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of correct predictions, `0.0` for an empty test set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl KMeansModel {
    /// Constructs a model from centers and one label per center.
    pub fn new(centers: Vec<Vec<f64>>, labels: Vec<i32>) -> Result<Self> {
        if centers.is_empty() {
            return Err(Error::InvalidInput("model needs at least one center".to_string()));
        }
        if centers.len() != labels.len() {
            return Err(Error::InvalidInput(format!(
                "{} centers but {} labels",
                centers.len(),
                labels.len()
            )));
        }
        Ok(Self { centers, labels })
    }

    /// Labels the clusters of a finished fit against the data it was trained on.
    pub fn from_fit(fit: &KMeansFit, train: &Dataset) -> Result<Self> {
        let labels = label_clusters(train, &fit.clusters)?;
        Self::new(fit.centers.clone(), labels)
    }

    /// Clusters `train` and labels the resulting clusters.
    pub fn fit<R: Rng + ?Sized>(
        train: &Dataset,
        config: &KMeansConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let fit = kmeans(train, config, rng)?;
        Self::from_fit(&fit, train)
    }

    pub fn centers(&self) -> &[Vec<f64>] {
        &self.centers
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Label of the center closest to `features`.
    pub fn predict(&self, features: &[f64]) -> Result<i32> {
        let cluster = nearest_center(features, &self.centers)?;
        Ok(self.labels[cluster])
    }

    /// Predict labels for multiple points at once.
    pub fn predict_batch(&self, points: &[Vec<f64>]) -> Result<Vec<i32>> {
        points.iter().map(|p| self.predict(p)).collect()
    }

    /// Classifies every example in `test` and counts matches with the true label.
    pub fn evaluate(&self, test: &Dataset) -> Result<Evaluation> {
        let mut evaluation = Evaluation {
            correct: 0,
            total: test.len(),
        };
        for example in test {
            if self.predict(&example.features)? == example.label {
                evaluation.correct += 1;
            }
        }
        info!(
            "classified {} of {} test examples correctly",
            evaluation.correct, evaluation.total
        );
        Ok(evaluation)
    }
}

/// Number of test examples whose nearest center carries their label.
pub fn count_correct(model: &KMeansModel, test: &Dataset) -> Result<usize> {
    Ok(model.evaluate(test)?.correct)
}
