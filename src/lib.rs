pub mod cli;
pub mod dataset;
pub mod error;
pub mod ml;

pub use dataset::{format_vector, Dataset, Example};
pub use error::{Error, Result};
pub use ml::classic::{
    count_correct, kmeans, EmptyClusterPolicy, Evaluation, KMeansConfig, KMeansFit, KMeansModel,
};
