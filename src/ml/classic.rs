pub mod cluster_labels;
pub mod evaluation;
pub mod k_means;

// Re-export public types and functions
pub use cluster_labels::{label_clusters, majority_label, DEFAULT_LABEL};
pub use evaluation::{count_correct, Evaluation, KMeansModel};
pub use k_means::{
    assign, euclidean_distance, init_centers, kmeans, lloyd, nearest_center, update_centers,
    EmptyClusterPolicy, KMeansConfig, KMeansFit, DEFAULT_MAX_ITERATIONS,
};
