//! Command-line front end:
//! `kmeans <seed> <clusters> <features> <training file> <testing file>`.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::ml::classic::{Evaluation, KMeansConfig, KMeansModel};

pub const USAGE: &str = "usage: kmeans [seed] [number of clusters] [number of features] [training file name] [testing file name]";

/// Process exit code for a bad command line.
pub const USAGE_EXIT_CODE: u8 = 9;

/// Cluster a labeled training set and score nearest-center predictions on a test set.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kmeans", version)]
pub struct Args {
    /// Seed for picking the initial centers
    #[arg(allow_negative_numbers = true)]
    pub seed: i64,

    /// Number of clusters (K)
    pub clusters: usize,

    /// Number of features per example
    pub features: usize,

    /// Training data file
    pub training: PathBuf,

    /// Testing data file
    pub testing: PathBuf,
}

/// Exit code for a command line clap refused to parse. `--help` and
/// `--version` are not failures.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

/// Loads both files, clusters the training set and scores the test set.
pub fn run(args: &Args) -> Result<Evaluation> {
    let train = Dataset::from_path(&args.training, args.features)?;
    let test = Dataset::from_path(&args.testing, args.features)?;
    debug!(
        "training on {} examples, testing on {}",
        train.len(),
        test.len()
    );

    let mut rng = ChaCha20Rng::seed_from_u64(args.seed as u64);
    let config = KMeansConfig::new(args.clusters);
    let model = KMeansModel::fit(&train, &config, &mut rng)?;
    model.evaluate(&test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_args() {
        let args =
            Args::try_parse_from(["kmeans", "-4", "3", "2", "train.txt", "test.txt"]).unwrap();
        assert_eq!(
            args,
            Args {
                seed: -4,
                clusters: 3,
                features: 2,
                training: PathBuf::from("train.txt"),
                testing: PathBuf::from("test.txt"),
            }
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = Args::try_parse_from(["kmeans", "1", "2", "3", "a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(usage_exit_code(&err), USAGE_EXIT_CODE);

        let err = Args::try_parse_from(["kmeans"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), USAGE_EXIT_CODE);

        let err = Args::try_parse_from(["kmeans", "1", "2", "3", "a", "b", "c"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), USAGE_EXIT_CODE);
    }

    #[test]
    fn test_non_numeric_argument() {
        let err = Args::try_parse_from(["kmeans", "1", "many", "3", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(usage_exit_code(&err), USAGE_EXIT_CODE);

        let err = Args::try_parse_from(["kmeans", "1", "-2", "3", "a", "b"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), USAGE_EXIT_CODE);
    }

    #[test]
    fn test_help_and_version_are_not_usage_errors() {
        let err = Args::try_parse_from(["kmeans", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(usage_exit_code(&err), 0);

        let err = Args::try_parse_from(["kmeans", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(usage_exit_code(&err), 0);
    }
}
