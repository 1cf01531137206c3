//! Majority-vote labels for clusters.
//!
//! Labels are tallied in ascending order and the running winner starts out as
//! label `0`, so `0` wins every tie it takes part in and is what an empty
//! cluster gets. Among other tied labels the smallest one wins.

use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Label given to a cluster with no members.
pub const DEFAULT_LABEL: i32 = 0;

/// Most frequent label in `labels`. See the module docs for tie-breaking.
pub fn majority_label<I>(labels: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut best = DEFAULT_LABEL;
    let mut best_count = counts.get(&DEFAULT_LABEL).copied().unwrap_or(0);
    for (&label, &count) in &counts {
        if count > best_count {
            best = label;
            best_count = count;
        }
    }
    best
}

/// Assigns each cluster the majority label of its member examples.
///
/// `clusters` holds indices into `data`; the result is indexed by cluster.
pub fn label_clusters(data: &Dataset, clusters: &[Vec<usize>]) -> Result<Vec<i32>> {
    clusters
        .iter()
        .map(|members| {
            let labels = members
                .iter()
                .map(|&i| {
                    data.get(i).map(|e| e.label).ok_or_else(|| {
                        Error::InvalidInput(format!("cluster member {i} is out of range"))
                    })
                })
                .collect::<Result<Vec<i32>>>()?;
            Ok(majority_label(labels))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Example;

    #[test]
    fn test_clear_majority() {
        assert_eq!(majority_label([3, 1, 3, 2, 3]), 3);
        assert_eq!(majority_label([7]), 7);
        assert_eq!(majority_label([-2, -2, 5]), -2);
    }

    #[test]
    fn test_tie_goes_to_smallest_label() {
        assert_eq!(majority_label([5, 2, 5, 2]), 2);
        assert_eq!(majority_label([9, 4, 6]), 4);
        assert_eq!(majority_label([-1, 3, 3, -1]), -1);
    }

    #[test]
    fn test_label_zero_wins_ties_it_is_part_of() {
        assert_eq!(majority_label([1, 0, 1, 0]), 0);
        assert_eq!(majority_label([-3, 0]), 0);
        assert_eq!(majority_label([0, 2, 2]), 2);
    }

    #[test]
    fn test_empty_cluster_gets_default_label() {
        assert_eq!(majority_label(std::iter::empty()), DEFAULT_LABEL);
    }

    #[test]
    fn test_label_clusters() {
        let data = Dataset::new(
            vec![
                Example::new(vec![0.0], 4),
                Example::new(vec![0.1], 4),
                Example::new(vec![0.2], 1),
                Example::new(vec![9.0], 2),
            ],
            1,
        )
        .unwrap();
        let labels = label_clusters(&data, &[vec![0, 1, 2], vec![3], vec![]]).unwrap();
        assert_eq!(labels, vec![4, 2, DEFAULT_LABEL]);
    }

    #[test]
    fn test_label_clusters_rejects_bad_index() {
        let data = Dataset::new(vec![Example::new(vec![0.0], 1)], 1).unwrap();
        assert!(matches!(
            label_clusters(&data, &[vec![0, 5]]),
            Err(Error::InvalidInput(_))
        ));
    }
}
