//! Labeled examples and the whitespace-delimited text format they are read from.
//!
//! Each record is `n_features` real numbers followed by one integer label. The
//! reader is token based: records may span lines or share a line. A trailing
//! record that runs out of tokens is dropped rather than stored half-filled.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};

/// A single labeled data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub features: Vec<f64>,
    pub label: i32,
}

impl Example {
    pub fn new(features: Vec<f64>, label: i32) -> Self {
        Self { features, label }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.features.is_empty() {
            return Ok(());
        }
        write!(f, "{}\t{}", format_vector(&self.features), self.label)
    }
}

/// Formats a feature vector or center as tab-separated values.
pub fn format_vector(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

/// An ordered, read-only collection of examples sharing one dimensionality.
///
/// Clusters refer to examples by their index in this collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    examples: Vec<Example>,
    n_features: usize,
}

impl Dataset {
    /// Builds a dataset from already constructed examples.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `n_features` is zero.
    /// - `DimensionMismatch` if any example has a different number of features.
    pub fn new(examples: Vec<Example>, n_features: usize) -> Result<Self> {
        check_feature_count(n_features)?;
        if let Some(bad) = examples.iter().find(|e| e.features.len() != n_features) {
            return Err(Error::DimensionMismatch {
                expected: n_features,
                got: bad.features.len(),
            });
        }
        Ok(Self {
            examples,
            n_features,
        })
    }

    /// Reads examples from a file.
    pub fn from_path<P: AsRef<Path>>(path: P, n_features: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(BufReader::new(file), n_features, &path.display().to_string())?;
        debug!(
            "loaded {} examples with {} features from {}",
            dataset.len(),
            n_features,
            path.display()
        );
        Ok(dataset)
    }

    /// Parses examples from in-memory text.
    pub fn from_str_with(text: &str, n_features: usize) -> Result<Self> {
        Self::parse(text.as_bytes(), n_features, "<input>")
    }

    /// Parses examples from any buffered reader.
    ///
    /// `origin` names the source in parse errors.
    pub fn parse<R: BufRead>(reader: R, n_features: usize, origin: &str) -> Result<Self> {
        check_feature_count(n_features)?;

        let mut examples = Vec::new();
        let mut features = Vec::with_capacity(n_features);

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| Error::Io {
                path: origin.into(),
                source,
            })?;
            let line_no = line_idx + 1;

            for token in line.split_whitespace() {
                if features.len() < n_features {
                    let value = token.parse::<f64>().map_err(|e| Error::Parse {
                        origin: origin.to_string(),
                        line: line_no,
                        token: token.to_string(),
                        reason: e.to_string(),
                    })?;
                    if !value.is_finite() {
                        return Err(Error::Parse {
                            origin: origin.to_string(),
                            line: line_no,
                            token: token.to_string(),
                            reason: "non-finite value".to_string(),
                        });
                    }
                    features.push(value);
                } else {
                    let label = token.parse::<i32>().map_err(|e| Error::Parse {
                        origin: origin.to_string(),
                        line: line_no,
                        token: token.to_string(),
                        reason: e.to_string(),
                    })?;
                    let full = std::mem::replace(&mut features, Vec::with_capacity(n_features));
                    examples.push(Example::new(full, label));
                }
            }
        }

        if !features.is_empty() {
            warn!(
                "{}: discarding incomplete trailing record ({} of {} tokens)",
                origin,
                features.len(),
                n_features + 1
            );
        }

        Ok(Self {
            examples,
            n_features,
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn get(&self, index: usize) -> Option<&Example> {
        self.examples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

fn check_feature_count(n_features: usize) -> Result<()> {
    if n_features == 0 {
        return Err(Error::InvalidInput(
            "examples must have at least one feature".to_string(),
        ));
    }
    Ok(())
}
