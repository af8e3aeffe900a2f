//! A coreset given as point indices with weights.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::CoresetError;

/// A weighted subset of a dataset.
///
/// indices and weights are parallel. An index can appear more than once when it was drawn with replacement,
/// [compact](Self::compact) merges the duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexCoreset {
    indices: Vec<usize>,
    weights: Vec<f64>,
}

impl IndexCoreset {
    /// checks lengths are equal and weights are finite and positive
    pub fn new(indices: Vec<usize>, weights: Vec<f64>) -> Result<Self, CoresetError> {
        if indices.len() != weights.len() {
            return Err(CoresetError::InvalidParameter(format!(
                "coreset with {} indices and {} weights",
                indices.len(),
                weights.len()
            )));
        }
        if let Some(w) = weights.iter().find(|w| !(w.is_finite() && **w > 0.)) {
            return Err(CoresetError::InvalidParameter(format!(
                "coreset weight must be finite and positive, got {}",
                w
            )));
        }
        Ok(IndexCoreset { indices, weights })
    }

    // used by samplers which produce valid weights by construction
    pub(crate) fn from_parts(indices: Vec<usize>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(indices.len(), weights.len());
        IndexCoreset { indices, weights }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn get_weights(&self) -> &[f64] {
        &self.weights
    }

    /// iterator over (index, weight)
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.weights.iter().copied())
    }

    pub fn get_total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// replaces entry at rank i
    pub fn set(&mut self, i: usize, index: usize, weight: f64) -> Result<(), CoresetError> {
        if i >= self.len() {
            return Err(CoresetError::InvalidParameter(format!(
                "rank {} out of coreset of size {}",
                i,
                self.len()
            )));
        }
        if !(weight.is_finite() && weight > 0.) {
            return Err(CoresetError::InvalidParameter(format!(
                "coreset weight must be finite and positive, got {}",
                weight
            )));
        }
        self.indices[i] = index;
        self.weights[i] = weight;
        Ok(())
    }

    /// merges duplicate indices, summing their weights. Order of first occurrence is kept.
    pub fn compact(&mut self) {
        let mut rank = HashMap::<usize, usize>::with_capacity(self.len());
        let mut indices = Vec::<usize>::with_capacity(self.len());
        let mut weights = Vec::<f64>::with_capacity(self.len());
        for (index, w) in self.iter() {
            match rank.get(&index) {
                Some(r) => weights[*r] += w,
                None => {
                    rank.insert(index, indices.len());
                    indices.push(index);
                    weights.push(w);
                }
            }
        }
        log::debug!("compact coreset from {} to {}", self.len(), indices.len());
        self.indices = indices;
        self.weights = weights;
    }

    /// dumps records index,weight in a csv file with a header
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("IndexCoreset::write_csv could not open {}", path.display()))?;
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(["index", "weight"])?;
        for (index, w) in self.iter() {
            wtr.write_record(&[index.to_string(), format!("{:e}", w)])?;
        }
        wtr.flush()?;
        log::info!("coreset of size {} dumped in {}", self.len(), path.display());
        Ok(())
    }
} // end of impl IndexCoreset

//========================================================
