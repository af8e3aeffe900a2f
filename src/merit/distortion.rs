//! distortion of a coreset with respect to a full dataset

use rand::Rng;
use rayon::prelude::*;

use crate::coreset::{IndexCoreset, Sampling};
use crate::error::CoresetError;
use crate::metric::{CostProvider, Distance, NearestCenter};

/// cost of each point to its nearest center
pub fn point_costs<D: Distance>(distance: &D, nb_points: usize, centers: &[usize]) -> Vec<f64> {
    NearestCenter::new(distance, nb_points).costs(centers).0
}

/// weighted cost of the coreset points
pub fn coreset_cost(coreset: &IndexCoreset, costs: &[f64]) -> f64 {
    coreset
        .get_indices()
        .par_iter()
        .zip(coreset.get_weights().par_iter())
        .map(|(i, w)| w * costs[*i])
        .sum()
}

/// relative gap between the coreset cost and the full cost
pub fn distortion(coreset: &IndexCoreset, costs: &[f64]) -> Result<f64, CoresetError> {
    let full: f64 = costs.iter().sum();
    if full <= 0. {
        return Err(CoresetError::DegenerateInput(
            "distortion undefined with zero total cost".into(),
        ));
    }
    if let Some(i) = coreset.get_indices().iter().find(|i| **i >= costs.len()) {
        return Err(CoresetError::InvalidParameter(format!(
            "coreset index {} out of {} costs",
            i,
            costs.len()
        )));
    }
    Ok((coreset_cost(coreset, costs) / full - 1.).abs())
}

/// distortions observed over repeated coreset draws
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistortionStats {
    pub mean: f64,
    pub max: f64,
}

/// mean and max distortion over nb_iter coresets of given size drawn from sampler
pub fn mean_distortion<S, R>(
    sampler: &S,
    size: usize,
    nb_iter: usize,
    costs: &[f64],
    rng: &mut R,
) -> Result<DistortionStats, CoresetError>
where
    S: Sampling,
    R: Rng + ?Sized,
{
    if nb_iter == 0 {
        return Err(CoresetError::InvalidParameter("nb_iter must be >= 1".into()));
    }
    if costs.len() != sampler.get_nb_points() {
        return Err(CoresetError::InvalidParameter(format!(
            "sampler over {} points, got {} costs",
            sampler.get_nb_points(),
            costs.len()
        )));
    }
    let mut sum = 0.;
    let mut max: f64 = 0.;
    for _ in 0..nb_iter {
        let d = distortion(&sampler.sample_with(size, rng), costs)?;
        sum += d;
        max = max.max(d);
    }
    Ok(DistortionStats {
        mean: sum / nb_iter as f64,
        max,
    })
}
