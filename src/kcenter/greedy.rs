//! Randomized greedy 2-approximation of k-center with outliers (Algorithm 2 of Ding, Yu, Wang).
//!
//! This is the farthest first traversal, except that the next center is drawn uniformly
//! among the ceil((1+eps) * z) farthest points instead of being the farthest one,
//! so that isolated outliers are unlikely to be chosen.

use rand::Rng;
use rayon::prelude::*;

use super::farthest::FarthestQueue;
use crate::error::{CoresetError, check_eps, check_gamma};
use crate::metric::Distance;

/// size of the window of farthest points the next center is drawn from. At least 1.
pub fn get_window_capacity(nb_points: usize, gamma: f64, eps: f64) -> usize {
    let z = (gamma * nb_points as f64).ceil();
    (((1. + eps) * z).ceil() as usize).max(1)
}

/// Returns k centers (dataset indices, in order of selection), the first one drawn uniformly.
pub fn greedy_2approx_outliers<D, R>(
    distance: &D,
    nb_points: usize,
    k: usize,
    gamma: f64,
    eps: f64,
    rng: &mut R,
) -> Result<Vec<usize>, CoresetError>
where
    D: Distance,
    R: Rng + ?Sized,
{
    if nb_points == 0 {
        return Err(CoresetError::DegenerateInput(
            "greedy_2approx_outliers called with no points".into(),
        ));
    }
    let first = rng.random_range(0..nb_points);
    greedy_2approx_outliers_from(distance, nb_points, first, k, gamma, eps, rng)
}

/// Same as [greedy_2approx_outliers] but with an imposed first center.
pub fn greedy_2approx_outliers_from<D, R>(
    distance: &D,
    nb_points: usize,
    first: usize,
    k: usize,
    gamma: f64,
    eps: f64,
    rng: &mut R,
) -> Result<Vec<usize>, CoresetError>
where
    D: Distance,
    R: Rng + ?Sized,
{
    if nb_points == 0 {
        return Err(CoresetError::DegenerateInput(
            "greedy_2approx_outliers called with no points".into(),
        ));
    }
    check_gamma(gamma)?;
    check_eps(eps)?;
    if k == 0 || k > nb_points {
        return Err(CoresetError::InvalidParameter(format!(
            "k must be in [1, {}], got {}",
            nb_points, k
        )));
    }
    if first >= nb_points {
        return Err(CoresetError::InvalidParameter(format!(
            "first center {} out of range, nb points : {}",
            first, nb_points
        )));
    }
    let capacity = get_window_capacity(nb_points, gamma, eps);
    log::info!(
        "greedy_2approx_outliers nb points : {}, k : {}, window capacity : {}",
        nb_points,
        k,
        capacity
    );
    //
    let mut centers = Vec::<usize>::with_capacity(k);
    let mut is_center = vec![false; nb_points];
    let mut distances = vec![f64::INFINITY; nb_points];
    let mut newc = first;
    loop {
        centers.push(newc);
        is_center[newc] = true;
        distances[newc] = 0.;
        if centers.len() >= k {
            break;
        }
        // update distances with the last center and collect the farthest points
        let queue = distances
            .par_iter_mut()
            .enumerate()
            .filter(|(i, _)| !is_center[*i])
            .fold(
                || FarthestQueue::new(capacity),
                |mut queue, (i, dist)| {
                    let d = distance.distance(i, newc);
                    if d < *dist {
                        *dist = d;
                    }
                    queue.add(*dist, i);
                    queue
                },
            )
            .reduce(|| FarthestQueue::new(capacity), FarthestQueue::merged);
        let members = queue.get_members();
        // k <= nb_points guarantees a non center point remains
        debug_assert!(!members.is_empty());
        newc = members[rng.random_range(0..members.len())].1;
        log::debug!(
            "center {} : {} at distance {:.3e}",
            centers.len(),
            newc,
            distances[newc]
        );
    }
    Ok(centers)
} // end of greedy_2approx_outliers_from

//========================================================
