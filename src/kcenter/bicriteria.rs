//! Outlier robust bicriteria approximation of k-center (Algorithm 1 of Ding, Yu, Wang).
//!
//! A random sample of centers is refined for a fixed number of rounds by adding centers drawn
//! among the current farthest points. The farthest points left at the end are the outliers.

use std::time::SystemTime;

use cpu_time::ProcessTime;
use indexmap::IndexSet;
use quantiles::ckms::CKMS;
use rand::Rng;
use rand::seq::index;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::farthest::FarthestQueue;
use crate::error::{CoresetError, check_eps, check_gamma};
use crate::metric::Distance;

#[cfg_attr(doc, katexit::katexit)]
/// Parameters of the bicriteria algorithm.
///
/// With $n$ points, the outlier budget is $z = \lceil \gamma n \rceil$, the farthest queue retains
/// $\lceil (1+\epsilon) z \rceil$ points and each round draws $\lceil \log(1/\eta) / (1-\gamma) \rceil$ new centers.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct BicriteriaParams {
    /// expected fraction of outliers, in (0,1)
    pub gamma: f64,
    /// slack on the farthest queue capacity, >= 0
    pub eps: f64,
    /// number of refinement rounds
    pub nb_rounds: usize,
    /// failure probability, in (0,1)
    pub eta: f64,
}

impl Default for BicriteriaParams {
    fn default() -> Self {
        BicriteriaParams {
            gamma: 0.001,
            eps: 0.1,
            nb_rounds: 100,
            eta: 0.01,
        }
    }
}

impl BicriteriaParams {
    pub fn new(gamma: f64, eps: f64, nb_rounds: usize, eta: f64) -> Self {
        BicriteriaParams {
            gamma,
            eps,
            nb_rounds,
            eta,
        }
    }

    /// checks parameters ranges
    pub fn check(&self) -> Result<(), CoresetError> {
        check_gamma(self.gamma)?;
        check_eps(self.eps)?;
        if !(self.eta > 0. && self.eta < 1.) {
            return Err(CoresetError::InvalidParameter(format!(
                "eta must be in (0,1), got {}",
                self.eta
            )));
        }
        Ok(())
    }

    /// outlier budget z for nb_points points
    pub fn get_nb_outliers(&self, nb_points: usize) -> usize {
        (self.gamma * nb_points as f64).ceil() as usize
    }

    /// number of centers drawn at initialization and at each round
    pub fn get_sample_chunk(&self) -> usize {
        ((1. / self.eta).ln() / (1. - self.gamma)).ceil() as usize
    }

    /// capacity of the farthest queue, raised to sample_chunk + z when sample_chunk exceeds it
    /// so that a whole chunk can always be drawn from the queue.
    pub fn get_farthest_capacity(&self, nb_points: usize) -> usize {
        let z = self.get_nb_outliers(nb_points);
        let capacity = ((1. + self.eps) * z as f64).ceil() as usize;
        let chunk = self.get_sample_chunk();
        if chunk > capacity {
            chunk + z
        } else {
            capacity
        }
    }
} // end of impl BicriteriaParams

//==========================================================

/// Result of the bicriteria algorithm.
///
/// Centers, labelled points and outliers partition the point indices:
/// a center is never an outlier, and [get_label](Self::get_label) is defined only for points that are neither.
#[derive(Debug, Clone)]
pub struct BicriteriaResult {
    // ordered, duplicate free
    centers: IndexSet<usize>,
    // dataset index of nearest center, for every point. A center is assigned to itself
    assignments: Vec<usize>,
    // distance to nearest center
    distances: Vec<f64>,
    // (distance, index) sorted by decreasing distance
    outliers: Vec<(f64, usize)>,
    is_outlier: Vec<bool>,
    outlier_threshold: f64,
}

impl BicriteriaResult {
    /// number of points of the dataset
    pub fn get_nb_points(&self) -> usize {
        self.assignments.len()
    }

    /// centers in order of selection
    pub fn get_centers(&self) -> &IndexSet<usize> {
        &self.centers
    }

    pub fn get_nb_centers(&self) -> usize {
        self.centers.len()
    }

    /// nearest center (as a dataset index) for any point, outliers included.
    pub fn get_assignment(&self, i: usize) -> usize {
        self.assignments[i]
    }

    pub fn get_assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// label of a non center, non outlier point: the dataset index of its nearest center.
    /// None for centers and outliers.
    pub fn get_label(&self, i: usize) -> Option<usize> {
        if self.is_outlier[i] || self.centers.contains(&i) {
            None
        } else {
            Some(self.assignments[i])
        }
    }

    /// distance of each point to its nearest center
    pub fn get_distances(&self) -> &[f64] {
        &self.distances
    }

    /// outliers as (distance, index), sorted by decreasing distance
    pub fn get_outliers(&self) -> &[(f64, usize)] {
        &self.outliers
    }

    pub fn is_outlier(&self, i: usize) -> bool {
        self.is_outlier[i]
    }

    /// smallest distance among outliers. Infinite if there is no outlier.
    pub fn get_outlier_threshold(&self) -> f64 {
        self.outlier_threshold
    }
} // end of impl BicriteriaResult

//==========================================================

// assign points not yet centers to their nearest new center, keeping the running minimum,
// and collect the farthest points. Returns the merged queue of the rayon workers.
fn refresh_farthest<D: Distance>(
    distance: &D,
    centers: &IndexSet<usize>,
    new_centers: &[usize],
    distances: &mut [f64],
    assignments: &mut [usize],
    capacity: usize,
) -> FarthestQueue {
    distances
        .par_iter_mut()
        .zip(assignments.par_iter_mut())
        .enumerate()
        .filter(|(i, _)| !centers.contains(i))
        .fold(
            || FarthestQueue::new(capacity),
            |mut queue, (i, (dist, label))| {
                for c in new_centers {
                    let d = distance.distance(i, *c);
                    debug_assert!(d >= 0., "negative distance between {} and {}", i, c);
                    if d < *dist {
                        *dist = d;
                        *label = *c;
                    }
                }
                queue.add(*dist, i);
                queue
            },
        )
        .reduce(|| FarthestQueue::new(capacity), FarthestQueue::merged)
}

fn log_distance_quantiles(distances: &[f64]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let mut q_dist = CKMS::<f64>::new(0.001);
    for d in distances {
        q_dist.insert(*d);
    }
    let q = |p: f64| q_dist.query(p).map(|x| x.1).unwrap_or(f64::NAN);
    log::debug!(
        "distance to centers quantiles at 0.05 : {:.2e} , 0.5 : {:.2e}, 0.95 : {:.2e}, 0.99 : {:.2e}, max : {:.2e}",
        q(0.05),
        q(0.5),
        q(0.95),
        q(0.99),
        q(1.)
    );
}

/// Computes a bicriteria solution of k-center with outliers over the nb_points points seen through distance.
///
/// 1. draws sample_chunk distinct points as initial centers.
/// 2. assigns every other point to its nearest center and collects the farthest ones.
/// 3. for nb_rounds rounds, draws sample_chunk distinct points among the farthest, adds them as centers
///    and updates assignments against the new centers only.
///
/// The farthest points of the last round are the outliers, the smallest of their distances the outlier threshold.
/// Points are scanned in parallel, rng is only used by the calling thread so that the result only depends on rng state.
pub fn kcenter_bicriteria<D, R>(
    distance: &D,
    nb_points: usize,
    params: &BicriteriaParams,
    rng: &mut R,
) -> Result<BicriteriaResult, CoresetError>
where
    D: Distance,
    R: Rng + ?Sized,
{
    if nb_points == 0 {
        return Err(CoresetError::DegenerateInput(
            "kcenter_bicriteria called with no points".into(),
        ));
    }
    params.check()?;
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    //
    let z = params.get_nb_outliers(nb_points);
    let capacity = params.get_farthest_capacity(nb_points);
    let sample_chunk = params.get_sample_chunk().min(nb_points);
    log::info!(
        "kcenter_bicriteria nb points : {}, z : {}, farthest capacity : {}, sample chunk : {}, nb rounds : {}",
        nb_points,
        z,
        capacity,
        sample_chunk,
        params.nb_rounds
    );
    if params.get_sample_chunk() > ((1. + params.eps) * z as f64).ceil() as usize {
        log::warn!(
            "sample chunk {} exceeds (1+eps)*z, farthest capacity raised to sample chunk + z : {}",
            params.get_sample_chunk(),
            capacity
        );
    }
    log::debug!(
        "nb threads : {}, nb cpus : {}",
        rayon::current_num_threads(),
        num_cpus::get()
    );
    //
    // there are never more centers than points, whatever the number of rounds
    let max_centers = sample_chunk
        .saturating_mul(params.nb_rounds.saturating_add(1))
        .min(nb_points);
    let mut centers = IndexSet::<usize>::with_capacity(max_centers);
    centers.extend(index::sample(rng, nb_points, sample_chunk).iter());
    //
    let mut distances = vec![f64::INFINITY; nb_points];
    let mut assignments: Vec<usize> = (0..nb_points).collect();
    for c in &centers {
        distances[*c] = 0.;
    }
    let initial: Vec<usize> = centers.iter().copied().collect();
    let mut queue = refresh_farthest(
        distance,
        &centers,
        &initial,
        &mut distances,
        &mut assignments,
        capacity,
    );
    //
    for round in 0..params.nb_rounds {
        let members = queue.get_members();
        if members.is_empty() {
            log::info!("all points are centers at round {}, stopping", round);
            break;
        }
        let nb_draw = sample_chunk.min(members.len());
        let new_centers: Vec<usize> = index::sample(rng, members.len(), nb_draw)
            .iter()
            .map(|rank| members[rank].1)
            .filter(|c| !centers.contains(c))
            .collect();
        for c in &new_centers {
            centers.insert(*c);
            distances[*c] = 0.;
            assignments[*c] = *c;
        }
        queue = refresh_farthest(
            distance,
            &centers,
            &new_centers,
            &mut distances,
            &mut assignments,
            capacity,
        );
        log::debug!(
            "round {} nb centers : {}, queue threshold : {:?}",
            round,
            centers.len(),
            queue.threshold()
        );
    }
    //
    let outlier_threshold = queue.threshold().unwrap_or(f64::INFINITY);
    let outliers = queue.into_members();
    let mut is_outlier = vec![false; nb_points];
    for (_, i) in &outliers {
        is_outlier[*i] = true;
    }
    log_distance_quantiles(&distances);
    log::info!(
        "kcenter_bicriteria nb centers : {}, outliers size : {}, outlier threshold : {:.3e}",
        centers.len(),
        outliers.len(),
        outlier_threshold
    );
    log::info!(
        "kcenter_bicriteria sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().map(|d| d.as_millis()).unwrap_or(0),
        cpu_start.elapsed().as_millis()
    );
    //
    Ok(BicriteriaResult {
        centers,
        assignments,
        distances,
        outliers,
        is_outlier,
        outlier_threshold,
    })
} // end of kcenter_bicriteria

//========================================================
