//! Coreset construction from a bicriteria solution (Algorithm 3 of Ding, Yu, Wang).
//!
//! Outliers are hard to approximate so each one represents only itself (weight 1),
//! each center represents its whole cluster (weight = number of points assigned to it).
//! The weights sum to the number of points.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::bicriteria::{BicriteriaParams, BicriteriaResult, kcenter_bicriteria};
use crate::coreset::IndexCoreset;
use crate::error::{CoresetError, check_eps, check_gamma};
use crate::metric::Distance;

/// Builds the coreset made of outliers with weight 1 and centers weighted by the size of their cluster.
/// Outliers come first (by decreasing distance), then centers in order of selection.
pub fn outlier_coreset(bicriteria: &BicriteriaResult) -> Result<IndexCoreset, CoresetError> {
    let nb_points = bicriteria.get_nb_points();
    let centers = bicriteria.get_centers();
    // counts are indexed by the rank of the center in centers
    let counts: Vec<AtomicUsize> = (0..centers.len()).map(|_| AtomicUsize::new(0)).collect();
    (0..nb_points)
        .into_par_iter()
        .filter(|i| !bicriteria.is_outlier(*i))
        .for_each(|i| {
            if let Some(rank) = centers.get_index_of(&bicriteria.get_assignment(i)) {
                counts[rank].fetch_add(1, Ordering::Relaxed);
            }
        });
    //
    let outliers = bicriteria.get_outliers();
    let mut indices = Vec::<usize>::with_capacity(outliers.len() + centers.len());
    let mut weights = Vec::<f64>::with_capacity(outliers.len() + centers.len());
    for (_, i) in outliers {
        indices.push(*i);
        weights.push(1.);
    }
    for (c, count) in centers.iter().zip(counts.iter()) {
        let count = count.load(Ordering::Relaxed);
        if count > 0 {
            indices.push(*c);
            weights.push(count as f64);
        }
    }
    let coreset = IndexCoreset::new(indices, weights)?;
    let total = coreset.get_total_weight();
    log::info!(
        "outlier_coreset size : {}, nb centers : {}, nb outliers : {}",
        coreset.len(),
        centers.len(),
        outliers.len()
    );
    if total != nb_points as f64 {
        log::error!("outlier_coreset total weight {} != nb points {}", total, nb_points);
        return Err(CoresetError::InvalidParameter(format!(
            "inconsistent bicriteria result, coreset weight {} for {} points",
            total, nb_points
        )));
    }
    Ok(coreset)
} // end of outlier_coreset

//==========================================================

#[cfg_attr(doc, katexit::katexit)]
/// Parameters of the k-center with outliers coreset.
///
/// The bicriteria solution is run with $\lceil (L + \sqrt{L}) / (1 - \eta) \rceil$ rounds
/// where $L = \lceil (2/\mu)^{\rho} k \rceil$.
/// $\mu$ is the quality of the coreset, $\rho$ is the doubling dimension of the data
/// (the dimension $D$ for $R^D$ as a worst case, usually less on structured data).
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct OutlierCoresetParams {
    /// number of centers of the target solution
    pub k: usize,
    pub eps: f64,
    /// coreset quality in (0,1]
    pub mu: f64,
    pub rho: f64,
    pub gamma: f64,
    pub eta: f64,
}

impl OutlierCoresetParams {
    /// parameters with default values for all but k
    pub fn new(k: usize) -> Self {
        OutlierCoresetParams {
            k,
            eps: 0.1,
            mu: 0.5,
            rho: 1.5,
            gamma: 0.001,
            eta: 0.01,
        }
    }

    pub fn check(&self) -> Result<(), CoresetError> {
        if self.k == 0 {
            return Err(CoresetError::InvalidParameter("k must be >= 1".into()));
        }
        if !(self.mu > 0. && self.mu <= 1.) {
            return Err(CoresetError::InvalidParameter(format!(
                "mu must be in (0,1], got {}",
                self.mu
            )));
        }
        if !(self.rho > 0. && self.rho.is_finite()) {
            return Err(CoresetError::InvalidParameter(format!(
                "rho must be > 0, got {}",
                self.rho
            )));
        }
        check_gamma(self.gamma)?;
        check_eps(self.eps)?;
        self.get_bicriteria_params().check()
    }

    /// L : number of balls covering a cluster at the coreset resolution
    pub fn get_nb_balls(&self) -> usize {
        ((2. / self.mu).powf(self.rho) * self.k as f64).ceil() as usize
    }

    pub fn get_nb_rounds(&self) -> usize {
        let l = self.get_nb_balls() as f64;
        ((l + l.sqrt()) / (1. - self.eta)).ceil() as usize
    }

    /// parameters of the underlying bicriteria run
    pub fn get_bicriteria_params(&self) -> BicriteriaParams {
        BicriteriaParams::new(self.gamma, self.eps, self.get_nb_rounds(), self.eta)
    }
} // end of impl OutlierCoresetParams

/// Runs the bicriteria algorithm with rounds derived from k, mu and rho and builds the outlier coreset.
/// Returns the coreset and the bicriteria solution it was built from.
pub fn kcenter_coreset_outliers<D, R>(
    distance: &D,
    nb_points: usize,
    params: &OutlierCoresetParams,
    rng: &mut R,
) -> Result<(IndexCoreset, BicriteriaResult), CoresetError>
where
    D: Distance,
    R: Rng + ?Sized,
{
    params.check()?;
    log::info!(
        "kcenter_coreset_outliers k : {}, L : {}, nb rounds : {}",
        params.k,
        params.get_nb_balls(),
        params.get_nb_rounds()
    );
    let bicriteria = kcenter_bicriteria(distance, nb_points, &params.get_bicriteria_params(), rng)?;
    log::info!(
        "outlier threshold : {:.3e}",
        bicriteria.get_outlier_threshold()
    );
    let coreset = outlier_coreset(&bicriteria)?;
    Ok((coreset, bicriteria))
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};
    use rand_xoshiro::Xoshiro256PlusPlus;

    use crate::metric::{Norm, PointSet};

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn gaussian_points(n: usize, dim: usize, seed: u64) -> PointSet<f32> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let normal = Normal::<f32>::new(0., 10.).unwrap();
        let data = (0..n)
            .map(|_| (0..dim).map(|_| normal.sample(&mut rng)).collect())
            .collect();
        PointSet::from_vecs(data, Norm::L2)
    }

    #[test]
    fn weights_sum_to_nb_points() {
        log_init_test();
        let line = |i: usize, j: usize| (i as f64 - j as f64).abs();
        for (n, seed) in [(50usize, 1u64), (333, 2), (1000, 3)] {
            let params = BicriteriaParams::new(0.02, 0.3, 5, 0.05);
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let bic = kcenter_bicriteria(&line, n, &params, &mut rng).unwrap();
            let coreset = outlier_coreset(&bic).unwrap();
            assert_eq!(coreset.get_total_weight(), n as f64);
            assert_eq!(coreset.len(), bic.get_nb_centers() + bic.get_outliers().len());
            // outliers first with weight 1
            for (j, (_, i)) in bic.get_outliers().iter().enumerate() {
                assert_eq!(coreset.get_indices()[j], *i);
                assert_eq!(coreset.get_weights()[j], 1.);
            }
        }
    }

    #[test]
    fn coreset_driver() {
        log_init_test();
        let points = gaussian_points(2000, 3, 4455);
        let params = OutlierCoresetParams {
            k: 3,
            eps: 0.1,
            mu: 1.,
            rho: 1.,
            gamma: 0.005,
            eta: 0.1,
        };
        // L = 2 * 3 , rounds = ceil((6 + 2.449) / 0.9) = 10
        assert_eq!(params.get_nb_balls(), 6);
        assert_eq!(params.get_nb_rounds(), 10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        let (coreset, bic) = kcenter_coreset_outliers(&points, 2000, &params, &mut rng).unwrap();
        assert_eq!(coreset.get_total_weight(), 2000.);
        assert!(coreset.len() < 2000);
        assert_eq!(
            bic.get_outliers().len(),
            params.get_bicriteria_params().get_farthest_capacity(2000)
        );
    }

    // rho = 20 asks for about 1e13 rounds, the run must stop when points are exhausted
    #[test]
    fn high_doubling_dimension() {
        log_init_test();
        let line = |i: usize, j: usize| (i as f64 - j as f64).abs();
        let params = OutlierCoresetParams {
            k: 10,
            eps: 0.1,
            mu: 0.5,
            rho: 20.,
            gamma: 0.05,
            eta: 0.01,
        };
        assert!(params.get_nb_rounds() > 1_000_000_000_000);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(21);
        let (coreset, bic) = kcenter_coreset_outliers(&line, 200, &params, &mut rng).unwrap();
        assert_eq!(bic.get_nb_centers(), 200);
        assert_eq!(coreset.len(), 200);
        assert_eq!(coreset.get_total_weight(), 200.);
    }

    #[test]
    fn driver_errors() {
        let line = |i: usize, j: usize| (i as f64 - j as f64).abs();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let mut params = OutlierCoresetParams::new(0);
        assert!(kcenter_coreset_outliers(&line, 10, &params, &mut rng).is_err());
        params.k = 2;
        params.mu = 0.;
        assert!(kcenter_coreset_outliers(&line, 10, &params, &mut rng).is_err());
        params.mu = 0.5;
        params.eta = 1.;
        assert!(kcenter_coreset_outliers(&line, 10, &params, &mut rng).is_err());
    }
}
