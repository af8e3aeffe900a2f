//! Sensitivity (importance) sampling of coresets.
//!
//! Given a k-clustering solution (per point cost and assignment), each point gets a sensitivity:
//! an upper bound of its relative contribution to the cost of any solution.
//! Points are drawn with probability proportional to sensitivity and weighted by the inverse of
//! their probability so that the weighted cost of the sample is an unbiased estimator of the total cost.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use rand_distr::weighted::WeightedAliasIndex;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::indexcoreset::IndexCoreset;
use crate::error::CoresetError;
use crate::metric::CostProvider;

/// Anything able to draw a weighted coreset of a requested size.
pub trait Sampling {
    /// number of points of the dataset sampled from
    fn get_nb_points(&self) -> usize;
    /// draws size points with replacement, using rng
    fn sample_with<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> IndexCoreset;
}

//==========================================================

#[cfg_attr(doc, katexit::katexit)]
/// Sensitivity formulas.
///
/// For a point $i$ with weight $w_i$ and cost $c_i$ assigned to cluster $a$, with $W_a$ the weight of the cluster,
/// $C_a$ its (weighted) cost and $C$ the total cost:
///
/// - BravermanFeldmanLang : $s_i = w_i (c_i / C_a + 1 / W_a)$, the cost term being dropped if $C_a = 0$.
///   The total sensitivity is at most $2k$, independent of the number of points.
/// - VaradarajanXiao : $s_i = w_i (c_i / C + C_a / (W_a C) + 2 / W_a)$.
///   The total sensitivity is $2 + 2k$ for $k$ non empty clusters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensitivityScheme {
    BravermanFeldmanLang,
    VaradarajanXiao,
}

impl SensitivityScheme {
    /// stable tag used in persisted samplers
    pub fn get_tag(&self) -> u8 {
        match self {
            SensitivityScheme::BravermanFeldmanLang => 0,
            SensitivityScheme::VaradarajanXiao => 1,
        }
    }

    // sensitivity of a point of weight w and cost c in a cluster of weight cluster_w and cost cluster_c
    fn sensitivity(&self, w: f64, c: f64, cluster_w: f64, cluster_c: f64, total_c: f64) -> f64 {
        if w <= 0. {
            return 0.;
        }
        match self {
            SensitivityScheme::BravermanFeldmanLang => {
                let cost_term = if cluster_c > 0. { c / cluster_c } else { 0. };
                w * (cost_term + 1. / cluster_w)
            }
            SensitivityScheme::VaradarajanXiao => {
                w * (c / total_c + cluster_c / (cluster_w * total_c) + 2. / cluster_w)
            }
        }
    }
}

impl TryFrom<u8> for SensitivityScheme {
    type Error = CoresetError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(SensitivityScheme::BravermanFeldmanLang),
            1 => Ok(SensitivityScheme::VaradarajanXiao),
            _ => Err(CoresetError::UnsupportedScheme(format!("tag {}", tag))),
        }
    }
}

impl FromStr for SensitivityScheme {
    type Err = CoresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfl" | "bfl16" | "bravermanfeldmanlang" | "braverman_feldman_lang" => {
                Ok(SensitivityScheme::BravermanFeldmanLang)
            }
            "vx" | "vx11" | "varadarajanxiao" | "varadarajan_xiao" => {
                Ok(SensitivityScheme::VaradarajanXiao)
            }
            _ => Err(CoresetError::UnsupportedScheme(s.to_string())),
        }
    }
}

impl fmt::Display for SensitivityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityScheme::BravermanFeldmanLang => write!(f, "BFL16"),
            SensitivityScheme::VaradarajanXiao => write!(f, "VX11"),
        }
    }
}

//==========================================================

// what is persisted. The alias table is rebuilt at load
#[derive(Serialize, Deserialize)]
struct SamplerDump {
    tag: u8,
    probs: Vec<f64>,
    weights: Option<Vec<f64>>,
    total_sensitivity: f64,
}

/// Importance sampler built from the costs of a k-clustering.
///
/// Draws are done with an alias table in O(1).
pub struct CoresetSampler {
    scheme: SensitivityScheme,
    // normalized sensitivities
    probs: Vec<f64>,
    // external point weights, None means all 1.
    weights: Option<Vec<f64>>,
    total_sensitivity: f64,
    alias: WeightedAliasIndex<f64>,
    rng: Xoshiro256PlusPlus,
}

impl CoresetSampler {
    /// Builds the sampling distribution.
    /// - costs\[i\] : cost of point i in the solution, non negative
    /// - assignments\[i\] : rank in 0..k of the center point i is assigned to
    /// - weights : optional point weights, all 1 if None
    /// - seed : seed of the generator used by [sample](Self::sample)
    pub fn make_sampler(
        nb_points: usize,
        k: usize,
        costs: &[f64],
        assignments: &[usize],
        weights: Option<&[f64]>,
        seed: u64,
        scheme: SensitivityScheme,
    ) -> Result<Self, CoresetError> {
        check_inputs(nb_points, k, costs, assignments, weights)?;
        let weight = |i: usize| weights.map_or(1., |w| w[i]);
        let (cluster_w, cluster_c) = cluster_aggregates(k, costs, assignments, weights);
        let total_c: f64 = cluster_c.iter().sum();
        if total_c <= 0. {
            return Err(CoresetError::DegenerateInput(
                "all costs are zero, sensitivities are undefined".into(),
            ));
        }
        log::debug!(
            "make_sampler nb points : {}, k : {}, total cost : {:.3e}, nb empty clusters : {}",
            nb_points,
            k,
            total_c,
            cluster_w.iter().filter(|w| **w <= 0.).count()
        );
        //
        let sensitivities: Vec<f64> = (0..nb_points)
            .into_par_iter()
            .map(|i| {
                let a = assignments[i];
                scheme.sensitivity(weight(i), costs[i], cluster_w[a], cluster_c[a], total_c)
            })
            .collect();
        let total_sensitivity: f64 = sensitivities.iter().sum();
        if !(total_sensitivity > 0. && total_sensitivity.is_finite()) {
            return Err(CoresetError::DegenerateInput(format!(
                "total sensitivity is {}",
                total_sensitivity
            )));
        }
        let probs: Vec<f64> = sensitivities.iter().map(|s| s / total_sensitivity).collect();
        log::info!(
            "make_sampler scheme : {}, nb points : {}, total sensitivity : {:.3e}",
            scheme,
            nb_points,
            total_sensitivity
        );
        Self::from_probs(
            scheme,
            probs,
            weights.map(|w| w.to_vec()),
            total_sensitivity,
            seed,
        )
    } // end of make_sampler

    /// computes costs and assignments of centers with provider then builds the sampler
    pub fn from_provider<P: CostProvider>(
        provider: &P,
        centers: &[usize],
        weights: Option<&[f64]>,
        seed: u64,
        scheme: SensitivityScheme,
    ) -> Result<Self, CoresetError> {
        let (costs, assignments) = provider.costs(centers);
        Self::make_sampler(
            provider.get_nb_points(),
            centers.len(),
            &costs,
            &assignments,
            weights,
            seed,
            scheme,
        )
    }

    fn from_probs(
        scheme: SensitivityScheme,
        probs: Vec<f64>,
        weights: Option<Vec<f64>>,
        total_sensitivity: f64,
        seed: u64,
    ) -> Result<Self, CoresetError> {
        let alias = WeightedAliasIndex::new(probs.clone()).map_err(|e| {
            CoresetError::DegenerateInput(format!("cannot build alias table : {}", e))
        })?;
        Ok(CoresetSampler {
            scheme,
            probs,
            weights,
            total_sensitivity,
            alias,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    /// draws size points with the sampler own generator
    pub fn sample(&mut self, size: usize) -> IndexCoreset {
        let mut rng = self.rng.clone();
        let coreset = self.sample_with(size, &mut rng);
        self.rng = rng;
        coreset
    }

    pub fn get_scheme(&self) -> SensitivityScheme {
        self.scheme
    }

    /// sampling probability of each point
    pub fn get_probs(&self) -> &[f64] {
        &self.probs
    }

    /// sum of sensitivities. It drives the coreset size needed for a given precision.
    pub fn get_total_sensitivity(&self) -> f64 {
        self.total_sensitivity
    }

    /// external weight of point i, 1. if the sampler was built without weights
    pub fn get_point_weight(&self, i: usize) -> f64 {
        self.weights.as_ref().map_or(1., |w| w[i])
    }

    /// persists the scheme, probabilities and weights (bincode)
    pub fn write<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("CoresetSampler::write could not open {}", path.display()))?;
        let dump = SamplerDump {
            tag: self.scheme.get_tag(),
            probs: self.probs.clone(),
            weights: self.weights.clone(),
            total_sensitivity: self.total_sensitivity,
        };
        bincode::serialize_into(BufWriter::new(file), &dump)
            .with_context(|| format!("CoresetSampler::write failed for {}", path.display()))?;
        log::info!(
            "sampler with {} points dumped in {}",
            self.probs.len(),
            path.display()
        );
        Ok(())
    }

    /// reloads a sampler written by [write](Self::write). seed initializes the generator of the new sampler.
    pub fn read<P: AsRef<Path>>(path: P, seed: u64) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("CoresetSampler::read could not open {}", path.display()))?;
        let dump: SamplerDump = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("CoresetSampler::read could not decode {}", path.display()))?;
        let scheme = SensitivityScheme::try_from(dump.tag)?;
        if let Some(w) = dump.weights.as_ref() {
            if w.len() != dump.probs.len() {
                return Err(CoresetError::InvalidParameter(format!(
                    "persisted sampler has {} probabilities and {} weights",
                    dump.probs.len(),
                    w.len()
                ))
                .into());
            }
        }
        let sampler = Self::from_probs(
            scheme,
            dump.probs,
            dump.weights,
            dump.total_sensitivity,
            seed,
        )?;
        log::info!(
            "sampler {} with {} points reloaded from {}",
            scheme,
            sampler.probs.len(),
            path.display()
        );
        Ok(sampler)
    }
} // end of impl CoresetSampler

impl Sampling for CoresetSampler {
    fn get_nb_points(&self) -> usize {
        self.probs.len()
    }

    /// weight of a draw of point i is w_i / (size * probs\[i\])
    fn sample_with<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> IndexCoreset {
        let mut indices = Vec::<usize>::with_capacity(size);
        let mut weights = Vec::<f64>::with_capacity(size);
        for _ in 0..size {
            let i = self.alias.sample(rng);
            indices.push(i);
            weights.push(self.get_point_weight(i) / (size as f64 * self.probs[i]));
        }
        IndexCoreset::from_parts(indices, weights)
    }
}

// points are summed by blocks of fixed size, the partial sums being added in block order,
// so the result does not depend on the number of threads
const AGGREGATE_BLOCK: usize = 4096;

// weight and weighted cost of each cluster
fn cluster_aggregates(
    k: usize,
    costs: &[f64],
    assignments: &[usize],
    weights: Option<&[f64]>,
) -> (Vec<f64>, Vec<f64>) {
    let partials: Vec<Vec<(f64, f64)>> = assignments
        .par_chunks(AGGREGATE_BLOCK)
        .enumerate()
        .map(|(b, block)| {
            let mut partial = vec![(0., 0.); k];
            let first = b * AGGREGATE_BLOCK;
            for (j, a) in block.iter().enumerate() {
                let i = first + j;
                let w = weights.map_or(1., |w| w[i]);
                partial[*a].0 += w;
                partial[*a].1 += w * costs[i];
            }
            partial
        })
        .collect();
    let mut cluster_w = vec![0.; k];
    let mut cluster_c = vec![0.; k];
    for partial in &partials {
        for (a, (w, c)) in partial.iter().enumerate() {
            cluster_w[a] += w;
            cluster_c[a] += c;
        }
    }
    (cluster_w, cluster_c)
}

// validation, done before any computation
fn check_inputs(
    nb_points: usize,
    k: usize,
    costs: &[f64],
    assignments: &[usize],
    weights: Option<&[f64]>,
) -> Result<(), CoresetError> {
    if nb_points == 0 {
        return Err(CoresetError::DegenerateInput(
            "make_sampler called with no points".into(),
        ));
    }
    if k == 0 {
        return Err(CoresetError::InvalidParameter("k must be >= 1".into()));
    }
    if costs.len() != nb_points || assignments.len() != nb_points {
        return Err(CoresetError::InvalidParameter(format!(
            "nb points {}, got {} costs and {} assignments",
            nb_points,
            costs.len(),
            assignments.len()
        )));
    }
    if let Some(w) = weights {
        if w.len() != nb_points {
            return Err(CoresetError::InvalidParameter(format!(
                "nb points {}, got {} weights",
                nb_points,
                w.len()
            )));
        }
        if let Some(bad) = w.iter().find(|x| !(x.is_finite() && **x >= 0.)) {
            return Err(CoresetError::InvalidParameter(format!(
                "point weights must be finite and non negative, got {}",
                bad
            )));
        }
    }
    if let Some(bad) = costs.iter().find(|c| !(c.is_finite() && **c >= 0.)) {
        return Err(CoresetError::InvalidParameter(format!(
            "costs must be finite and non negative, got {}",
            bad
        )));
    }
    if let Some(bad) = assignments.iter().find(|a| **a >= k) {
        return Err(CoresetError::InvalidParameter(format!(
            "assignment {} out of range for k = {}",
            bad, k
        )));
    }
    Ok(())
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use rand_distr::Exp;

    use crate::metric::NearestCenter;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const SCHEMES: [SensitivityScheme; 2] = [
        SensitivityScheme::BravermanFeldmanLang,
        SensitivityScheme::VaradarajanXiao,
    ];

    // costs drawn from an exponential law, assignment i % k
    fn random_solution(n: usize, k: usize, seed: u64) -> (Vec<f64>, Vec<usize>) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let exp = Exp::new(0.5).unwrap();
        let costs = (0..n).map(|_| exp.sample(&mut rng)).collect();
        let assignments = (0..n).map(|i| i % k).collect();
        (costs, assignments)
    }

    #[test]
    fn uniform_costs_give_uniform_probs() {
        log_init_test();
        for scheme in SCHEMES {
            let sampler =
                CoresetSampler::make_sampler(4, 1, &[1., 1., 1., 1.], &[0, 0, 0, 0], None, 0, scheme)
                    .unwrap();
            for p in sampler.get_probs() {
                assert!((p - 0.25).abs() < 1.0e-12);
            }
        }
    }

    #[test]
    fn total_sensitivity_bounds() {
        let k = 5;
        let (costs, asn) = random_solution(1000, k, 17);
        let bfl = CoresetSampler::make_sampler(
            1000,
            k,
            &costs,
            &asn,
            None,
            1,
            SensitivityScheme::BravermanFeldmanLang,
        )
        .unwrap();
        assert!((bfl.get_total_sensitivity() - 2. * k as f64).abs() < 1.0e-9);
        let vx = CoresetSampler::make_sampler(
            1000,
            k,
            &costs,
            &asn,
            None,
            1,
            SensitivityScheme::VaradarajanXiao,
        )
        .unwrap();
        assert!((vx.get_total_sensitivity() - (2. + 2. * k as f64)).abs() < 1.0e-9);
        let sum: f64 = vx.get_probs().iter().sum();
        assert!((sum - 1.).abs() < 1.0e-9);
    }

    #[test]
    fn sample_size_and_weights() {
        let (costs, asn) = random_solution(300, 3, 5);
        let mut sampler = CoresetSampler::make_sampler(
            300,
            3,
            &costs,
            &asn,
            None,
            77,
            SensitivityScheme::VaradarajanXiao,
        )
        .unwrap();
        for size in [0usize, 1, 10, 1000] {
            let cs = sampler.sample(size);
            assert_eq!(cs.len(), size);
            for (i, w) in cs.iter() {
                let expected = 1. / (size as f64 * sampler.get_probs()[i]);
                assert!((w - expected).abs() <= 1.0e-12 * expected);
            }
        }
    }

    // the total weight of a sample estimates the number of points, the weighted cost estimates the total cost
    #[test]
    fn unbiased_estimators() {
        log_init_test();
        let n = 2000;
        let (costs, asn) = random_solution(n, 4, 31);
        let total_cost: f64 = costs.iter().sum();
        for scheme in SCHEMES {
            let sampler = CoresetSampler::make_sampler(n, 4, &costs, &asn, None, 3, scheme).unwrap();
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(4321);
            let mut previous_error = f64::INFINITY;
            for size in [20usize, 2000] {
                let nb_draws = 200;
                let (mut mean_w, mut mean_c, mut mean_abs_err) = (0., 0., 0.);
                for _ in 0..nb_draws {
                    let cs = sampler.sample_with(size, &mut rng);
                    let w = cs.get_total_weight();
                    mean_w += w / nb_draws as f64;
                    mean_c += cs.iter().map(|(i, w)| w * costs[i]).sum::<f64>() / nb_draws as f64;
                    mean_abs_err += ((w - n as f64) / n as f64).abs() / nb_draws as f64;
                }
                log::info!(
                    "scheme {} size {} mean weight {:.3e} mean cost {:.3e} (true {:.3e}) mean rel error {:.3e}",
                    scheme,
                    size,
                    mean_w,
                    mean_c,
                    total_cost,
                    mean_abs_err
                );
                assert!((mean_w - n as f64).abs() < 0.05 * n as f64);
                assert!((mean_c - total_cost).abs() < 0.05 * total_cost);
                assert!(mean_abs_err < previous_error);
                previous_error = mean_abs_err;
            }
        }
    }

    #[test]
    fn external_weights() {
        let costs = [1., 2., 3., 4.];
        let asn = [0, 0, 1, 1];
        let weights = [2., 0., 1., 1.];
        let sampler = CoresetSampler::make_sampler(
            4,
            2,
            &costs,
            &asn,
            Some(&weights[..]),
            5,
            SensitivityScheme::BravermanFeldmanLang,
        )
        .unwrap();
        // zero weight point is never drawn
        assert_eq!(sampler.get_probs()[1], 0.);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let cs = sampler.sample_with(500, &mut rng);
        assert!(cs.get_indices().iter().all(|i| *i != 1));
        assert_eq!(sampler.get_point_weight(0), 2.);
    }

    #[test]
    fn deterministic_given_seed() {
        let (costs, asn) = random_solution(500, 2, 9);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let run = || {
            pool.install(|| {
                let mut sampler = CoresetSampler::make_sampler(
                    500,
                    2,
                    &costs,
                    &asn,
                    None,
                    2024,
                    SensitivityScheme::BravermanFeldmanLang,
                )
                .unwrap();
                (sampler.sample(100), sampler.sample(100))
            })
        };
        let (a, b) = (run(), run());
        assert_eq!(a.0.get_indices(), b.0.get_indices());
        assert_eq!(a.1.get_indices(), b.1.get_indices());
        let bits = |cs: &IndexCoreset| cs.get_weights().iter().map(|w| w.to_bits()).collect::<Vec<u64>>();
        assert_eq!(bits(&a.0), bits(&b.0));
        // successive draws differ
        assert_ne!(a.0.get_indices(), a.1.get_indices());
    }

    // bits of the probabilities do not depend on the thread count
    #[test]
    fn same_probs_any_thread_count() {
        let n = 5 * AGGREGATE_BLOCK + 17;
        let (costs, asn) = random_solution(n, 3, 44);
        let weights: Vec<f64> = (0..n).map(|i| 0.5 + (i % 7) as f64 * 0.3).collect();
        let build = |nb_threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(nb_threads)
                .build()
                .unwrap();
            pool.install(|| {
                CoresetSampler::make_sampler(
                    n,
                    3,
                    &costs,
                    &asn,
                    Some(weights.as_slice()),
                    7,
                    SensitivityScheme::VaradarajanXiao,
                )
                .unwrap()
            })
        };
        let bits = |s: &CoresetSampler| s.get_probs().iter().map(|p| p.to_bits()).collect::<Vec<u64>>();
        let reference = build(1);
        for nb_threads in [2, 4, 8] {
            let sampler = build(nb_threads);
            assert_eq!(bits(&sampler), bits(&reference));
            assert_eq!(
                sampler.get_total_sensitivity().to_bits(),
                reference.get_total_sensitivity().to_bits()
            );
        }
    }

    #[test]
    fn input_errors() {
        let s = SensitivityScheme::BravermanFeldmanLang;
        let err = |r: Result<CoresetSampler, CoresetError>| r.err().unwrap();
        assert!(matches!(
            err(CoresetSampler::make_sampler(3, 1, &[1., 1.], &[0, 0, 0], None, 0, s)),
            CoresetError::InvalidParameter(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 1, &[1., 1.], &[0, 0, 0], None, 0, s)),
            CoresetError::InvalidParameter(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 1, &[0., 0.], &[0, 0], None, 0, s)),
            CoresetError::DegenerateInput(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(0, 1, &[], &[], None, 0, s)),
            CoresetError::DegenerateInput(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 1, &[1., 1.], &[0, 1], None, 0, s)),
            CoresetError::InvalidParameter(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 0, &[1., 1.], &[0, 0], None, 0, s)),
            CoresetError::InvalidParameter(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 1, &[1., -1.], &[0, 0], None, 0, s)),
            CoresetError::InvalidParameter(_)
        ));
        assert!(matches!(
            err(CoresetSampler::make_sampler(2, 1, &[1., 1.], &[0, 0], Some(&[1.][..]), 0, s)),
            CoresetError::InvalidParameter(_)
        ));
    }

    #[test]
    fn scheme_tags() {
        for scheme in SCHEMES {
            assert_eq!(SensitivityScheme::try_from(scheme.get_tag()).unwrap(), scheme);
            assert_eq!(scheme.to_string().parse::<SensitivityScheme>().unwrap(), scheme);
        }
        assert_eq!(
            "bfl".parse::<SensitivityScheme>().unwrap(),
            SensitivityScheme::BravermanFeldmanLang
        );
        assert!(matches!(
            SensitivityScheme::try_from(9),
            Err(CoresetError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            "lucic".parse::<SensitivityScheme>(),
            Err(CoresetError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn write_read_round_trip() {
        log_init_test();
        let (costs, asn) = random_solution(1000, 3, 12);
        let weights: Vec<f64> = (0..1000).map(|i| 1. + (i % 3) as f64).collect();
        let sampler = CoresetSampler::make_sampler(
            1000,
            3,
            &costs,
            &asn,
            Some(weights.as_slice()),
            1,
            SensitivityScheme::VaradarajanXiao,
        )
        .unwrap();
        let path = std::env::temp_dir().join("coresetkc_sampler_round_trip.bin");
        sampler.write(&path).unwrap();
        let reloaded = CoresetSampler::read(&path, 1).unwrap();
        assert_eq!(reloaded.get_scheme(), SensitivityScheme::VaradarajanXiao);
        assert_eq!(reloaded.get_nb_points(), 1000);
        for (p, q) in sampler.get_probs().iter().zip(reloaded.get_probs()) {
            assert!((p - q).abs() < 1.0e-15);
        }
        assert_eq!(reloaded.get_point_weight(2), 3.);
        assert_eq!(reloaded.get_total_sensitivity(), sampler.get_total_sensitivity());
        // same seed, same draws
        let mut r1 = Xoshiro256PlusPlus::seed_from_u64(6);
        let mut r2 = Xoshiro256PlusPlus::seed_from_u64(6);
        assert_eq!(
            sampler.sample_with(50, &mut r1),
            reloaded.sample_with(50, &mut r2)
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn read_unknown_scheme() {
        let dump = SamplerDump {
            tag: 9,
            probs: vec![0.5, 0.5],
            weights: None,
            total_sensitivity: 2.,
        };
        let path = std::env::temp_dir().join("coresetkc_sampler_bad_tag.bin");
        let file = std::fs::File::create(&path).unwrap();
        bincode::serialize_into(file, &dump).unwrap();
        let err = CoresetSampler::read(&path, 0).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<CoresetError>(),
            Some(CoresetError::UnsupportedScheme(_))
        ));
        assert!(CoresetSampler::read(std::env::temp_dir().join("coresetkc_no_such_file"), 0).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn sampler_from_provider() {
        let line = |i: usize, j: usize| (i as f64 - j as f64).abs();
        let provider = NearestCenter::new(&line, 100);
        let sampler = CoresetSampler::from_provider(
            &provider,
            &[10, 60],
            None,
            3,
            SensitivityScheme::BravermanFeldmanLang,
        )
        .unwrap();
        assert_eq!(sampler.get_nb_points(), 100);
        // centers cost nothing, the farthest points of a cluster have the largest probability
        assert!(sampler.get_probs()[10] < sampler.get_probs()[99]);
        assert!(sampler.get_probs()[60] < sampler.get_probs()[35]);
    }
}
