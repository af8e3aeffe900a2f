//! Uniform sampling, the baseline importance sampling is compared with.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::indexcoreset::IndexCoreset;
use super::sampler::Sampling;
use crate::error::CoresetError;

/// Each point has probability 1/n, each draw gets weight n/size.
pub struct UniformSampler {
    nb_points: usize,
    rng: Xoshiro256PlusPlus,
}

impl UniformSampler {
    pub fn new(nb_points: usize, seed: u64) -> Result<Self, CoresetError> {
        if nb_points == 0 {
            return Err(CoresetError::DegenerateInput(
                "uniform sampler over no points".into(),
            ));
        }
        Ok(UniformSampler {
            nb_points,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    /// probability of any point
    pub fn get_prob(&self) -> f64 {
        1. / self.nb_points as f64
    }

    /// draws size points with the sampler own generator
    pub fn sample(&mut self, size: usize) -> IndexCoreset {
        let mut rng = self.rng.clone();
        let coreset = self.sample_with(size, &mut rng);
        self.rng = rng;
        coreset
    }
}

impl Sampling for UniformSampler {
    fn get_nb_points(&self) -> usize {
        self.nb_points
    }

    fn sample_with<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> IndexCoreset {
        let w = self.nb_points as f64 / size as f64;
        let indices: Vec<usize> = (0..size)
            .map(|_| rng.random_range(0..self.nb_points))
            .collect();
        IndexCoreset::from_parts(indices, vec![w; size])
    }
}
