//! cost providers: given candidate centers, return each point's cost and nearest center.
//!
//! A graph provider (shortest path costs from a set of vertices) is an external implementor of [CostProvider].
//! [NearestCenter] implements it for any [Distance].

use rayon::prelude::*;

use super::Distance;

/// Gives for every point its cost to the nearest of `centers`
/// and the rank (in `centers`) of that nearest center.
pub trait CostProvider {
    fn costs(&self, centers: &[usize]) -> (Vec<f64>, Vec<usize>);

    /// number of points (or vertices) costs are computed for
    fn get_nb_points(&self) -> usize;
}

/// Nearest center assignment computed by brute force over a [Distance], points are scanned in parallel.
pub struct NearestCenter<'a, D: Distance> {
    distance: &'a D,
    nb_points: usize,
}

impl<'a, D: Distance> NearestCenter<'a, D> {
    pub fn new(distance: &'a D, nb_points: usize) -> Self {
        NearestCenter {
            distance,
            nb_points,
        }
    }
}

impl<D: Distance> CostProvider for NearestCenter<'_, D> {
    fn costs(&self, centers: &[usize]) -> (Vec<f64>, Vec<usize>) {
        if centers.is_empty() {
            return (vec![f64::INFINITY; self.nb_points], vec![0; self.nb_points]);
        }
        (0..self.nb_points)
            .into_par_iter()
            .map(|i| {
                centers
                    .iter()
                    .enumerate()
                    .map(|(rank, c)| (self.distance.distance(i, *c), rank))
                    .fold((f64::INFINITY, 0), |best, cur| {
                        if cur.0 < best.0 { cur } else { best }
                    })
            })
            .unzip()
    }

    fn get_nb_points(&self) -> usize {
        self.nb_points
    }
}
