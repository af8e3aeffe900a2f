//! Distance and cost providers.
//!
//! The algorithms never see point coordinates, they only ask for the distance between two point indices
//! through the [Distance] trait. Any `Fn(usize, usize) -> f64 + Sync` closure is a [Distance].
//!
//! - [point] and [matrix] give in-memory providers over vectors or an ndarray matrix with L1, L2 or squared L2 norms.
//! - [cost] defines the [CostProvider] trait giving for each point its cost to the nearest of a set of centers,
//!   as a graph shortest path provider would.

pub mod cost;
pub mod matrix;
pub mod point;

pub use cost::{CostProvider, NearestCenter};
pub use matrix::MatrixData;
pub use point::{Norm, Point, PointId, PointSet};

/// A distance between two points identified by their rank in an externally owned dataset.
///
/// The distance must be non negative, it needs not be symmetric.
/// It is called concurrently from rayon workers, so it must be Sync and stateless.
pub trait Distance: Sync {
    fn distance(&self, i: usize, j: usize) -> f64;
}

impl<F> Distance for F
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    fn distance(&self, i: usize, j: usize) -> f64 {
        self(i, j)
    }
}
