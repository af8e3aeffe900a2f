//! This module is dedicated to the quality of coresets.
//!
//! The distortion of a coreset for a set of centers is |coreset cost / full cost - 1|
//! where the coreset cost is the weighted sum of the costs of its points.
//! A coreset for k centers should keep the distortion small for any set of k centers,
//! so distortions are evaluated on the approximate solution and on random center sets.

pub mod distortion;

pub use distortion::{DistortionStats, coreset_cost, distortion, mean_distortion, point_costs};
