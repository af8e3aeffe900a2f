//! Weighted coresets and importance samplers.
//!
//! - [indexcoreset] : a coreset as parallel vectors of point indices and weights.
//! - [sampler] : sensitivity sampling from the costs of a k-clustering solution.
//!   Sensitivities follow:
//!     - New Frameworks for Offline and Streaming Coreset Constructions. Braverman, Feldman, Lang 2016.
//!     - On the Sensitivity of Shape Fitting Problems. Varadarajan, Xiao 2012.
//! - [uniform] : uniform sampling, a baseline to compare importance sampling against.

pub mod indexcoreset;
pub mod sampler;
pub mod uniform;

pub use indexcoreset::IndexCoreset;
pub use sampler::{CoresetSampler, Sampling, SensitivityScheme};
pub use uniform::UniformSampler;
