//! k-center clustering with outliers.
//!
//! All algorithms in this module are from:
//!  - Greedy Strategy Works for k-Center Clustering with Outliers and Coreset Construction.
//!    Ding H., Yu H., Wang Z. 2019. [arxiv](https://arxiv.org/abs/1901.08219)
//!
//! - [farthest] : the bounded farthest point queue and its parallel merge.
//! - [bicriteria] : Algorithm 1, centers plus a bounded outlier set.
//! - [greedy] : Algorithm 2, randomized farthest first traversal producing exactly k centers.
//! - [outliers] : Algorithm 3, the coreset built from a bicriteria solution.

pub mod bicriteria;
pub mod farthest;
pub mod greedy;
pub mod outliers;

pub use bicriteria::{BicriteriaParams, BicriteriaResult, kcenter_bicriteria};
pub use farthest::{FarthestQueue, Mergeable};
pub use greedy::{greedy_2approx_outliers, greedy_2approx_outliers_from};
pub use outliers::{OutlierCoresetParams, kcenter_coreset_outliers, outlier_coreset};
