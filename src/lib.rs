//! This crate builds coresets for clustering: small weighted subsets of a point set that preserve
//! the cost of k-center/k-median/k-means solutions.
//!
//! - [kcenter] provides the outlier robust k-center bicriteria approximation, the randomized greedy 2-approximation
//!   and the coreset built from the bicriteria outliers.
//!   Algorithms come from *Greedy Strategy Works for k-Center Clustering with Outliers and Coreset Construction*
//!   Ding, Yu, Wang 2019.
//! - [coreset] provides the weighted index coreset and the importance (sensitivity) samplers.
//! - [merit] evaluates the distortion of a coreset.
//!
//! Points are never owned by the crate, algorithms work on indices through the [metric::Distance] trait.

use lazy_static::lazy_static;

lazy_static! {
    static ref LOG: u64 = init_log();
}

// install a logger facility
fn init_log() -> u64 {
    let _res = env_logger::try_init();
    println!("\n ************** initializing logger *****************\n");
    1
}

pub mod coreset;
pub mod error;
pub mod kcenter;
pub mod merit;
pub mod metric;

pub use error::CoresetError;
