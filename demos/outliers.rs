//! Builds coresets of a synthetic dataset: gaussian blobs in dimension 5 plus uniformly scattered outliers.
//!
//! - an outlier coreset (Ding, Yu, Wang Algorithm 3) is built and checked to carry all the points weight.
//! - a k-center solution is obtained by the randomized greedy, its costs drive importance samplers (BFL16 and VX11)
//!   compared with uniform sampling on distortion.
//!
//! Run with : RUST_LOG=info cargo run --release --example outliers -- --nbpoints 50000 --k 10

use clap::{Arg, ArgAction, Command};
use std::time::{Duration, SystemTime};

use cpu_time::ProcessTime;
use ndarray::Array2;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;

use coresetkc::coreset::*;
use coresetkc::kcenter::*;
use coresetkc::merit::*;
use coresetkc::metric::*;

// nb_points points around k centers in [-100, 100]^dim, a fraction outlier_fraction of them scattered in [-1000, 1000]^dim
fn generate_data(nb_points: usize, k: usize, dim: usize, outlier_fraction: f64, seed: u64) -> Array2<f32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let box_centers = Uniform::<f32>::new(-100., 100.).unwrap();
    let scattered = Uniform::<f32>::new(-1000., 1000.).unwrap();
    let normal = Normal::<f32>::new(0., 3.).unwrap();
    let centers: Vec<Vec<f32>> = (0..k)
        .map(|_| (0..dim).map(|_| box_centers.sample(&mut rng)).collect())
        .collect();
    let nb_outliers = (outlier_fraction * nb_points as f64).ceil() as usize;
    let mut data = Array2::<f32>::zeros((nb_points, dim));
    for (i, mut row) in data.rows_mut().into_iter().enumerate() {
        if i < nb_outliers {
            row.iter_mut().for_each(|x| *x = scattered.sample(&mut rng));
        } else {
            let c = &centers[i % k];
            row.iter_mut()
                .enumerate()
                .for_each(|(j, x)| *x = c[j] + normal.sample(&mut rng));
        }
    }
    data
}

pub fn main() {
    //
    let _ = env_logger::builder().is_test(true).try_init();
    //
    let matches = Command::new("outliers")
        .arg(
            Arg::new("nbpoints")
                .long("nbpoints")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("20000")
                .help("number of points"),
        )
        .arg(
            Arg::new("k")
                .long("k")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("8")
                .help("number of clusters"),
        )
        .arg(
            Arg::new("gamma")
                .long("gamma")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .default_value("0.001")
                .help("fraction of outliers"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .required(false)
                .action(ArgAction::Set)
                .help("file to dump the outlier coreset in"),
        )
        .get_matches();
    let nb_points = *matches.get_one::<usize>("nbpoints").unwrap();
    let k = *matches.get_one::<usize>("k").unwrap();
    let gamma = *matches.get_one::<f64>("gamma").unwrap();
    //
    let data = MatrixData::new(generate_data(nb_points, k, 5, gamma, 4567), Norm::L2);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1517);
    //
    // outlier coreset
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    let mut params = OutlierCoresetParams::new(k);
    params.gamma = gamma;
    let (coreset, bicriteria) = match kcenter_coreset_outliers(&data, nb_points, &params, &mut rng) {
        Ok(res) => res,
        Err(e) => {
            log::error!("kcenter_coreset_outliers failed : {}", e);
            std::process::exit(1);
        }
    };
    let cpu_time: Duration = cpu_start.elapsed();
    println!(
        "outlier coreset sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().unwrap().as_millis(),
        cpu_time.as_millis()
    );
    println!(
        "outlier coreset size : {}, weight : {:.1}, nb centers : {}, outlier threshold : {:.3e}",
        coreset.len(),
        coreset.get_total_weight(),
        bicriteria.get_nb_centers(),
        bicriteria.get_outlier_threshold()
    );
    if let Some(fname) = matches.get_one::<String>("csv") {
        if let Err(e) = coreset.write_csv(fname) {
            log::error!("could not dump coreset : {:?}", e);
        }
    }
    //
    // importance sampling from a greedy solution
    //
    let centers = greedy_2approx_outliers(&data, nb_points, k, gamma, 0.1, &mut rng).unwrap();
    let provider = NearestCenter::new(&data, nb_points);
    let (costs, _) = provider.costs(&centers);
    let bfl = CoresetSampler::from_provider(&provider, &centers, None, 1, SensitivityScheme::BravermanFeldmanLang).unwrap();
    let vx = CoresetSampler::from_provider(&provider, &centers, None, 2, SensitivityScheme::VaradarajanXiao).unwrap();
    let uniform = UniformSampler::new(nb_points, 3).unwrap();
    // distortion against random center sets
    let random_centers = greedy_2approx_outliers(&data, nb_points, k, 0.5, 0.9, &mut rng).unwrap();
    let random_costs = point_costs(&data, nb_points, &random_centers);
    println!("#coreset_size\tBFL16 on solution\tVX11 on solution\tUniform on solution\tBFL16 on random\tUniform on random");
    for size in [100usize, 500, 1000, 5000] {
        let nb_iter = 10;
        let d_bfl = mean_distortion(&bfl, size, nb_iter, &costs, &mut rng).unwrap().mean;
        let d_vx = mean_distortion(&vx, size, nb_iter, &costs, &mut rng).unwrap().mean;
        let d_unif = mean_distortion(&uniform, size, nb_iter, &costs, &mut rng).unwrap().mean;
        let r_bfl = mean_distortion(&bfl, size, nb_iter, &random_costs, &mut rng).unwrap().mean;
        let r_unif = mean_distortion(&uniform, size, nb_iter, &random_costs, &mut rng).unwrap().mean;
        println!(
            "{}\t{:.3e}\t{:.3e}\t{:.3e}\t{:.3e}\t{:.3e}",
            size, d_bfl, d_vx, d_unif, r_bfl, r_unif
        );
    }
}
