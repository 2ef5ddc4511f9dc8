#[macro_use]
extern crate log;

use std::{error::Error, time::Instant};

use dialoguer::{theme::ColorfulTheme, Select};
use lin_reg::fit_line;
use nanorand::{Rng, WyRand};
use rls::{LinearMapper, Params, Rls, ScalarAlgebra, TupleAlgebra};
use rls_plot::{plot_fit, FitGather};

const NUM_SAMPLES: usize = 100;
const SEED: u64 = 0;
const X_RANGE: f64 = 20.0;
const NOISE: f64 = 0.3;
const SLOPE: f64 = 7.0;
const INTERCEPT: f64 = 3.0;

pub(crate) fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let scenarios = vec!["line (slope + bias)", "FIR system (2 scalar taps)"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select scenario")
        .items(&scenarios)
        .default(0)
        .interact()?;
    match e {
        0 => run_line(),
        1 => run_fir(),
        _ => panic!("invalid scenario selection"),
    }
}

/// Learns `y = SLOPE * x + INTERCEPT` from noisy samples and compares with the batch fit
fn run_line() -> Result<(), Box<dyn Error>> {
    let mut rng = WyRand::new_seed(SEED);
    let params = Params {
        tap_count: 1,
        lambda: 0.1,
        delta: 400.0,
    };
    let mut rls = Rls::new(params, TupleAlgebra::default())?;

    let mut xs = Vec::with_capacity(NUM_SAMPLES);
    let mut ys = Vec::with_capacity(NUM_SAMPLES);
    let t0 = Instant::now();
    for i in 0..NUM_SAMPLES {
        let x = rng.generate::<f64>() * X_RANGE;
        let noise = (rng.generate::<f64>() * 2.0 - 1.0) * NOISE;
        let y = SLOPE * x + INTERCEPT + noise;
        rls.update(x, y)?;
        if i % 10 == 0 {
            debug!("sample {}: ({:.3}, {:.3}), weights: {:?}", i, x, y, rls.weights());
        }
        xs.push(x);
        ys.push(y);
    }
    info!("{} updates took {}us", NUM_SAMPLES, t0.elapsed().as_micros());

    let batch = fit_line(&xs, &ys, 0.0)?;
    info!("rls weights: {:?}", rls.weights());
    info!("batch fit: {:?}", batch);

    for x in [0.0, 4.0, 10.0, X_RANGE] {
        let truth = SLOPE * x + INTERCEPT;
        info!(
            "x: {:>6.2}, truth: {:>8.3}, map_x_to_y: {:>8.3}, batch: {:>8.3}, map_y_to_x(truth): {:>6.3}",
            x,
            truth,
            rls.map_x_to_y(x)?,
            batch.y(x),
            rls.map_y_to_x(truth)?,
        );
    }

    let mut gather = FitGather::default();
    xs.iter().zip(ys.iter()).for_each(|(x, y)| gather.push_sample(*x, *y));
    for x in [0.0, X_RANGE] {
        gather.push_online(x, rls.map_x_to_y(x)?);
        gather.push_batch(x, batch.y(x));
    }
    std::fs::create_dir_all("img")?;
    plot_fit(&gather, "img/noisy_line.png", (1080, 1080))?;

    Ok(())
}

/// Identifies `y[t] = 2 x[t] - 0.5 x[t - 1]` with two scalar taps
fn run_fir() -> Result<(), Box<dyn Error>> {
    let mut rng = WyRand::new_seed(SEED);
    let params = Params {
        tap_count: 2,
        lambda: 0.99,
        delta: 1e-3,
    };
    let mut rls = Rls::new(params, ScalarAlgebra)?;

    let mut prev = 0.0;
    for i in 0..NUM_SAMPLES {
        let x = (0.7 * i as f64).sin() + 0.5 * (1.9 * i as f64).cos();
        let noise = (rng.generate::<f64>() * 2.0 - 1.0) * NOISE * 0.1;
        rls.update(x, 2.0 * x - 0.5 * prev + noise)?;
        prev = x;
    }
    info!("rls weights: {:?}, phase: {:?}", rls.weights(), rls.phase());
    info!("map_x_to_y(1.0): {:.4}, expected: {:.4}", rls.map_x_to_y(1.0)?, 2.0 - 0.5 * prev);

    match rls.map_y_to_x(1.0) {
        Ok(x) => info!("map_y_to_x(1.0): {}", x),
        Err(e) => warn!("{}", e),
    }

    Ok(())
}
