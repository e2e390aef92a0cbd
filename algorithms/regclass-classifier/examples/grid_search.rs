use ndarray::array;
use rand::{rngs::SmallRng, SeedableRng};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use regclass::prelude::*;
use regclass_classifier::GridSearchParams;
use regclass_linear::{LinearError, Ridge};

fn main() -> std::result::Result<(), LinearError> {
    // set `RUST_LOG=debug` to follow the per-class fits and candidate scores
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // four overlapping blobs in three dimensions
    let mut rng = SmallRng::seed_from_u64(42);
    let centroids = array![[0., 0., 0.], [2., 2., 0.], [0., 2., 2.], [2., 0., 2.]];
    let (train, valid) = regclass_datasets::generate::labelled_blobs(50, &centroids, &mut rng)
        .shuffle(&mut rng)
        .split_with_ratio(0.67);

    // penalties scaled with the number of features
    let k = train.nfeatures() as f64;
    let candidates = vec![
        Ridge::params().penalty(1.0 / (k * k)),
        Ridge::params().penalty(1.0 / k),
        Ridge::params().penalty(k.sqrt()),
        Ridge::params().penalty(k),
    ];

    let result = GridSearchParams::new(candidates).folds(5).fit(&train)?;

    println!("*** Fit Summary ***");
    println!("Best k-fold score: {}", result.best_score());
    println!(
        "Test score: {}",
        result.classifier().score(valid.records(), valid.targets())?
    );
    println!("Best hyper-parameters: {:?}", result.best_estimator());

    Ok(())
}
