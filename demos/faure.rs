use qmcintir::integrators::Strategy;
use qmcintir::{BasicEstimators, Domain, Estimators, Replicates, Stability};
use tracing_subscriber::EnvFilter;

/// The integrand is sin(1/x * 2/y * 3/z)
fn oscillating(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, x)| (i + 1) as f64 / x)
        .product::<f64>()
        .sin()
}

fn main() {
    // show what the integrators do with `RUST_LOG=qmcintir=debug`
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let domain = Domain::new(vec![(0.5, 2.0); 3]).unwrap();

    match Stability::new(1e-4, 10).evaluate(&oscillating, &domain) {
        Ok(estimate) => println!(
            "stability:  {} (N={}, base {}, {} digits)",
            estimate.value(),
            estimate.estimators().calls(),
            estimate.base(),
            estimate.digits()
        ),
        Err(err) => println!("stability:  {}", err),
    }

    match Replicates::new(1e-4, 3).evaluate(&oscillating, &domain) {
        Ok(estimate) => println!(
            "replicates: {} \u{b1} {} (N={}, base {}, {} digits)",
            estimate.value(),
            estimate.estimators().std() * domain.volume(),
            estimate.estimators().calls(),
            estimate.base(),
            estimate.digits()
        ),
        Err(err) => println!("replicates: {}", err),
    }
}
