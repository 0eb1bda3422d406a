//! Integrators that consume a Faure sequence and decide online when to stop.
//!
//! Two stopping rules are available, each with its own parameter struct implementing
//! [`Strategy`]:
//!
//! - [`Stability`] stops once the running mean changed by less than the requested precision for
//! a number of consecutive samples,
//! - [`Replicates`] evaluates several randomly shifted copies of the sequence and stops once they
//! agree within the requested precision.
//!
//! [`Config`] selects one of them at runtime, for instance from a JSON configuration.
pub mod replicates;
pub mod stability;

pub use replicates::Replicates;
pub use stability::Stability;

use crate::core::estimators::Estimators;
use crate::core::primes::next_prime;
use crate::core::{Domain, Estimate, Integrand};
use crate::error::{Error, Result};
use crate::sequences::faure::faure_generating_matrices;
use crate::sequences::DigitalSequence;

use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::debug;

/// Default number of points after which an integration gives up.
///
/// This is usually too small for the default precision $\epsilon = 10^{-8}$; for all but the
/// smoothest integrands either raise the budget with `with_max_calls` or request a larger
/// $\epsilon$.
pub const DEFAULT_MAX_CALLS: usize = 1 << 22;

/// The common contract of all integration strategies.
pub trait Strategy<T: Float> {
    /// Estimators the strategy reports together with the integral.
    type Estimators: Estimators<T>;

    /// Returns the digit depth $N$ of the generating matrices for a sequence in base `base`.
    fn digits(&self, base: u64) -> usize;

    /// Integrates `integrand` over `domain`. Returns [`Error::PrecisionUnmet`] if the sequence
    /// or the sample budget is exhausted before the stopping rule is satisfied, or as soon as the
    /// integrand returns a non-finite value.
    fn evaluate<I>(
        &self,
        integrand: &I,
        domain: &Domain<T>,
    ) -> Result<Estimate<T, Self::Estimators>>
    where
        I: Integrand<T> + ?Sized;
}

/// Integrates `integrand` over the hyper-rectangle given by `ranges` using `strategy` and returns
/// the estimate of the integral.
pub fn integrate<T, I, S>(integrand: &I, ranges: &[(T, T)], strategy: &S) -> Result<T>
where
    T: Float,
    I: Integrand<T> + ?Sized,
    S: Strategy<T>,
{
    let domain = Domain::new(ranges.to_vec())?;
    strategy
        .evaluate(integrand, &domain)
        .map(|estimate| estimate.value())
}

/// Returns $\mathrm{round}(-\ln \epsilon / \ln b)$, the number of base-`base` digits needed to
/// resolve `epsilon`, or zero if `epsilon` is not smaller than one.
pub fn digits_for_precision<T: Float>(epsilon: T, base: u64) -> u64 {
    let epsilon = epsilon.to_f64().unwrap_or(f64::NAN);
    let digits = (-epsilon.ln() / (base as f64).ln()).round();

    if digits.is_finite() && digits > 0.0 {
        digits as u64
    } else {
        0
    }
}

pub(crate) fn check_epsilon<T: Float>(epsilon: T) -> Result<()> {
    if epsilon.is_finite() && epsilon > T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(
            "epsilon must be positive and finite".to_string(),
        ))
    }
}

pub(crate) fn check_max_calls(max_calls: usize) -> Result<()> {
    if max_calls == 0 {
        Err(Error::InvalidParameter(
            "max_calls must be at least one".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Builds the Faure sequence for `dim` dimensions in the smallest prime base larger than `dim`
/// with the digit depth `strategy` asks for.
pub(crate) fn faure_sequence<T, S>(dim: usize, strategy: &S) -> Result<DigitalSequence<T>>
where
    T: Float + FromPrimitive,
    S: Strategy<T> + ?Sized,
{
    let base = next_prime(dim as u64);
    let digits = strategy.digits(base);
    let matrices = faure_generating_matrices(dim, digits, Some(base))?;
    let sequence = DigitalSequence::new(base, &matrices)?;

    debug!(
        dim,
        base,
        digits,
        bound = sequence.len_bound(),
        "constructed Faure sequence"
    );

    Ok(sequence)
}

/// Selects one of the integration strategies at runtime.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(
    tag = "strategy",
    rename_all = "snake_case",
    bound(deserialize = "T: Deserialize<'de> + Float + FromPrimitive")
)]
pub enum Config<T> {
    /// Stop when the running mean is stable, see [`Stability`].
    Stability(Stability<T>),
    /// Stop when randomly shifted replicates agree, see [`Replicates`].
    Replicates(Replicates<T>),
}

impl<T> Config<T>
where
    T: AddAssign + Float + FromPrimitive,
    Standard: Distribution<T>,
{
    /// Reads a configuration from JSON, for instance
    /// `{"strategy": "replicates", "epsilon": 1e-4, "robust_coeff": 5}`. Missing parameters take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(json).map_err(|err| Error::InvalidConfig(err.to_string()))
    }

    /// Integrates `integrand` over the hyper-rectangle given by `ranges` with the selected
    /// strategy.
    pub fn integrate<I>(&self, integrand: &I, ranges: &[(T, T)]) -> Result<T>
    where
        I: Integrand<T> + ?Sized,
    {
        match self {
            Self::Stability(stability) => integrate(integrand, ranges, stability),
            Self::Replicates(replicates) => integrate(integrand, ranges, replicates),
        }
    }
}

impl<T: Float + FromPrimitive> Default for Config<T> {
    fn default() -> Self {
        Self::Stability(Stability::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_from_precision() {
        // -ln(1e-8) / ln(2) = 26.58
        assert_eq!(digits_for_precision(1e-8, 2), 27);
        // -ln(1e-4) / ln(5) = 5.72
        assert_eq!(digits_for_precision(1e-4, 5), 6);
        assert_eq!(digits_for_precision(1e-8_f32, 3), 17);
        assert_eq!(digits_for_precision(1.0, 2), 0);
        assert_eq!(digits_for_precision(10.0, 2), 0);
    }

    #[test]
    fn parameter_checks() {
        assert!(check_epsilon(1e-3).is_ok());
        assert!(matches!(
            check_epsilon(0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            check_epsilon(-1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            check_epsilon(f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            check_max_calls(0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn config_from_json() {
        let config = Config::<f64>::from_json(r#"{"strategy": "stability", "limit": 5}"#).unwrap();
        assert_eq!(
            config,
            Config::Stability(Stability::default().with_limit(5))
        );

        let config =
            Config::<f64>::from_json(r#"{"strategy": "replicates", "epsilon": 1e-4}"#).unwrap();
        assert_eq!(
            config,
            Config::Replicates(Replicates::default().with_epsilon(1e-4))
        );

        assert!(matches!(
            Config::<f64>::from_json(r#"{"strategy": "vegas"}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_round_trip() {
        let config = Config::Replicates(Replicates::new(1e-3, 4).with_seed(7));
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(Config::<f64>::from_json(&json).unwrap(), config);
    }

    #[test]
    fn config_integrates_constant() {
        let config = Config::<f64>::default();
        let result = config.integrate(&|_: &[f64]| 3.0, &[(0.0, 1.0), (0.0, 1.0)]);

        assert_eq!(result, Ok(3.0));
    }
}
