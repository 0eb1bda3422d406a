//! Integration that stops once the running mean is stable.
use super::{check_epsilon, check_max_calls, digits_for_precision, faure_sequence};
use super::{Strategy, DEFAULT_MAX_CALLS};
use crate::core::estimators::*;
use crate::core::primes::next_prime;
use crate::core::{Domain, Estimate, Integrand};
use crate::error::{Error, Result};

use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::{debug, warn};

/// Parameters of the stability-counter strategy.
///
/// After every sample the running mean $\bar{f}_n$ is compared with the previous one. If
/// $|\bar{f}_n - \bar{f}_{n-1}| V < \epsilon$, where $V$ is the volume of the integration domain,
/// a counter is increased, otherwise it is reset. Once the counter reaches `limit` the integral
/// $\bar{f}_n V$ is returned.
///
/// The digit depth is the smallest prime larger than $\mathrm{round}(-\ln\epsilon / \ln b)$.
/// This criterion is cheap, but a slowly drifting mean can satisfy it early.
///
/// The default precision $\epsilon = 10^{-8}$ is rarely reached within the default budget of
/// [`DEFAULT_MAX_CALLS`] samples; `Stability::default()` on $x^3$ over $[0,2]$ for instance ends
/// in [`Error::PrecisionUnmet`]. Raise the budget with [`Stability::with_max_calls`] or request a
/// larger $\epsilon$.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Stability<T> {
    epsilon: T,
    limit: usize,
    max_calls: usize,
}

impl<T: Float + FromPrimitive> Default for Stability<T> {
    fn default() -> Self {
        Self {
            epsilon: T::from_f64(1e-8).unwrap_or_else(T::epsilon),
            limit: 10,
            max_calls: DEFAULT_MAX_CALLS,
        }
    }
}

impl<T: Float + FromPrimitive> Stability<T> {
    /// Constructor.
    pub fn new(epsilon: T, limit: usize) -> Self {
        Self {
            epsilon,
            limit,
            max_calls: DEFAULT_MAX_CALLS,
        }
    }

    /// Sets the requested absolute precision.
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the number of consecutive stable samples required.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the maximum number of samples.
    pub fn with_max_calls(mut self, max_calls: usize) -> Self {
        self.max_calls = max_calls;
        self
    }

    /// Returns the requested absolute precision.
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Returns the number of consecutive stable samples required.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the maximum number of samples.
    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    fn check(&self) -> Result<()> {
        check_epsilon(self.epsilon)?;
        check_max_calls(self.max_calls)?;

        if self.limit == 0 {
            return Err(Error::InvalidParameter(
                "limit must be at least one".to_string(),
            ));
        }

        Ok(())
    }
}

impl<T> Strategy<T> for Stability<T>
where
    T: AddAssign + Float + FromPrimitive,
{
    type Estimators = RunningEstimators<T>;

    fn digits(&self, base: u64) -> usize {
        next_prime(digits_for_precision(self.epsilon, base)) as usize
    }

    fn evaluate<I>(
        &self,
        integrand: &I,
        domain: &Domain<T>,
    ) -> Result<Estimate<T, Self::Estimators>>
    where
        I: Integrand<T> + ?Sized,
    {
        self.check()?;

        let mut sequence = faure_sequence::<T, _>(domain.dim(), self)?;
        let (base, digits) = (sequence.base(), sequence.digits());
        let volume = domain.volume();

        let mut x = vec![T::zero(); domain.dim()];
        let mut estimators = RunningEstimators::default();
        let mut previous: Option<T> = None;
        let mut stable = 0;

        while estimators.calls() < self.max_calls {
            let point = match sequence.next_point() {
                Some(point) => point,
                None => break,
            };

            domain.map_into(point, &mut x);
            let value = integrand.call(&x);
            estimators.update(value);

            // the running mean is meaningless from here on
            if !value.is_finite() {
                warn!(
                    index = sequence.index(),
                    calls = estimators.calls(),
                    "integrand returned a non-finite value"
                );

                return Err(Error::PrecisionUnmet {
                    calls: estimators.calls(),
                });
            }

            let mean = estimators.mean();

            if previous.map_or(false, |p| (mean - p).abs() * volume < self.epsilon) {
                stable += 1;

                if stable >= self.limit {
                    debug!(calls = estimators.calls(), "running mean is stable");
                    return Ok(Estimate::new(mean * volume, base, digits, estimators));
                }
            } else {
                stable = 0;
            }

            previous = Some(mean);
        }

        warn!(
            calls = estimators.calls(),
            bound = sequence.len_bound(),
            "running mean did not stabilize"
        );

        Err(Error::PrecisionUnmet {
            calls: estimators.calls(),
        })
    }
}
