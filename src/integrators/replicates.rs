//! Integration with randomly shifted replicates of the sequence.
//!
//! Each replicate adds its own random vector $\Delta \in [0,1)^s$ to every point of the sequence
//! modulo one (a toroidal shift). The shifted sequences keep their low discrepancy but are
//! statistically independent, so their spread estimates the integration error, see
//!
//! - B. Tuffin, *Randomization of Quasi-Monte Carlo Methods for Error Estimation: Survey and
//! Normal Approximation*, Monte Carlo Methods and Applications 10 (2004) 617–628.
use super::{check_epsilon, check_max_calls, digits_for_precision, faure_sequence};
use super::{Strategy, DEFAULT_MAX_CALLS};
use crate::core::estimators::*;
use crate::core::{Domain, Estimate, Integrand};
use crate::error::{Error, Result};

use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::{debug, trace, warn};

/// Seed of the random shifts if none is given.
pub const DEFAULT_SEED: u64 = 0xcafe_f00d_d15e_a5e5;

/// Parameters of the randomized-replicate strategy.
///
/// The sequence is evaluated with `robust_coeff` independent toroidal shifts. After $n > 2$
/// points the population standard deviation $\sigma_S$ of the replicate sums $S_i$ is compared
/// with $(n-1)\,\epsilon / V$, where $V$ is the volume of the integration domain. Once
/// $\sigma_S$ is smaller the integral $V \sum_i S_i / (k n)$ is returned, with $k$ the number of
/// replicates.
///
/// The digit depth is $2\,\mathrm{round}(-\ln\epsilon / \ln b)$.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Replicates<T> {
    epsilon: T,
    robust_coeff: usize,
    seed: u64,
    max_calls: usize,
}

impl<T: Float + FromPrimitive> Default for Replicates<T> {
    fn default() -> Self {
        Self {
            epsilon: T::from_f64(1e-8).unwrap_or_else(T::epsilon),
            robust_coeff: 3,
            seed: DEFAULT_SEED,
            max_calls: DEFAULT_MAX_CALLS,
        }
    }
}

impl<T: Float + FromPrimitive> Replicates<T> {
    /// Constructor.
    pub fn new(epsilon: T, robust_coeff: usize) -> Self {
        Self {
            epsilon,
            robust_coeff,
            ..Self::default()
        }
    }

    /// Sets the requested absolute precision.
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the number of randomized replicates.
    pub fn with_robust_coeff(mut self, robust_coeff: usize) -> Self {
        self.robust_coeff = robust_coeff;
        self
    }

    /// Sets the seed of the generator drawing the random shifts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximum number of points; each point is evaluated once per replicate.
    pub fn with_max_calls(mut self, max_calls: usize) -> Self {
        self.max_calls = max_calls;
        self
    }

    /// Returns the requested absolute precision.
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Returns the number of randomized replicates.
    pub fn robust_coeff(&self) -> usize {
        self.robust_coeff
    }

    /// Returns the seed of the generator drawing the random shifts.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the maximum number of points.
    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    fn check(&self) -> Result<()> {
        check_epsilon(self.epsilon)?;
        check_max_calls(self.max_calls)?;

        if self.robust_coeff < 2 {
            return Err(Error::InvalidParameter(
                "robust_coeff must be at least two".to_string(),
            ));
        }

        Ok(())
    }
}

impl<T> Replicates<T>
where
    T: AddAssign + Float + FromPrimitive,
    Standard: Distribution<T>,
{
    /// Like [`Strategy::evaluate`], but draws the random shifts from `rng` instead of a generator
    /// seeded with [`Replicates::seed`].
    pub fn evaluate_with_rng<I, R>(
        &self,
        integrand: &I,
        domain: &Domain<T>,
        rng: &mut R,
    ) -> Result<Estimate<T, ReplicateEstimators<T>>>
    where
        I: Integrand<T> + ?Sized,
        R: Rng,
    {
        self.check()?;

        let mut sequence = faure_sequence::<T, _>(domain.dim(), self)?;
        let (base, digits) = (sequence.base(), sequence.digits());
        let volume = domain.volume();
        let target = self.epsilon / volume;

        let shifts = (0..self.robust_coeff)
            .map(|_| (0..domain.dim()).map(|_| rng.gen()).collect())
            .collect::<Vec<Vec<T>>>();

        let one = T::one();
        let mut shifted = vec![T::zero(); domain.dim()];
        let mut x = vec![T::zero(); domain.dim()];
        let mut estimators = ReplicateEstimators::new(self.robust_coeff);
        let mut points = 0;

        while points < self.max_calls {
            let point = match sequence.next_point() {
                Some(point) => point,
                None => break,
            };

            for (shift, replicate) in shifts.iter().zip(estimators.replicates_mut()) {
                for ((s, &p), &delta) in shifted.iter_mut().zip(point).zip(shift) {
                    let y = p + delta;
                    *s = if y < one { y } else { y - one };
                }

                domain.map_into(&shifted, &mut x);
                replicate.update(integrand.call(&x));
            }

            points += 1;

            if estimators.non_finite_calls() > 0 {
                warn!(
                    points,
                    calls = estimators.calls(),
                    "integrand returned a non-finite value"
                );

                return Err(Error::PrecisionUnmet {
                    calls: estimators.calls(),
                });
            }

            let spread = estimators.spread();
            trace!(points, spread = ?spread.to_f64(), "evaluated point");

            if points > 2 && spread < target * from_usize(points - 1) {
                debug!(points, calls = estimators.calls(), "replicates agree");
                let value = estimators.mean() * volume;
                return Ok(Estimate::new(value, base, digits, estimators));
            }
        }

        warn!(
            points,
            bound = sequence.len_bound(),
            "replicates did not agree"
        );

        Err(Error::PrecisionUnmet {
            calls: estimators.calls(),
        })
    }
}

impl<T> Strategy<T> for Replicates<T>
where
    T: AddAssign + Float + FromPrimitive,
    Standard: Distribution<T>,
{
    type Estimators = ReplicateEstimators<T>;

    fn digits(&self, base: u64) -> usize {
        (digits_for_precision(self.epsilon, base) * 2).max(1) as usize
    }

    fn evaluate<I>(
        &self,
        integrand: &I,
        domain: &Domain<T>,
    ) -> Result<Estimate<T, Self::Estimators>>
    where
        I: Integrand<T> + ?Sized,
    {
        let mut rng = Pcg64::seed_from_u64(self.seed);
        self.evaluate_with_rng(integrand, domain, &mut rng)
    }
}
