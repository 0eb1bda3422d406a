//! The core module
pub mod estimators;
pub mod matrix;
pub mod primes;

use crate::core::estimators::Estimators;
use crate::error::{Error, Result};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Integrand trait
///
/// This is implemented for every closure `Fn(&[T]) -> T`, so usually there is no need to
/// implement it by hand.
pub trait Integrand<T> {
    /// Calls the integrand with a point `x` of the integration domain.
    fn call(&self, x: &[T]) -> T;
}

impl<T, F> Integrand<T> for F
where
    F: Fn(&[T]) -> T,
{
    fn call(&self, x: &[T]) -> T {
        self(x)
    }
}

/// An axis-aligned hyper-rectangle, given by a `(low, high)` pair for each dimension.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Domain<T> {
    ranges: Vec<(T, T)>,
}

impl<T: Float> Domain<T> {
    /// Constructs a domain from `ranges`. There must be at least one range and each must satisfy
    /// `low < high` with finite boundaries.
    pub fn new(ranges: Vec<(T, T)>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::InvalidDimension(
                "at least one integration range is required".to_string(),
            ));
        }

        for (index, &(low, high)) in ranges.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(Error::InvalidDimension(format!(
                    "range {} must have finite boundaries with low < high",
                    index
                )));
            }
        }

        Ok(Self { ranges })
    }

    /// The unit hypercube of dimension `dim`.
    pub fn unit(dim: usize) -> Result<Self> {
        Self::new(vec![(T::zero(), T::one()); dim])
    }

    /// Returns the number of dimensions.
    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    /// Returns the ranges of all dimensions.
    pub fn ranges(&self) -> &[(T, T)] {
        &self.ranges
    }

    /// Returns the volume, $\prod_i (h_i - l_i)$.
    pub fn volume(&self) -> T {
        self.ranges
            .iter()
            .fold(T::one(), |volume, &(low, high)| volume * (high - low))
    }

    /// Maps the point `x` of the unit hypercube affinely into this domain, writing the result to
    /// `out`.
    pub fn map_into(&self, x: &[T], out: &mut [T]) {
        debug_assert_eq!(x.len(), self.dim());
        debug_assert_eq!(out.len(), self.dim());

        for ((o, &x), &(low, high)) in out.iter_mut().zip(x).zip(&self.ranges) {
            *o = x * (high - low) + low;
        }
    }
}

/// The result of a successful integration together with the estimators it was derived from.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Estimate<T, E> {
    value: T,
    base: u64,
    digits: usize,
    estimators: E,
}

impl<T, E> Estimate<T, E>
where
    T: Float,
    E: Estimators<T>,
{
    /// Constructor
    pub(crate) fn new(value: T, base: u64, digits: usize, estimators: E) -> Self {
        Self {
            value,
            base,
            digits,
            estimators,
        }
    }

    /// Returns the estimated value of the integral.
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the base of the digital sequence that was used.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Returns the digit depth $N$ of the generating matrices.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Returns the estimators of the unit-hypercube integrand.
    pub fn estimators(&self) -> &E {
        &self.estimators
    }

    /// Destructure the estimate and return its value and estimators.
    pub fn destructure(self) -> (T, E) {
        (self.value, self.estimators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn volume_and_mapping() {
        let domain = Domain::new(vec![(0.0, 2.0), (-1.0, 1.0), (0.5, 2.0)]).unwrap();

        assert_eq!(domain.dim(), 3);
        assert_approx_eq!(domain.volume(), 6.0);

        let mut out = vec![0.0; 3];
        domain.map_into(&[0.5, 0.25, 0.0], &mut out);
        assert_eq!(out, vec![1.0, -0.5, 0.5]);
    }

    #[test]
    fn invalid_domains() {
        assert!(matches!(
            Domain::<f64>::new(vec![]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Domain::new(vec![(0.0, 1.0), (1.0, 1.0)]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Domain::new(vec![(2.0, 1.0)]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Domain::new(vec![(0.0, f64::INFINITY)]),
            Err(Error::InvalidDimension(_))
        ));
    }

    #[test]
    fn closures_are_integrands() {
        let f = |x: &[f64]| x[0] * x[1];
        assert_eq!(Integrand::<f64>::call(&f, &[2.0, 3.0]), 6.0);
    }
}
