//! This module contains everything related to estimators.
use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Basic estimators, like the mean, variance, and the standard deviation.
pub trait BasicEstimators<T: Float> {
    /// Returns the mean value.
    fn mean(&self) -> T;

    /// Returns the variance, $V$.
    fn var(&self) -> T;

    /// Returns the standard deviation, $\sigma = \sqrt{V}$.
    fn std(&self) -> T {
        self.var().sqrt()
    }
}

/// More estimators.
pub trait Estimators<T: Float>: BasicEstimators<T> {
    /// Returns the number of times $N$, the integrand has been called.
    fn calls(&self) -> usize;

    /// Returns the number of times, $N_\mathrm{nf}$, the integrand has been called
    /// and its return value was non-finite.
    fn non_finite_calls(&self) -> usize;

    /// Returns the number of times, $N_\mathrm{nz}$, the integrand has been called
    /// and its return value was non-zero.
    fn non_zero_calls(&self) -> usize;
}

/// Everything that needs to be updated.
pub trait Updateable<T> {
    /// Update this estimator with `value`.
    fn update(&mut self, value: T);
}

pub(crate) fn from_usize<T: Float + FromPrimitive>(n: usize) -> T {
    // every `usize` is representable as a (possibly rounded) float
    T::from_usize(n).unwrap_or_else(T::max_value)
}

/// Running sums of integrand values. Non-finite values are counted but contribute zero; the
/// integrators stop at the first one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RunningEstimators<T> {
    sum: T,
    sumsq: T,
    calls: usize,
    non_finite_calls: usize,
    non_zero_calls: usize,
}

impl<T: Float> Default for RunningEstimators<T> {
    fn default() -> Self {
        Self {
            sum: T::zero(),
            sumsq: T::zero(),
            calls: 0,
            non_finite_calls: 0,
            non_zero_calls: 0,
        }
    }
}

impl<T: Float> RunningEstimators<T> {
    /// Returns the sum of all finite integrand values.
    pub fn sum(&self) -> T {
        self.sum
    }
}

impl<T> BasicEstimators<T> for RunningEstimators<T>
where
    T: Float + FromPrimitive,
{
    fn mean(&self) -> T {
        if self.calls == 0 {
            return T::zero();
        }

        self.sum / from_usize(self.calls)
    }

    /// The variance of the mean as a plain Monte Carlo estimator would report it. For
    /// low-discrepancy points this overestimates the actual error.
    fn var(&self) -> T {
        if self.calls < 2 {
            return T::infinity();
        }

        let calls: T = from_usize(self.calls);
        (self.sumsq - self.sum * self.sum / calls) / calls / (calls - T::one())
    }
}

impl<T> Estimators<T> for RunningEstimators<T>
where
    T: Float + FromPrimitive,
{
    fn calls(&self) -> usize {
        self.calls
    }

    fn non_finite_calls(&self) -> usize {
        self.non_finite_calls
    }

    fn non_zero_calls(&self) -> usize {
        self.non_zero_calls
    }
}

impl<T> Updateable<T> for RunningEstimators<T>
where
    T: AddAssign + Float,
{
    fn update(&mut self, value: T) {
        self.calls += 1;

        if value != T::zero() {
            if value.is_finite() {
                self.sum += value;
                self.sumsq += value * value;
            } else {
                self.non_finite_calls += 1;
            }

            self.non_zero_calls += 1;
        }
    }
}

/// Estimators of independently randomized replicates of the same sequence.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ReplicateEstimators<T> {
    replicates: Vec<RunningEstimators<T>>,
}

impl<T: Float> ReplicateEstimators<T> {
    /// Creates `count` empty replicates.
    pub fn new(count: usize) -> Self {
        Self {
            replicates: vec![RunningEstimators::default(); count],
        }
    }

    /// Returns the estimators of every replicate.
    pub fn replicates(&self) -> &[RunningEstimators<T>] {
        &self.replicates
    }

    /// Returns the estimators of every replicate, for updating.
    pub fn replicates_mut(&mut self) -> &mut [RunningEstimators<T>] {
        &mut self.replicates
    }
}

impl<T: Float + FromPrimitive> ReplicateEstimators<T> {
    /// Returns the standard deviation of the replicate sums, normalized by the number of
    /// replicates (population standard deviation).
    pub fn spread(&self) -> T {
        let count: T = from_usize(self.replicates.len());
        let mean = self
            .replicates
            .iter()
            .fold(T::zero(), |acc, r| acc + r.sum())
            / count;

        let var = self
            .replicates
            .iter()
            .map(|r| (r.sum() - mean).powi(2))
            .fold(T::zero(), |acc, x| acc + x)
            / count;

        var.sqrt()
    }
}

impl<T> BasicEstimators<T> for ReplicateEstimators<T>
where
    T: Float + FromPrimitive,
{
    /// Mean over all replicates.
    fn mean(&self) -> T {
        let count: T = from_usize(self.replicates.len());

        self.replicates
            .iter()
            .fold(T::zero(), |acc, r| acc + r.mean())
            / count
    }

    /// Variance of the mean computed from the scatter of the replicate means.
    fn var(&self) -> T {
        if self.replicates.len() < 2 {
            return T::infinity();
        }

        let count: T = from_usize(self.replicates.len());
        let mean = self.mean();

        self.replicates
            .iter()
            .map(|r| (r.mean() - mean).powi(2))
            .fold(T::zero(), |acc, x| acc + x)
            / (count - T::one())
            / count
    }
}

impl<T> Estimators<T> for ReplicateEstimators<T>
where
    T: Float + FromPrimitive,
{
    fn calls(&self) -> usize {
        self.replicates.iter().map(|r| r.calls()).sum()
    }

    fn non_finite_calls(&self) -> usize {
        self.replicates.iter().map(|r| r.non_finite_calls()).sum()
    }

    fn non_zero_calls(&self) -> usize {
        self.replicates.iter().map(|r| r.non_zero_calls()).sum()
    }
}
