//! Digital sequences and the generating matrices they are built from.
//!
//! For an index $h = \sum_k \eta_k b^k$ with digits $\eta_k \in \{0, \ldots, b-1\}$ the $i$-th
//! coordinate of the $h$-th point of a digital sequence with generating matrices $C_i$ is
//!
//! $$ x_i = \sum_{j=0}^{N-1} \xi_j b^{-j-1}, \qquad \xi = C_i \eta \bmod b . $$
pub mod faure;

use crate::core::matrix::{check_base, Matrix};
use crate::error::{Error, Result};
use num_traits::{Float, FromPrimitive};
use std::convert::TryFrom;

/// A lazy, infinite digital sequence, bounded only by the number of distinct digit vectors,
/// $b^N - 1$.
///
/// Points are produced for the indices $h = 1, 2, \ldots$; the origin ($h = 0$) is never
/// produced. The sequence can not be rewound or advanced other than by one step, a new sequence
/// starts again at $h = 1$.
#[derive(Clone, Debug)]
pub struct DigitalSequence<T> {
    base: u64,
    digits: usize,
    // row `k` of each matrix is column `k` of the corresponding generating matrix
    columns: Vec<Matrix>,
    weights: Vec<T>,
    index: u64,
    bound: u64,
    eta: Vec<u64>,
    xi: Vec<Vec<u64>>,
    point: Vec<T>,
}

impl<T: Float + FromPrimitive> DigitalSequence<T> {
    /// Constructs the digital sequence in base `base` generated by `matrices`, one matrix per
    /// dimension. All matrices must have the same size and entries smaller than `base`.
    pub fn new(base: u64, matrices: &[Matrix]) -> Result<Self> {
        check_base(base)?;

        let digits = matrices.first().map_or(0, Matrix::size);

        if digits == 0 {
            return Err(Error::InvalidDimension(
                "a sequence needs at least one non-empty generating matrix".to_string(),
            ));
        }

        if matrices.iter().any(|m| m.size() != digits) {
            return Err(Error::InvalidDimension(
                "all generating matrices must have the same size".to_string(),
            ));
        }

        if matrices.iter().any(|m| m.max_entry().map_or(false, |e| e >= base)) {
            return Err(Error::InvalidBase { base });
        }

        // the base and its largest digit must be representable
        let base_t = T::from_u64(base).ok_or(Error::NumericOverflow { base })?;
        T::from_u64(base - 1).ok_or(Error::NumericOverflow { base })?;
        let mut weights = Vec::with_capacity(digits);
        let mut weight = T::one();

        for _ in 0..digits {
            weight = weight / base_t;
            weights.push(weight);
        }

        // b^N - 1, or the largest index representable if b^N does not fit
        let bound = u32::try_from(digits)
            .ok()
            .and_then(|n| base.checked_pow(n))
            .map_or(u64::MAX, |p| p - 1);

        Ok(Self {
            base,
            digits,
            columns: matrices.iter().map(Matrix::transpose).collect(),
            weights,
            index: 0,
            bound,
            eta: vec![0; digits],
            xi: vec![vec![0; digits]; matrices.len()],
            point: vec![T::zero(); matrices.len()],
        })
    }

    /// Returns the base of this sequence.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Returns the number of dimensions of each point.
    pub fn dim(&self) -> usize {
        self.point.len()
    }

    /// Returns the digit depth $N$, the size of the generating matrices.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Returns the index $h$ of the last point produced, or zero if no point was produced yet.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the number of points this sequence produces before it is exhausted.
    pub fn len_bound(&self) -> u64 {
        self.bound
    }

    /// Advances the sequence and returns the next point, or `None` if the sequence is exhausted.
    /// The returned slice is overwritten by the next call.
    pub fn next_point(&mut self) -> Option<&[T]> {
        if self.index >= self.bound {
            return None;
        }

        self.index += 1;

        // Adding one to `h` changes the digits of the carry chain, each of them by +1 modulo the
        // base (a digit wrapping from b-1 to 0 is also +1). Since `xi` is linear in `eta`, every
        // changed digit `k` adds column `k` of the generating matrix to `xi`.
        for k in 0..self.digits {
            let digit = self.eta[k] + 1;
            let carry = digit == self.base;
            self.eta[k] = if carry { 0 } else { digit };

            for (xi, columns) in self.xi.iter_mut().zip(&self.columns) {
                for (x, &c) in xi.iter_mut().zip(columns.row(k)) {
                    *x = (*x + c) % self.base;
                }
            }

            if !carry {
                break;
            }
        }

        let one = T::one();

        for (p, xi) in self.point.iter_mut().zip(&self.xi) {
            // sum the smallest contributions first
            let value = xi
                .iter()
                .zip(&self.weights)
                .rev()
                .fold(T::zero(), |acc, (&x, &w)| {
                    // `new` checked that every digit converts
                    acc + T::from_u64(x).unwrap_or_else(T::zero) * w
                });

            // the exact value is at most 1 - b^-N, which may round up to one
            *p = if value < one { value } else { one - T::epsilon() };
        }

        Some(&self.point)
    }
}

impl<T: Float + FromPrimitive> Iterator for DigitalSequence<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_point().map(<[T]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.bound - self.index).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::faure::faure_generating_matrices;
    use super::*;
    use crate::core::matrix::MAX_BASE;
    use assert_approx_eq::assert_approx_eq;

    /// Computes the point with index `h` from scratch.
    fn direct_point(base: u64, matrices: &[Matrix], mut h: u64) -> Vec<f64> {
        let n = matrices[0].size();
        let mut eta = vec![0; n];

        for digit in eta.iter_mut() {
            *digit = h % base;
            h /= base;
        }

        matrices
            .iter()
            .map(|c| {
                (0..n)
                    .map(|j| {
                        let xi = (0..n).fold(0, |acc, k| (acc + c.get(j, k) * eta[k]) % base);
                        xi as f64 * (base as f64).powi(-(j as i32) - 1)
                    })
                    .sum::<f64>()
            })
            .collect()
    }

    #[test]
    fn van_der_corput_in_base_two() {
        let matrices = vec![Matrix::identity(4)];
        let points = DigitalSequence::<f64>::new(2, &matrices)
            .unwrap()
            .map(|p| p[0])
            .collect::<Vec<_>>();

        assert_eq!(points.len(), 15);
        assert_eq!(
            &points[..7],
            &[0.5, 0.25, 0.75, 0.125, 0.625, 0.375, 0.875]
        );
    }

    #[test]
    fn faure_points_in_base_three() {
        // 2-D Faure sequence in base 3: the second coordinate uses the transposed Pascal matrix
        let matrices = faure_generating_matrices(2, 3, None).unwrap();
        let mut sequence = DigitalSequence::<f64>::new(3, &matrices).unwrap();

        let expected = [
            (1.0 / 3.0, 1.0 / 3.0),
            (2.0 / 3.0, 2.0 / 3.0),
            (1.0 / 9.0, 4.0 / 9.0),
            (4.0 / 9.0, 7.0 / 9.0),
        ];

        for &(x, y) in &expected {
            let point = sequence.next_point().unwrap();
            assert_approx_eq!(point[0], x);
            assert_approx_eq!(point[1], y);
        }
    }

    #[test]
    fn incremental_update_matches_direct_computation() {
        let base = 5;
        let matrices = faure_generating_matrices(4, 4, None).unwrap();
        let mut sequence = DigitalSequence::<f64>::new(base, &matrices).unwrap();

        for h in 1..base.pow(4) {
            let point = sequence.next_point().unwrap().to_vec();
            assert_eq!(sequence.index(), h);

            for (&x, y) in point.iter().zip(direct_point(base, &matrices, h)) {
                assert_approx_eq!(x, y, 1e-15);
            }
        }

        assert!(sequence.next_point().is_none());
    }

    #[test]
    fn points_lie_in_unit_cube() {
        let matrices = faure_generating_matrices(6, 5, None).unwrap();
        let sequence = DigitalSequence::<f64>::new(7, &matrices).unwrap();

        for point in sequence.take(5_000) {
            assert_eq!(point.len(), 6);
            assert!(point.iter().all(|&x| (0.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn sequences_are_deterministic() {
        let matrices = faure_generating_matrices(3, 7, None).unwrap();
        let a = DigitalSequence::<f64>::new(5, &matrices).unwrap();
        let b = DigitalSequence::<f64>::new(5, &matrices).unwrap();

        assert!(a.zip(b).take(2_000).all(|(p, q)| p == q));
    }

    #[test]
    fn bound_and_accessors() {
        let matrices = faure_generating_matrices(2, 3, None).unwrap();
        let sequence = DigitalSequence::<f32>::new(3, &matrices).unwrap();

        assert_eq!(sequence.base(), 3);
        assert_eq!(sequence.dim(), 2);
        assert_eq!(sequence.digits(), 3);
        assert_eq!(sequence.index(), 0);
        assert_eq!(sequence.len_bound(), 26);
        assert_eq!(sequence.count(), 26);

        // 2^100 does not fit, the bound saturates
        let large = DigitalSequence::<f64>::new(2, &[Matrix::identity(100)]).unwrap();
        assert_eq!(large.len_bound(), u64::MAX);
    }

    #[test]
    fn largest_digit_in_largest_base() {
        let base = MAX_BASE;
        let matrices = vec![Matrix::from_rows(vec![vec![base - 1]]).unwrap()];
        let mut sequence = DigitalSequence::<f64>::new(base, &matrices).unwrap();

        let x = sequence.next_point().unwrap()[0];
        assert_approx_eq!(x, 1.0 - 1.0 / base as f64, 1e-15);
        assert!(x < 1.0);
    }

    #[test]
    fn rejects_inconsistent_matrices() {
        assert!(matches!(
            DigitalSequence::<f64>::new(2, &[]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            DigitalSequence::<f64>::new(2, &[Matrix::identity(2), Matrix::identity(3)]),
            Err(Error::InvalidDimension(_))
        ));

        // C(3, 1) = 3 is not a digit in base 3
        let matrices = faure_generating_matrices(2, 4, Some(5)).unwrap();
        assert_eq!(
            DigitalSequence::<f64>::new(3, &matrices).map(|s| s.base()),
            Err(Error::InvalidBase { base: 3 })
        );
        assert_eq!(
            DigitalSequence::<f64>::new(1, &matrices).map(|s| s.base()),
            Err(Error::InvalidBase { base: 1 })
        );
    }
}
