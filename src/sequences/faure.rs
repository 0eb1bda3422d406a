//! Generating matrices of Faure sequences.
//!
//! A Faure sequence is a digital $(0,s)$-sequence in prime base $b \geq s$. Its generating matrix
//! for coordinate $i$ is the $i$-th power of the transposed Pascal matrix modulo $b$, see
//!
//! - H. Faure, *Discrépance de suites associées à un système de numération (en dimension s)*,
//! Acta Arithmetica 41 (1982) 337–351, and
//! - J. Dick, F. Kuo, I. Sloan, *High-dimensional integration: The quasi-Monte Carlo way*, Acta
//! Numerica 22 (2013) 133–288.
use crate::core::matrix::{check_base, Matrix};
use crate::core::primes::next_prime;
use crate::error::{Error, Result};

/// Returns the `size`-by-`size` lower-triangular Pascal matrix modulo `base`, whose entry in row
/// $n$ and column $m$ is the binomial coefficient $\binom{n}{m} \bmod b$.
pub fn pascal_matrix(base: u64, size: usize) -> Result<Matrix> {
    check_base(base)?;

    if size == 0 {
        return Err(Error::InvalidDimension(
            "the Pascal matrix must have at least one row".to_string(),
        ));
    }

    let mut matrix = Matrix::zeros(size);

    for n in 0..size {
        matrix.set(n, 0, 1);

        // C(n, m) = C(n - 1, m) + C(n - 1, m - 1)
        for m in 1..=n {
            let value = (matrix.get(n - 1, m) + matrix.get(n - 1, m - 1)) % base;
            matrix.set(n, m, value);
        }
    }

    Ok(matrix)
}

/// Returns the `dimensions` generating matrices of the Faure sequence, each of size
/// `digits`-by-`digits`. The truncation error of the digit expansion is roughly $b^{-N}$, where
/// $N$ is `digits`.
///
/// If `base` is `None` the smallest prime larger than `dimensions` is used. The first matrix is
/// always the identity, every following one is the previous times the transposed Pascal matrix.
pub fn faure_generating_matrices(
    dimensions: usize,
    digits: usize,
    base: Option<u64>,
) -> Result<Vec<Matrix>> {
    if dimensions == 0 {
        return Err(Error::InvalidDimension(
            "a sequence needs at least one dimension".to_string(),
        ));
    }

    let base = base.unwrap_or_else(|| next_prime(dimensions as u64));
    let pascal = pascal_matrix(base, digits)?.transpose();

    let mut matrices = Vec::with_capacity(dimensions);
    let mut power = Matrix::identity(digits);

    for _ in 1..dimensions {
        let next = power.mul_mod(&pascal, base)?;
        matrices.push(power);
        power = next;
    }

    matrices.push(power);

    Ok(matrices)
}
