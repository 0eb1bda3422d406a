//! Square matrices of digits with modular arithmetic.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest base for which the product of two digits, plus a digit, fits into `u64`.
pub const MAX_BASE: u64 = u32::MAX as u64;

/// Checks that `base` can be used as a modulus of digit arithmetic.
pub(crate) fn check_base(base: u64) -> Result<()> {
    if base < 2 {
        Err(Error::InvalidBase { base })
    } else if base > MAX_BASE {
        Err(Error::NumericOverflow { base })
    } else {
        Ok(())
    }
}

/// A dense, square matrix of unsigned integers stored in row-major order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Matrix {
    size: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// Constructs a `size`-by-`size` matrix filled with zeros.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0; size * size],
        }
    }

    /// Constructs the `size`-by-`size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::zeros(size);

        for i in 0..size {
            matrix.set(i, i, 1);
        }

        matrix
    }

    /// Constructs a matrix from its rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let size = rows.len();

        if rows.iter().any(|row| row.len() != size) {
            return Err(Error::InvalidDimension(format!(
                "every row of a {0}x{0} matrix must have {0} entries",
                size
            )));
        }

        Ok(Self {
            size,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Returns the number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the entry in row `row` and column `col`.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.data[row * self.size + col]
    }

    /// Sets the entry in row `row` and column `col` to `value`.
    pub fn set(&mut self, row: usize, col: usize, value: u64) {
        self.data[row * self.size + col] = value;
    }

    /// Returns the row with index `row`.
    pub fn row(&self, row: usize) -> &[u64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.size);

        for i in 0..self.size {
            for j in 0..self.size {
                result.set(j, i, self.get(i, j));
            }
        }

        result
    }

    /// Returns the largest entry, or `None` for an empty matrix.
    pub fn max_entry(&self) -> Option<u64> {
        self.data.iter().copied().max()
    }

    /// Returns `true` if all entries above the diagonal vanish.
    pub fn is_lower_triangular(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == 0))
    }

    /// Computes the product `self * other` modulo `modulus`. All entries of both matrices must be
    /// smaller than `modulus`; the sum is reduced after every multiply-add so that no intermediate
    /// value exceeds $(b-1)^2 + b - 1$.
    pub fn mul_mod(&self, other: &Self, modulus: u64) -> Result<Self> {
        check_base(modulus)?;

        if self.size != other.size {
            return Err(Error::InvalidDimension(format!(
                "can not multiply a {0}x{0} with a {1}x{1} matrix",
                self.size, other.size
            )));
        }

        let n = self.size;
        let mut result = Self::zeros(n);

        for i in 0..n {
            for k in 0..n {
                let a = self.get(i, k);

                if a == 0 {
                    continue;
                }

                for j in 0..n {
                    let index = i * n + j;
                    result.data[index] = (result.data[index] + a * other.get(k, j)) % modulus;
                }
            }
        }

        Ok(result)
    }
}
