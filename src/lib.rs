#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `qmcintir` provides [quasi-Monte Carlo integration] routines, which approximate
//! definite multi-dimensional [integrals] over hyper-rectangles with deterministic
//! low-discrepancy points instead of random numbers. The points are taken from [Faure
//! sequences], which are digital sequences built from powers of the Pascal matrix modulo a prime.
//!
//! # Features
//!
//! - **Generic numeric type**. The numeric type used in this library is not fixed, but instead a
//! generic parameter, so that the integration routines can be used with either `f32`, `f64`, or a
//! custom numeric type that implements the `Float` trait from the `num-traits` crate.
//! - **Adaptive stopping**. The integrators consume the sequence one point at a time and decide
//! after each point whether the requested precision has been reached. Two stopping rules are
//! available: the stability of the running mean, and the agreement of several randomly shifted
//! replicates of the sequence.
//! - **Explicit failure**. If the sequence, or the sample budget, is exhausted before the
//! stopping rule is satisfied the integration fails with [`Error::PrecisionUnmet`] instead of
//! returning a partial estimate.
//! - **Reproducibility**. The sequences are deterministic and the random shifts are drawn from a
//! seeded generator, so every result can be reproduced exactly.
//! - **Non-finite number filtering**. Integrand values such as `inf` or `nan` are counted and
//! treated as zero.
//!
//! # How do I get started?
//!
//! ```
//! use qmcintir::{integrate, Stability};
//!
//! // the integral of x^3 from 0 to 2 is 4
//! let result = integrate(&|x: &[f64]| x[0].powi(3), &[(0.0, 2.0)], &Stability::new(1e-4, 10));
//!
//! assert!((result.unwrap() - 4.0).abs() < 1e-2);
//! ```
//!
//! # What is ...?
//!
//! Given
//!
//! $$ I = \prod_{i=1}^s \int_{l_i}^{h_i} \mathrm{d} x_i f(x_1, x_2, \ldots, x_s) $$
//!
//! we approximate $I$ with
//!
//! $$ I \approx \frac{V}{n} \sum_{j=1}^n f \left( \mathbf{x}^{(j)} \right) $$
//!
//! where $V$ is the volume of the hyper-rectangle and $\mathbf{x}^{(j)}$ is the $j$-th point of a
//! digital sequence, mapped from the unit hypercube into the hyper-rectangle. We use the
//! following terms:
//!
//! - the *base*, $b$, is the prime radix of the digit expansions; by default it is the smallest
//! prime larger than $s$,
//! - the *digit depth*, $N$, is the number of digits of each coordinate. It bounds the length of
//! the sequence to $b^N - 1$ points and its resolution to $b^{-N}$,
//! - the *generating matrices* are the $s$ matrices of size $N \times N$ that map the digits of the
//! index $j$ to the digits of the coordinates of $\mathbf{x}^{(j)}$.
//!
//! [quasi-Monte Carlo integration]: https://en.wikipedia.org/wiki/Quasi-Monte_Carlo_method
//! [integrals]: https://en.wikipedia.org/wiki/Integral
//! [Faure sequences]: https://en.wikipedia.org/wiki/Faure_sequence

pub mod core;
pub mod error;
pub mod integrators;
pub mod sequences;

pub use crate::core::estimators::{BasicEstimators, Estimators};
pub use crate::core::matrix::Matrix;
pub use crate::core::primes::next_prime;
pub use crate::core::{Domain, Estimate, Integrand};
pub use crate::error::{Error, Result};
pub use crate::integrators::{integrate, Config, Replicates, Stability, Strategy};
pub use crate::sequences::faure::{faure_generating_matrices, pascal_matrix};
pub use crate::sequences::DigitalSequence;
