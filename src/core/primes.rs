//! Prime numbers used to pick the base of digital sequences.

/// Returns `true` if `n` is prime. Uses trial division by all integers up to $\sqrt{n}$.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 2;

    // `i <= n / i` instead of `i * i <= n` so that large `n` can not overflow
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }

    true
}

/// Returns the smallest prime that is strictly greater than `n`; for `n < 2` this is `2`.
///
/// This is a naive search, which is fast enough for the small numbers used as bases and digit
/// depths, but slow for very large `n`.
pub fn next_prime(n: u64) -> u64 {
    if n < 2 {
        return 2;
    }

    let mut p = n + 1;

    while !is_prime(p) {
        p += 1;
    }

    p
}
