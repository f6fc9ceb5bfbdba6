//! Acceptance and property tests for the symseq sequence algebra.
//!
//! `nums` holds the numeric sequences (naturals, Fibonacci, primes by
//! trial division) that exercise the combinators end to end; the property
//! suites live in `props`.

pub mod nums;

#[cfg(test)]
mod props;
