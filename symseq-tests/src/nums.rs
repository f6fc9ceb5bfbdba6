//! Numeric sequences built on the algebra: the acceptance examples.

use symseq::{Seq, Sym, SymFn, SymPred};

/// A finite sequence of integers.
pub fn ints(xs: &[i64]) -> Seq {
    Seq::from_syms(xs.iter().map(|&v| Sym::Int(v)))
}

pub fn add_one() -> SymFn {
    SymFn::new(|s| Sym::Int(s.as_int().unwrap_or(0) + 1))
}

/// `0, 1, 2, ...`
pub fn naturals() -> Seq {
    Seq::iterate(add_one(), Sym::Int(0))
}

/// `0, 1, 1, 2, 3, 5, 8, ...`: iterate over `(a, b) -> (b, a + b)`
/// pairs seeded with `(0, 1)`, projecting the first component.
pub fn fib() -> Seq {
    let step = SymFn::new(|s| {
        let (a, b) = match s.as_tuple() {
            Some([a, b]) => (a.as_int().unwrap_or(0), b.as_int().unwrap_or(0)),
            _ => (0, 0),
        };
        Sym::pair(Sym::Int(b), Sym::Int(a + b))
    });
    let first = SymFn::new(|s| {
        s.as_tuple()
            .and_then(|t| t.first())
            .cloned()
            .unwrap_or(Sym::Int(0))
    });
    Seq::iterate(step, Sym::pair(Sym::Int(0), Sym::Int(1))).map(first)
}

/// Primes by trial division: a candidate `n >= 2` is prime when filtering
/// the `n - 2` naturals starting at 2 by "divides n" leaves nothing. The
/// predicate builds and probes sequences of its own while the outer filter
/// is being demanded.
pub fn primes() -> Seq {
    let from_two = naturals().skip(2);
    let is_prime = SymPred::new(move |candidate| {
        let n = candidate.as_int().unwrap_or(0);
        let divides_n = SymPred::new(move |d| d.as_int().map(|d| n % d == 0).unwrap_or(false));
        let dividers = from_two.take(n.saturating_sub(2) as usize);
        dividers.filter(divides_n).is_empty()
    });
    from_two.filter(is_prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_ints(seq: Seq) -> Vec<i64> {
        seq.to_vec()
            .unwrap()
            .iter()
            .map(|s| s.as_int().unwrap())
            .collect()
    }

    #[test]
    fn first_naturals() {
        assert_eq!(to_ints(naturals().take(5)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn naturals_are_unbounded() {
        assert!(naturals().to_vec().is_err());
        assert_eq!(naturals().skip(10).head().unwrap(), Sym::Int(10));
    }

    #[test]
    fn first_fibonacci_numbers() {
        assert_eq!(to_ints(fib().take(7)), vec![0, 1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn first_primes_by_trial_division() {
        assert_eq!(to_ints(primes().take(6)), vec![2, 3, 5, 7, 11, 13]);
    }

    #[test]
    fn running_sum_of_naturals() {
        let add = symseq::SymOp::new(|a, b| {
            Sym::Int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0))
        });
        let sums = naturals().scan(Sym::Int(0), add);
        // triangle numbers, with the seed first
        assert_eq!(to_ints(sums.take(6)), vec![0, 0, 1, 3, 6, 10]);
    }
}
