//! Property suites for the algebraic laws.

use proptest::prelude::*;
use symseq::{Seq, Sym, SymFn};

use crate::nums::{add_one, naturals};

fn sym_vec() -> impl Strategy<Value = Vec<Sym>> {
    prop::collection::vec(any::<i64>().prop_map(Sym::Int), 0..32)
}

proptest! {
    #[test]
    fn materialization_round_trips(v in sym_vec()) {
        let s = Seq::from_syms(v.clone());
        prop_assert_eq!(s.to_vec().unwrap(), v.clone());
        // and again through the other direction
        let back = Seq::from_syms(s.to_vec().unwrap());
        prop_assert_eq!(back.to_vec().unwrap(), v);
    }

    #[test]
    fn take_yields_min_of_n_and_length(v in sym_vec(), n in 0usize..48) {
        let s = Seq::from_syms(v.clone());
        prop_assert_eq!(s.take(n).len().unwrap(), n.min(v.len()));
    }

    #[test]
    fn take_of_an_infinite_sequence_has_length_n(n in 0usize..64) {
        prop_assert_eq!(naturals().take(n).len().unwrap(), n);
    }

    #[test]
    fn take_then_skip_concatenate(v in sym_vec(), m in 0usize..16, n in 0usize..16) {
        let s = Seq::from_syms(v);
        let mut joined = s.take(m).to_vec().unwrap();
        joined.extend(s.skip(m).take(n).to_vec().unwrap());
        prop_assert_eq!(joined, s.take(n + m).to_vec().unwrap());
    }

    #[test]
    fn zip2_length_is_the_minimum(a in sym_vec(), b in sym_vec()) {
        let z = Seq::from_syms(a.clone()).zip2(Seq::from_syms(b.clone()));
        prop_assert_eq!(z.len().unwrap(), a.len().min(b.len()));
    }

    #[test]
    fn zip2_of_infinite_inputs_pairs_positionally(i in 0usize..64) {
        let doubled = SymFn::new(|s| Sym::Int(s.as_int().unwrap_or(0) * 2));
        let z = naturals().zip2(naturals().map(doubled));
        let nth = z.skip(i).head().unwrap();
        prop_assert_eq!(nth, Sym::pair(Sym::Int(i as i64), Sym::Int(2 * i as i64)));
    }

    #[test]
    fn scan_is_one_longer_than_a_finite_source(v in sym_vec()) {
        let add = symseq::SymOp::new(|a, b| {
            Sym::Int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0))
        });
        let s = Seq::from_syms(v.clone()).scan(Sym::Int(0), add);
        prop_assert_eq!(s.len().unwrap(), v.len() + 1);
    }
}

#[test]
fn iterate_interns_revisited_seeds() {
    let f = add_one();
    let nats = Seq::iterate(f, Sym::Int(0));
    let advanced = nats.tail().unwrap().tail().unwrap().tail().unwrap();
    assert_eq!(advanced, Seq::iterate(f, Sym::Int(3)));
}

#[test]
fn cycle_wrap_around_is_the_original_node() {
    let c = crate::nums::ints(&[1, 2, 3]).cycle().unwrap();
    let mut cur = c;
    for _ in 0..3 {
        cur = cur.tail().unwrap();
    }
    assert_eq!(cur, c);
}

#[test]
fn repeated_construction_shares_one_node() {
    assert_eq!(Seq::repeat(Sym::Int(42)), Seq::repeat(Sym::Int(42)));
    let f = add_one();
    assert_eq!(
        Seq::iterate(f, Sym::Int(0)).map(f),
        Seq::iterate(f, Sym::Int(0)).map(f)
    );
}
