use tracing::debug;

use crate::error::{Error, Result};
use crate::fns::{SymFn, SymOp, SymPred};
use crate::frame::{Frame, Step};
use crate::pool;
use crate::sym::Sym;

/// A lazy, possibly infinite sequence of [`Sym`] values.
///
/// `Seq` is a `Copy` handle into the thread-local frame arena, in the same
/// way an arena index stands for a node of a recursive tree. Equality of
/// handles is equality of construction: hash-consing guarantees that the
/// same combinator applied to the same arguments returns the same handle,
/// so `==` compares sequences by how they were built, not by enumerating
/// elements.
///
/// A sequence is observed through [`Seq::is_empty`], [`Seq::head`] and
/// [`Seq::tail`] only. Nothing is evaluated at construction time; a node's
/// tail is produced on first demand and retained.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seq(pub(crate) u32);

impl Seq {
    /// The canonical empty sequence.
    pub fn nil() -> Seq {
        pool::nil()
    }

    /// The infinite sequence `x, x, x, ...`. Its tail is itself, by
    /// interning rather than by special case.
    pub fn repeat(x: Sym) -> Seq {
        pool::intern(Frame::Repeat(x))
    }

    /// Prepend `x` to `tail`.
    pub fn cons(x: Sym, tail: Seq) -> Seq {
        pool::intern(Frame::Cons(x, tail))
    }

    /// A finite sequence of the given values, terminating in Nil. An empty
    /// input gives Nil itself.
    pub fn from_syms<I>(syms: I) -> Seq
    where
        I: IntoIterator<Item = Sym>,
    {
        let items: Vec<Sym> = syms.into_iter().collect();
        let mut seq = Seq::nil();
        for sym in items.into_iter().rev() {
            seq = Seq::cons(sym, seq);
        }
        seq
    }

    /// The infinite sequence `seed, f(seed), f(f(seed)), ...`. Each tail
    /// derives the next seed from the previous one on demand; `f` is never
    /// replayed from the start.
    pub fn iterate(f: SymFn, seed: Sym) -> Seq {
        pool::intern(Frame::Iterate(f, seed))
    }

    /// The infinite repetition of this sequence's elements. Fails with
    /// [`Error::ImpossibleCycleSource`] on an empty source.
    ///
    /// A second cursor sequence threads through the elements and restarts
    /// at the full sequence exactly when it empties; the restarted node
    /// interns back to this one.
    pub fn cycle(self) -> Result<Seq> {
        if self.is_empty() {
            return Err(Error::ImpossibleCycleSource);
        }
        Ok(pool::intern(Frame::Cycle {
            full: self,
            cursor: self,
        }))
    }

    /// Exactly `n` copies of `x`.
    pub fn replicate(n: usize, x: Sym) -> Seq {
        Seq::repeat(x).take(n)
    }

    /// Element-wise application of `f`. Preserves length and
    /// (in)finiteness.
    pub fn map(self, f: SymFn) -> Seq {
        if pool::is_nil_frame(self) {
            return Seq::nil();
        }
        pool::intern(Frame::Map(f, self))
    }

    /// Keep only the elements satisfying `p`, in order.
    ///
    /// Skipping to the next passing element happens on first demand and is
    /// memoized, so repeated head/tail/emptiness probes never re-scan. If
    /// no element of an infinite source satisfies `p`, that demand does
    /// not terminate; this divergence is inherent to demand-driven
    /// filtering and is preserved.
    pub fn filter(self, p: SymPred) -> Seq {
        if pool::is_nil_frame(self) {
            return Seq::nil();
        }
        pool::intern(Frame::Filter(p, self))
    }

    /// The running accumulations of `op`, starting from (and beginning
    /// with) `start`. One element longer than a finite source; the head is
    /// `start` without touching the source at all.
    pub fn scan(self, start: Sym, op: SymOp) -> Seq {
        pool::intern(Frame::Scan {
            op,
            acc: start,
            rest: self,
        })
    }

    /// Strict left fold. The operator is applied immediately, so it is a
    /// plain closure rather than a registered function: folds are never
    /// stored inside a frame. Never returns on an infinite sequence.
    pub fn fold(self, start: Sym, op: impl Fn(&Sym, &Sym) -> Sym) -> Sym {
        let mut acc = start;
        let mut cur = self;
        loop {
            match pool::step(cur) {
                Step::Done => break acc,
                Step::Yield(h, t) => {
                    acc = op(&acc, &h);
                    cur = t;
                }
            }
        }
    }

    /// The first `min(n, length)` elements.
    pub fn take(self, n: usize) -> Seq {
        pool::take_node(n, self)
    }

    /// Everything after the first `n` elements, or Nil if fewer exist.
    /// `skip(0)` is the identity, handle included.
    pub fn skip(self, n: usize) -> Seq {
        pool::skip_node(n, self)
    }

    /// All prefixes, shortest first, starting with Nil. Ends with the full
    /// sequence for a finite source; infinite for an infinite one.
    pub fn inits(self) -> Seq {
        pool::intern(Frame::Inits {
            src: self,
            taken: 0,
            rest: self,
        })
    }

    /// All suffixes, starting with the sequence itself and ending with Nil
    /// for a finite source. The suffixes of Nil are the one-element
    /// sequence `[Nil]`.
    pub fn tails(self) -> Seq {
        pool::intern(Frame::Tails(self))
    }

    /// Pair elements positionally; stops with the shorter input.
    pub fn zip2(self, other: Seq) -> Seq {
        Seq::zip(&[self, other])
    }

    /// Positional k-ary zip producing tuples, shortest input wins.
    /// Emptiness of any input is detected without forcing any head. The
    /// degenerate zip of no inputs is an infinite sequence of empty
    /// tuples, matching the variadic generalization.
    pub fn zip(inputs: &[Seq]) -> Seq {
        pool::intern(Frame::Zip(inputs.to_vec()))
    }

    /// True when no elements remain. Answered structurally where the frame
    /// shape decides it; a filter or skip must realize its first step.
    pub fn is_empty(self) -> bool {
        pool::is_empty(self)
    }

    /// The first element. Fails with [`Error::EmptySequenceAccess`] on
    /// Nil.
    pub fn head(self) -> Result<Sym> {
        pool::head(self)
    }

    /// Everything after the first element. Fails with
    /// [`Error::EmptySequenceAccess`] on Nil.
    pub fn tail(self) -> Result<Seq> {
        pool::tail(self)
    }

    /// Collect into a vector, preserving order. Fails with
    /// [`Error::UnboundedMaterialization`] when the frame structure proves
    /// the sequence infinite; bound it with [`Seq::take`] first. Sequences
    /// the structural proof cannot classify (a filter over an infinite
    /// source) diverge here instead, as demand-driven filtering documents.
    pub fn to_vec(self) -> Result<Vec<Sym>> {
        self.guard_bounded()?;
        Ok(self.iter().collect())
    }

    /// The element count, under the same guard as [`Seq::to_vec`].
    pub fn len(self) -> Result<usize> {
        self.guard_bounded()?;
        Ok(self.iter().count())
    }

    /// Iterate over realized elements. The iterator is unbounded for an
    /// infinite sequence; the caller bounds it.
    pub fn iter(self) -> impl Iterator<Item = Sym> {
        SeqIter { cur: self }
    }

    fn guard_bounded(self) -> Result<()> {
        if pool::provably_unbounded(self) {
            debug!(seq = self.0, "refusing to materialize unbounded sequence");
            return Err(Error::UnboundedMaterialization);
        }
        Ok(())
    }
}

impl FromIterator<Sym> for Seq {
    fn from_iter<T: IntoIterator<Item = Sym>>(iter: T) -> Seq {
        Seq::from_syms(iter)
    }
}

struct SeqIter {
    cur: Seq,
}

impl Iterator for SeqIter {
    type Item = Sym;

    fn next(&mut self) -> Option<Sym> {
        match pool::step(self.cur) {
            Step::Done => None,
            Step::Yield(h, t) => {
                self.cur = t;
                Some(h)
            }
        }
    }
}
