//! The canonicalization engine.
//!
//! One `Pool` per thread holds the arena of frames, the intern table that
//! maps a frame back to its handle (hash-consing; entries are never
//! evicted), the memo of realized steps, and the registered function
//! tables. Every public constructor goes through [`Pool::intern`], so a
//! repeated construction is a table probe, not a new node.
//!
//! Borrow discipline: the pool is only ever borrowed for short, straight-
//! line accesses. User closures (metafunctions, predicates) are always
//! invoked with no borrow held, so they are free to construct and probe
//! sequences of their own.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use tracing::trace;

use crate::error::{Error, Result};
use crate::fns::{SymFn, SymOp, SymPred};
use crate::frame::{Frame, Step};
use crate::seq::Seq;
use crate::sym::Sym;

type UnaryFn = dyn Fn(&Sym) -> Sym;
type BinaryFn = dyn Fn(&Sym, &Sym) -> Sym;
type PredFn = dyn Fn(&Sym) -> bool;

pub(crate) struct Pool {
    /// Arena of frames; a `Seq` handle is an index into this vector.
    nodes: Vec<Frame>,
    /// Construction cache: frame -> existing handle.
    interned: AHashMap<Frame, Seq>,
    /// Realized one-step views, keyed by handle.
    forced: AHashMap<Seq, Step>,
    fns: Vec<Rc<UnaryFn>>,
    ops: Vec<Rc<BinaryFn>>,
    preds: Vec<Rc<PredFn>>,
}

impl Pool {
    fn new() -> Self {
        let mut pool = Pool {
            nodes: Vec::new(),
            interned: AHashMap::new(),
            forced: AHashMap::new(),
            fns: Vec::new(),
            ops: Vec::new(),
            preds: Vec::new(),
        };
        // slot 0 is the canonical empty sequence
        pool.intern(Frame::Nil);
        pool
    }

    fn intern(&mut self, frame: Frame) -> Seq {
        if let Some(&id) = self.interned.get(&frame) {
            return id;
        }
        let id = Seq(self.nodes.len() as u32);
        trace!(kind = frame.kind(), id = id.0, "interning new frame");
        self.nodes.push(frame.clone());
        self.interned.insert(frame, id);
        id
    }

    fn frame(&self, seq: Seq) -> Frame {
        self.nodes[seq.0 as usize].clone()
    }

    pub(crate) fn add_fn(&mut self, f: Rc<UnaryFn>) -> SymFn {
        self.fns.push(f);
        SymFn((self.fns.len() - 1) as u32)
    }

    pub(crate) fn add_op(&mut self, f: Rc<BinaryFn>) -> SymOp {
        self.ops.push(f);
        SymOp((self.ops.len() - 1) as u32)
    }

    pub(crate) fn add_pred(&mut self, f: Rc<PredFn>) -> SymPred {
        self.preds.push(f);
        SymPred((self.preds.len() - 1) as u32)
    }
}

thread_local! {
    static POOL: RefCell<Pool> = RefCell::new(Pool::new());
}

pub(crate) fn with_pool<R>(body: impl FnOnce(&mut Pool) -> R) -> R {
    POOL.with(|p| body(&mut p.borrow_mut()))
}

pub(crate) fn intern(frame: Frame) -> Seq {
    with_pool(|p| p.intern(frame))
}

pub(crate) fn frame(seq: Seq) -> Frame {
    with_pool(|p| p.frame(seq))
}

pub(crate) fn nil() -> Seq {
    intern(Frame::Nil)
}

pub(crate) fn is_nil_frame(seq: Seq) -> bool {
    matches!(frame(seq), Frame::Nil)
}

/// `Take` with the original's construction-time collapses: a zero-length
/// take and a take of the literal empty sequence are both Nil outright.
pub(crate) fn take_node(n: usize, src: Seq) -> Seq {
    if n == 0 || is_nil_frame(src) {
        nil()
    } else {
        intern(Frame::Take(n, src))
    }
}

/// `Skip` with the mirror-image collapses: skipping nothing is the
/// identity, skipping past the literal empty sequence stays empty.
pub(crate) fn skip_node(n: usize, src: Seq) -> Seq {
    if n == 0 {
        src
    } else if is_nil_frame(src) {
        nil()
    } else {
        intern(Frame::Skip(n, src))
    }
}

fn apply_fn(f: SymFn, x: &Sym) -> Sym {
    let g = with_pool(|p| p.fns[f.0 as usize].clone());
    g(x)
}

fn apply_op(op: SymOp, a: &Sym, b: &Sym) -> Sym {
    let g = with_pool(|p| p.ops[op.0 as usize].clone());
    g(a, b)
}

fn apply_pred(p: SymPred, x: &Sym) -> bool {
    let g = with_pool(|pool| pool.preds[p.0 as usize].clone());
    g(x)
}

/// Realize one step of `seq`: its head together with the handle of its
/// tail, or `Done` if it is exhausted. Results are memoized per node.
///
/// This is the only place elements are produced; a filter whose source
/// never matches spins in the scan loop here, the documented divergence
/// of demand-driven filtering.
pub(crate) fn step(seq: Seq) -> Step {
    if let Some(st) = with_pool(|p| p.forced.get(&seq).cloned()) {
        return st;
    }
    let st = match frame(seq) {
        Frame::Nil => Step::Done,
        Frame::Cons(x, t) => Step::Yield(x, t),
        // repeat's tail is the node itself
        Frame::Repeat(x) => Step::Yield(x, seq),
        Frame::Iterate(f, x) => {
            let next = apply_fn(f, &x);
            Step::Yield(x, intern(Frame::Iterate(f, next)))
        }
        Frame::Cycle { full, cursor } => match step(cursor) {
            // unreachable: cycle() rejects empty sources and the cursor
            // restarts before it empties
            Step::Done => Step::Done,
            Step::Yield(h, adv) => {
                let cursor = if is_empty(adv) { full } else { adv };
                Step::Yield(h, intern(Frame::Cycle { full, cursor }))
            }
        },
        Frame::Map(f, src) => match step(src) {
            Step::Done => Step::Done,
            Step::Yield(h, t) => Step::Yield(apply_fn(f, &h), intern(Frame::Map(f, t))),
        },
        Frame::Filter(p, src) => {
            // scan forward to the next passing element; memoization above
            // guarantees this runs at most once per filter node
            let mut cur = src;
            loop {
                match step(cur) {
                    Step::Done => break Step::Done,
                    Step::Yield(h, t) => {
                        if apply_pred(p, &h) {
                            break Step::Yield(h, intern(Frame::Filter(p, t)));
                        }
                        cur = t;
                    }
                }
            }
        }
        Frame::Scan { op, acc, rest } => match step(rest) {
            Step::Done => Step::Yield(acc, nil()),
            Step::Yield(h, t) => {
                let next = apply_op(op, &acc, &h);
                Step::Yield(acc, intern(Frame::Scan { op, acc: next, rest: t }))
            }
        },
        Frame::Take(n, src) => match step(src) {
            Step::Done => Step::Done,
            Step::Yield(h, t) => Step::Yield(h, take_node(n - 1, t)),
        },
        Frame::Skip(n, src) => {
            let mut cur = src;
            let mut left = n;
            loop {
                if left == 0 {
                    break step(cur);
                }
                match step(cur) {
                    Step::Done => break Step::Done,
                    Step::Yield(_, t) => {
                        cur = t;
                        left -= 1;
                    }
                }
            }
        }
        Frame::Inits { src, taken, rest } => {
            let prefix = Sym::Seq(take_node(taken, src));
            match step(rest) {
                Step::Done => Step::Yield(prefix, nil()),
                Step::Yield(_, t) => Step::Yield(
                    prefix,
                    intern(Frame::Inits { src, taken: taken + 1, rest: t }),
                ),
            }
        }
        Frame::Tails(src) => match step(src) {
            // the suffixes of the empty sequence are [Nil], then nothing
            Step::Done => Step::Yield(Sym::Seq(nil()), nil()),
            Step::Yield(_, t) => Step::Yield(Sym::Seq(src), intern(Frame::Tails(t))),
        },
        Frame::Zip(inputs) => {
            if inputs.is_empty() {
                Step::Yield(Sym::Tuple(Vec::new()), seq)
            } else if inputs.iter().any(|&x| is_empty(x)) {
                Step::Done
            } else {
                let mut heads = Vec::with_capacity(inputs.len());
                let mut tails = Vec::with_capacity(inputs.len());
                let mut done = false;
                for x in inputs {
                    match step(x) {
                        Step::Done => {
                            done = true;
                            break;
                        }
                        Step::Yield(h, t) => {
                            heads.push(h);
                            tails.push(t);
                        }
                    }
                }
                if done {
                    Step::Done
                } else {
                    Step::Yield(Sym::Tuple(heads), intern(Frame::Zip(tails)))
                }
            }
        }
    };
    with_pool(|p| p.forced.insert(seq, st.clone()));
    st
}

/// Emptiness, answered structurally wherever a frame's shape decides it,
/// without forcing any head.
pub(crate) fn is_empty(seq: Seq) -> bool {
    match frame(seq) {
        Frame::Nil => true,
        Frame::Cons(..)
        | Frame::Repeat(_)
        | Frame::Iterate(..)
        | Frame::Cycle { .. }
        | Frame::Scan { .. }
        | Frame::Inits { .. }
        | Frame::Tails(_) => false,
        // take frames are built with n > 0
        Frame::Map(_, src) | Frame::Take(_, src) => is_empty(src),
        Frame::Zip(inputs) => !inputs.is_empty() && inputs.iter().any(|&x| is_empty(x)),
        Frame::Filter(..) | Frame::Skip(..) => matches!(step(seq), Step::Done),
    }
}

/// The head, taking every cheap structural path available so that e.g.
/// `scan`'s head never touches its source.
pub(crate) fn head(seq: Seq) -> Result<Sym> {
    match frame(seq) {
        Frame::Nil => Err(Error::EmptySequenceAccess),
        Frame::Cons(x, _) | Frame::Repeat(x) | Frame::Iterate(_, x) => Ok(x),
        Frame::Scan { acc, .. } => Ok(acc),
        Frame::Cycle { cursor, .. } => head(cursor),
        Frame::Map(f, src) => {
            let h = head(src)?;
            Ok(apply_fn(f, &h))
        }
        Frame::Take(_, src) => head(src),
        Frame::Inits { src, taken, .. } => Ok(Sym::Seq(take_node(taken, src))),
        Frame::Tails(src) => Ok(Sym::Seq(src)),
        Frame::Filter(..) | Frame::Skip(..) | Frame::Zip(_) => match step(seq) {
            Step::Done => Err(Error::EmptySequenceAccess),
            Step::Yield(h, _) => Ok(h),
        },
    }
}

pub(crate) fn tail(seq: Seq) -> Result<Seq> {
    match step(seq) {
        Step::Done => Err(Error::EmptySequenceAccess),
        Step::Yield(_, t) => Ok(t),
    }
}

/// Conservative structural proof of infiniteness, used to guard
/// materialization. `Repeat`/`Iterate`/`Cycle` reachable through frames
/// that inherit their source's length, with no bounding `Take` in between,
/// proves the sequence infinite. What this cannot prove may still diverge
/// (a filter over an infinite source); that divergence is the documented
/// demand-driven behavior and is deliberately not "fixed" here.
pub(crate) fn provably_unbounded(seq: Seq) -> bool {
    let mut cur = seq;
    loop {
        match frame(cur) {
            Frame::Nil | Frame::Take(..) => return false,
            Frame::Repeat(_) | Frame::Iterate(..) | Frame::Cycle { .. } => return true,
            Frame::Cons(_, t)
            | Frame::Map(_, t)
            | Frame::Filter(_, t)
            | Frame::Scan { rest: t, .. }
            | Frame::Skip(_, t)
            | Frame::Tails(t) => cur = t,
            Frame::Inits { rest, .. } => cur = rest,
            // shortest input wins, so a zip is unbounded only if every
            // input is; the zip of no inputs never runs out of empty tuples
            Frame::Zip(inputs) => {
                return inputs.is_empty() || inputs.into_iter().all(provably_unbounded)
            }
        }
    }
}
