//! Registered metafunctions.
//!
//! Frames are interning keys, so they must be hashable and comparable;
//! closures are neither. Registering a function assigns it a `Copy`
//! identity that frames carry instead. The closure itself must be pure and
//! referentially transparent: equal arguments, equal results. Two
//! registrations of the same closure get distinct identities, so reuse the
//! returned handle when two constructions are meant to intern together.

use std::rc::Rc;

use tracing::debug;

use crate::pool;
use crate::sym::Sym;

/// Identity of a registered unary function `Sym -> Sym`, usable with
/// [`crate::Seq::iterate`] and [`crate::Seq::map`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymFn(pub(crate) u32);

impl SymFn {
    pub fn new(f: impl Fn(&Sym) -> Sym + 'static) -> Self {
        let id = pool::with_pool(|p| p.add_fn(Rc::new(f)));
        debug!(id = id.0, "registered unary function");
        id
    }
}

/// Identity of a registered binary operator `Sym x Sym -> Sym`, usable
/// with [`crate::Seq::scan`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymOp(pub(crate) u32);

impl SymOp {
    pub fn new(f: impl Fn(&Sym, &Sym) -> Sym + 'static) -> Self {
        let id = pool::with_pool(|p| p.add_op(Rc::new(f)));
        debug!(id = id.0, "registered binary operator");
        id
    }
}

/// Identity of a registered predicate `Sym -> bool`, usable with
/// [`crate::Seq::filter`].
///
/// Predicates may themselves construct and probe sequences: the pool is
/// never borrowed while a predicate runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymPred(pub(crate) u32);

impl SymPred {
    pub fn new(f: impl Fn(&Sym) -> bool + 'static) -> Self {
        let id = pool::with_pool(|p| p.add_pred(Rc::new(f)));
        debug!(id = id.0, "registered predicate");
        id
    }
}
