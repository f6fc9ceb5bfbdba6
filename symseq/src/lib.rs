//! Lazy, potentially infinite sequences of symbolic values.
//!
//! A [`Seq`] is a cheap `Copy` handle into a thread-local arena of
//! constructor frames. Every combinator (`iterate`, `map`, `filter`,
//! `take`, `zip`, ...) builds a single frame describing how to produce the
//! next element on demand; nothing is evaluated until a consumer asks for a
//! head or a tail. Construction is hash-consed: building the same frame
//! from the same arguments twice yields the same handle, which is what lets
//! self-referential definitions like `repeat` and `cycle` tie back into
//! themselves instead of expanding without bound.
//!
//! # Example
//!
//! ```rust
//! use symseq::{Seq, Sym, SymFn};
//!
//! let inc = SymFn::new(|s| Sym::Int(s.as_int().unwrap_or(0) + 1));
//! let nats = Seq::iterate(inc, Sym::Int(0));
//!
//! let first = nats.take(5).to_vec().unwrap();
//! assert_eq!(
//!     first,
//!     vec![Sym::Int(0), Sym::Int(1), Sym::Int(2), Sym::Int(3), Sym::Int(4)]
//! );
//!
//! // the same construction resolves to the same handle
//! assert_eq!(Seq::repeat(Sym::Int(7)), Seq::repeat(Sym::Int(7)));
//! ```
//!
//! # Divergence
//!
//! Demand-driven filtering keeps its natural failure mode: asking for the
//! head of `infinite.filter(never_true)` does not terminate, and neither
//! does folding an infinite sequence. Both are documented properties of the
//! algebra, not errors this crate detects. Materialization ([`Seq::to_vec`],
//! [`Seq::len`]) does reject sequences whose frame structure proves them
//! infinite.

mod error;
mod fns;
mod frame;
mod pool;
mod seq;
mod sym;

pub use error::{Error, Result};
pub use fns::{SymFn, SymOp, SymPred};
pub use seq::Seq;
pub use sym::Sym;
