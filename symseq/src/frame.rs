use crate::fns::{SymFn, SymOp, SymPred};
use crate::seq::Seq;
use crate::sym::Sym;

/// One constructor's worth of sequence: the value arguments a combinator
/// was built from, with child sequences held as arena handles.
///
/// A frame is both the lazy representation of a sequence and its interning
/// key. Building the same frame twice resolves to the same handle, which is
/// what makes self-referential constructions (`Repeat`'s tail, `Cycle`'s
/// wrap-around) revisit one shared node instead of expanding forever.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Frame {
    Nil,
    Cons(Sym, Seq),
    Repeat(Sym),
    Iterate(SymFn, Sym),
    Cycle { full: Seq, cursor: Seq },
    Map(SymFn, Seq),
    Filter(SymPred, Seq),
    Scan { op: SymOp, acc: Sym, rest: Seq },
    Take(usize, Seq),
    Skip(usize, Seq),
    Inits { src: Seq, taken: usize, rest: Seq },
    Tails(Seq),
    Zip(Vec<Seq>),
}

impl Frame {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Frame::Nil => "nil",
            Frame::Cons(..) => "cons",
            Frame::Repeat(_) => "repeat",
            Frame::Iterate(..) => "iterate",
            Frame::Cycle { .. } => "cycle",
            Frame::Map(..) => "map",
            Frame::Filter(..) => "filter",
            Frame::Scan { .. } => "scan",
            Frame::Take(..) => "take",
            Frame::Skip(..) => "skip",
            Frame::Inits { .. } => "inits",
            Frame::Tails(_) => "tails",
            Frame::Zip(_) => "zip",
        }
    }
}

/// The strict view one demand produces: either the sequence is exhausted,
/// or it yields a head and the handle of its tail. Realized steps are
/// memoized per node, so `filter`'s forward scan runs at most once no
/// matter how many times head, tail, or emptiness are probed.
#[derive(Clone, Debug)]
pub(crate) enum Step {
    Done,
    Yield(Sym, Seq),
}
