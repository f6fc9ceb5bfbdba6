use crate::seq::Seq;

/// An element of a sequence: an immutable, comparable, hashable value.
///
/// The domain is closed: integer atoms, tuples (what `zip` produces), and
/// sequences themselves (what `inits`/`tails` produce). Equality of
/// `Sym::Seq` values is handle equality, which hash-consing makes agree
/// with "built by the same constructor from the same arguments".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sym {
    Int(i64),
    Tuple(Vec<Sym>),
    Seq(Seq),
}

impl Sym {
    /// A two-element tuple, the shape `zip2` yields.
    pub fn pair(a: Sym, b: Sym) -> Sym {
        Sym::Tuple(vec![a, b])
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Sym::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Sym]> {
        match self {
            Sym::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<Seq> {
        match self {
            Sym::Seq(s) => Some(*s),
            _ => None,
        }
    }
}

impl From<i64> for Sym {
    fn from(v: i64) -> Sym {
        Sym::Int(v)
    }
}
