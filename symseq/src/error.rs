use thiserror::Error;

/// Contract violations surfaced by the sequence algebra. All three are
/// programming errors at the call site, reported immediately rather than
/// silently truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `head` or `tail` was taken on the empty sequence.
    #[error("head/tail taken on the empty sequence")]
    EmptySequenceAccess,

    /// Materialization was asked for a sequence whose construction proves
    /// it infinite. Bound it with `take` first.
    #[error("cannot materialize a sequence of unbounded length")]
    UnboundedMaterialization,

    /// `cycle` was invoked with an empty source.
    #[error("cycle requires a non-empty source sequence")]
    ImpossibleCycleSource,
}

pub type Result<T> = std::result::Result<T, Error>;
