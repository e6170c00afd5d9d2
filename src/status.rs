//! Uniform status/result type returned by every fallible operation in the crate.
//!
//! No operation in this crate panics or aborts on a recoverable condition —
//! bad input, an uninitialized filter, or a singular matrix all come back as
//! a `Status` instead of a `Result<_, E>` that needs unwrapping. The filter
//! is always left unmutated and always usable for the next call.

/// Outcome of a fallible filter or matrix operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Operation completed and mutated state as documented.
    Ok,
    /// The filter has not been initialized via `set_initial_state`.
    NotInitialized,
    /// Argument(s) out of range: non-positive `dt`, mismatched matrix
    /// dimensions, an empty sample set, etc.
    InvalidInput,
    /// A matrix inverse was required but the operand was singular (or the
    /// chosen pivot fell below the singularity threshold).
    Singular,
}

impl Status {
    /// True only for `Status::Ok`, matching the boolean success contract
    /// described by the spec this filter implements.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl From<Status> for bool {
    #[inline]
    fn from(s: Status) -> bool {
        s.is_ok()
    }
}
