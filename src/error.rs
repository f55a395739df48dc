use core::fmt;

/// Errors reported by fallible table operations.
///
/// Construction, insertion, and growth allocate and can therefore fail with
/// the allocation variants. [`Error::InvariantViolation`] is different in
/// kind: it reports a state the table's invariants rule out, and is not
/// meant to be handled and retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested (or doubled) slot count overflowed `usize`.
    CapacityOverflow,
    /// The allocator could not provide backing storage for the slot array.
    AllocFailed,
    /// Probing could not place an entry even after bounded retried growth.
    ///
    /// This indicates pathological hash clustering, a non-deterministic hash
    /// function, or a key whose hash changed after insertion. Existing
    /// entries are left intact and remain readable, but callers should treat
    /// the condition as fatal for further insertion.
    InvariantViolation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityOverflow => write!(f, "slot array capacity overflow"),
            Error::AllocFailed => write!(f, "slot array allocation failed"),
            Error::InvariantViolation => {
                write!(f, "probing exhausted after bounded growth; table invariants violated")
            }
        }
    }
}

impl core::error::Error for Error {}
