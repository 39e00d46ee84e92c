use thiserror::Error;

/// Errors raised by dispatch bookkeeping.
///
/// Handler failures are not represented here: the bus does not catch a
/// panicking handler, it unwinds through `publish` and aborts the remaining
/// dispatch for that call.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A bus lock was poisoned, meaning an earlier handler panicked while
    /// bus state was mid-update.
    #[error("event bus lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
