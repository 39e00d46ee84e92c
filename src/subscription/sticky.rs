//! Process-wide set of sticky event types.

use std::sync::{LazyLock, PoisonError, RwLock};

use fxhash::FxHashSet;
use tracing::trace;

use crate::hierarchy::EventType;

static STICKY: LazyLock<RwLock<FxHashSet<EventType>>> =
    LazyLock::new(|| RwLock::new(FxHashSet::default()));

/// Marks an event type as sticky: published instances of exactly this type
/// are retained and replayed to subscribers that register later.
///
/// Idempotent. Must be called before publishing; instances published before
/// the mark are not retained retroactively.
pub fn mark_sticky(event_type: EventType) {
    let mut sticky = STICKY.write().unwrap_or_else(PoisonError::into_inner);
    if sticky.insert(event_type) {
        trace!(event = event_type.name(), "event type marked sticky");
    }
}

/// Whether `event_type` has been marked sticky.
pub fn is_sticky(event_type: EventType) -> bool {
    STICKY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&event_type)
}
