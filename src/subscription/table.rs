//! Process-wide subscription table.
//!
//! Maps a subscriber type to the handlers it declares, one per event type.
//! Populated during startup through [`SubscriberType::on`] and shared by
//! every instance of that subscriber type; entries are never removed.
//!
//! [`SubscriberType::on`]: crate::SubscriberType::on

use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard};

use fxhash::FxHashMap;
use tracing::trace;

use crate::event::Event;
use crate::hierarchy::{EventType, SubscriberType};
use crate::subscriber::Subscribe;

/// Handler for one event type, declared on one subscriber type.
///
/// Stored unbound; the subscriber instance is supplied as the explicit
/// receiver when the bus invokes it. Taking exactly one event argument is a
/// property of the signature, so a malformed handler cannot be declared.
pub type Handler = fn(&dyn Subscribe, &dyn Event);

type HandlerMap = FxHashMap<EventType, Handler>;

static TABLE: LazyLock<RwLock<FxHashMap<SubscriberType, HandlerMap>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

// The table only grows, one entry at a time, so data behind a poisoned
// guard is still consistent.
fn table() -> RwLockReadGuard<'static, FxHashMap<SubscriberType, HandlerMap>> {
    TABLE.read().unwrap_or_else(PoisonError::into_inner)
}

/// Records `handler` for `(subscriber_type, event_type)`. A duplicate
/// declaration overwrites the previous handler (last write wins).
pub(crate) fn declare(subscriber_type: SubscriberType, event_type: EventType, handler: Handler) {
    let mut table = TABLE.write().unwrap_or_else(PoisonError::into_inner);
    table
        .entry(subscriber_type)
        .or_default()
        .insert(event_type, handler);
    trace!(
        subscriber = subscriber_type.name(),
        event = event_type.name(),
        "handler declared"
    );
}

/// The handler declared at exactly `(subscriber_type, event_type)`, without
/// walking the subscriber's chain.
pub(crate) fn handler_at(
    subscriber_type: SubscriberType,
    event_type: EventType,
) -> Option<Handler> {
    table()
        .get(&subscriber_type)
        .and_then(|handlers| handlers.get(&event_type))
        .copied()
}

/// Every `(event type, handler)` pair declared at exactly `subscriber_type`.
pub(crate) fn declared_at(subscriber_type: SubscriberType) -> Vec<(EventType, Handler)> {
    table()
        .get(&subscriber_type)
        .map(|handlers| handlers.iter().map(|(ty, handler)| (*ty, *handler)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(_subscriber: &dyn Subscribe, _event: &dyn Event) {}
    fn second(_subscriber: &dyn Subscribe, _event: &dyn Event) {}

    #[test]
    fn declared_handlers_are_found_per_type() {
        let event = EventType::define("TableEvent");
        let subscriber = SubscriberType::define("TableSubscriber");

        assert!(handler_at(subscriber, event).is_none());
        declare(subscriber, event, first);
        assert_eq!(handler_at(subscriber, event), Some(first as Handler));
    }

    #[test]
    fn duplicate_declaration_overwrites() {
        let event = EventType::define("OverwriteEvent");
        let subscriber = SubscriberType::define("OverwriteSubscriber");

        declare(subscriber, event, first);
        declare(subscriber, event, second);

        assert_eq!(handler_at(subscriber, event), Some(second as Handler));
        assert_eq!(declared_at(subscriber).len(), 1);
    }

    #[test]
    fn lookup_does_not_walk_the_chain() {
        let event = EventType::define("ChainedEvent");
        let base = SubscriberType::define("BaseDeclarer");
        let derived = SubscriberType::extend("DerivedDeclarer", base);

        declare(base, event, first);

        assert!(handler_at(derived, event).is_none());
        assert!(declared_at(derived).is_empty());
    }
}
