use std::sync::{Arc, RwLock};

use fxhash::FxHashMap;
use tracing::{debug, trace};

use crate::error::BusError;
use crate::event::Event;
use crate::hierarchy::EventType;
use crate::subscriber::Subscribe;
use crate::subscription::{self, Handler};

/// Synchronous publish/subscribe dispatcher.
///
/// Holds, per event type, the set of currently registered subscriber
/// instances, and an append-only history of published sticky instances.
/// Dispatch runs on the caller's thread: `publish` invokes every matching
/// handler before it returns.
///
/// Each bus owns its subscribers and history independently; all buses share
/// the process-wide subscription table and sticky set. Buckets are snapshotted
/// before handlers run, so a handler may freely register, unregister, or
/// publish on the same bus.
pub struct EventBus {
    /// Bucket per event type: insertion-ordered, identity-deduplicated.
    subscribers: RwLock<FxHashMap<EventType, Vec<Arc<dyn Subscribe>>>>,
    /// Published instances of sticky types, in publish order. Never pruned.
    history: RwLock<Vec<Arc<dyn Event>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        EventBus {
            subscribers: RwLock::new(FxHashMap::default()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Registers a subscriber under every event type its subscriber type
    /// (or an ancestor of it) declares a handler for.
    ///
    /// The subscriber's chain is walked most specific first and each event
    /// type is bound once, so a subtype's handler shadows an ancestor's
    /// declaration for the same event type. For each sticky event type
    /// bound, the matching history is replayed immediately by invoking the
    /// bound handler — registering twice replays twice.
    pub fn register(&self, subscriber: &Arc<dyn Subscribe>) -> Result<(), BusError> {
        let mut bound: Vec<(EventType, Handler)> = Vec::new();
        for level in subscriber.subscriber_type().ancestors() {
            for (event_type, handler) in subscription::declared_at(level) {
                if bound.iter().all(|(ty, _)| *ty != event_type) {
                    bound.push((event_type, handler));
                }
            }
        }

        for (event_type, handler) in bound {
            self.index(subscriber, event_type)?;
            if subscription::is_sticky(event_type) {
                let matching = self.matching_history(event_type)?;
                trace!(
                    subscriber = subscriber.name(),
                    event = event_type.name(),
                    replayed = matching.len(),
                    "replaying sticky history"
                );
                for event in matching {
                    handler(subscriber.as_ref(), event.as_ref());
                }
            }
        }
        Ok(())
    }

    /// Registers a subscriber under exactly `event_type`, without consulting
    /// the subscription table.
    ///
    /// If `event_type` is sticky, matching history is replayed through the
    /// full handler lookup keyed by each instance's *concrete* type: a
    /// subscriber registered for a supertype has its handler for the exact
    /// published subtype resolved, and receives nothing for instances whose
    /// concrete type it declares no handler for.
    pub fn register_for(
        &self,
        subscriber: &Arc<dyn Subscribe>,
        event_type: EventType,
    ) -> Result<(), BusError> {
        self.index(subscriber, event_type)?;
        if subscription::is_sticky(event_type) {
            for event in self.matching_history(event_type)? {
                let concrete = event.event_type();
                self.call(subscriber.as_ref(), event.as_ref(), concrete);
            }
        }
        Ok(())
    }

    /// Removes the subscriber from every bucket. No-op if absent.
    pub fn unregister(&self, subscriber: &Arc<dyn Subscribe>) -> Result<(), BusError> {
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| BusError::LockPoisoned("subscribers write"))?;
        for bucket in subscribers.values_mut() {
            bucket.retain(|registered| !Arc::ptr_eq(registered, subscriber));
        }
        Ok(())
    }

    /// Removes the subscriber from the `event_type` bucket only. No-op if
    /// the subscriber or the bucket is absent.
    pub fn unregister_from(
        &self,
        subscriber: &Arc<dyn Subscribe>,
        event_type: EventType,
    ) -> Result<(), BusError> {
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| BusError::LockPoisoned("subscribers write"))?;
        if let Some(bucket) = subscribers.get_mut(&event_type) {
            bucket.retain(|registered| !Arc::ptr_eq(registered, subscriber));
        }
        Ok(())
    }

    /// Drops the entire bucket for `event_type`, discarding every subscriber
    /// registered under it. Buckets for other types are untouched.
    pub fn unregister_all(&self, event_type: EventType) -> Result<(), BusError> {
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| BusError::LockPoisoned("subscribers write"))?;
        subscribers.remove(&event_type);
        Ok(())
    }

    /// Publishes an event to every interested subscriber, synchronously.
    ///
    /// If the event's concrete type is sticky, the instance is appended to
    /// history first, whether or not anyone is registered. The concrete
    /// type's chain is then walked most specific first; each level's bucket
    /// is dispatched in insertion order. A subscriber indexed under several
    /// levels of the chain is invoked once per level.
    pub fn publish(&self, event: Arc<dyn Event>) -> Result<(), BusError> {
        let concrete = event.event_type();
        if subscription::is_sticky(concrete) {
            let mut history = self
                .history
                .write()
                .map_err(|_| BusError::LockPoisoned("history write"))?;
            history.push(Arc::clone(&event));
            trace!(event = concrete.name(), retained = history.len(), "sticky instance retained");
        }

        for level in concrete.ancestors() {
            // Snapshot the bucket so handlers can mutate registrations
            // mid-dispatch without corrupting this walk.
            let bucket = {
                let subscribers = self
                    .subscribers
                    .read()
                    .map_err(|_| BusError::LockPoisoned("subscribers read"))?;
                match subscribers.get(&level) {
                    Some(bucket) if !bucket.is_empty() => bucket.clone(),
                    _ => continue,
                }
            };
            debug!(
                event = concrete.name(),
                level = level.name(),
                subscribers = bucket.len(),
                "dispatching"
            );
            for subscriber in &bucket {
                self.call(subscriber.as_ref(), event.as_ref(), level);
            }
        }
        Ok(())
    }

    /// Number of subscribers currently in the `event_type` bucket.
    pub fn subscriber_count(&self, event_type: EventType) -> Result<usize, BusError> {
        let subscribers = self
            .subscribers
            .read()
            .map_err(|_| BusError::LockPoisoned("subscribers read"))?;
        Ok(subscribers.get(&event_type).map_or(0, Vec::len))
    }

    /// Whether the subscriber is currently in the `event_type` bucket.
    pub fn is_registered(
        &self,
        subscriber: &Arc<dyn Subscribe>,
        event_type: EventType,
    ) -> Result<bool, BusError> {
        let subscribers = self
            .subscribers
            .read()
            .map_err(|_| BusError::LockPoisoned("subscribers read"))?;
        Ok(subscribers
            .get(&event_type)
            .is_some_and(|bucket| bucket.iter().any(|registered| Arc::ptr_eq(registered, subscriber))))
    }

    /// Number of sticky instances retained so far.
    pub fn history_len(&self) -> Result<usize, BusError> {
        let history = self
            .history
            .read()
            .map_err(|_| BusError::LockPoisoned("history read"))?;
        Ok(history.len())
    }

    /// Snapshot of the sticky history, in publish order.
    pub fn history(&self) -> Result<Vec<Arc<dyn Event>>, BusError> {
        let history = self
            .history
            .read()
            .map_err(|_| BusError::LockPoisoned("history read"))?;
        Ok(history.clone())
    }

    /// Invokes the subscriber's handler for `event_type`, if it declares
    /// one.
    ///
    /// Walks the subscriber's type chain most specific first and fires the
    /// first handler keyed by `event_type`; a subscriber indexed under a
    /// broader type than it handles is a silent no-op.
    fn call(&self, subscriber: &dyn Subscribe, event: &dyn Event, event_type: EventType) {
        for level in subscriber.subscriber_type().ancestors() {
            if let Some(handler) = subscription::handler_at(level, event_type) {
                handler(subscriber, event);
                return;
            }
        }
    }

    /// Adds the subscriber to the `event_type` bucket, preserving insertion
    /// order and identity-set semantics.
    fn index(&self, subscriber: &Arc<dyn Subscribe>, event_type: EventType) -> Result<(), BusError> {
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| BusError::LockPoisoned("subscribers write"))?;
        let bucket = subscribers.entry(event_type).or_default();
        if !bucket.iter().any(|registered| Arc::ptr_eq(registered, subscriber)) {
            bucket.push(Arc::clone(subscriber));
            trace!(
                subscriber = subscriber.name(),
                event = event_type.name(),
                "subscriber indexed"
            );
        }
        Ok(())
    }

    /// Retained instances that are `event_type` or a subtype of it, in
    /// publish order. Cloned out so no lock is held while handlers run.
    fn matching_history(&self, event_type: EventType) -> Result<Vec<Arc<dyn Event>>, BusError> {
        let history = self
            .history
            .read()
            .map_err(|_| BusError::LockPoisoned("history read"))?;
        Ok(history
            .iter()
            .filter(|event| event.is_instance_of(event_type))
            .cloned()
            .collect())
    }
}
