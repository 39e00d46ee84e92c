//! Type tokens and the hierarchy walk.
//!
//! Event and subscriber types are identified by interned tokens handed out
//! by two process-wide registries. Each token carries a diagnostic name and
//! an optional parent, giving every type a single-inheritance chain up to a
//! root. The chain is cached when the type is defined; [`EventType::ancestors`]
//! and [`SubscriberType::ancestors`] return it most specific first, and the
//! same walk serves both publish-time event matching and handler lookup on
//! the subscriber side.
//!
//! Tokens are `Copy` and compare by identity: two `define` calls with the
//! same name produce two distinct types.

mod registry;

use std::fmt;

use registry::{TypeRegistry, TypeToken};

use crate::subscription::{self, Handler};

static EVENT_TYPES: TypeRegistry = TypeRegistry::new();
static SUBSCRIBER_TYPES: TypeRegistry = TypeRegistry::new();

/// Identifier for a class of event values, with single-parent inheritance.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventType(TypeToken);

impl EventType {
    /// Defines a new root event type.
    pub fn define(name: &'static str) -> Self {
        EventType(EVENT_TYPES.define(name, None))
    }

    /// Defines a new event type as a subtype of `parent`.
    pub fn extend(name: &'static str, parent: EventType) -> Self {
        EventType(EVENT_TYPES.define(name, Some(parent.0)))
    }

    /// The name this type was defined with.
    pub fn name(self) -> &'static str {
        EVENT_TYPES.name(self.0)
    }

    /// The direct parent type, if any.
    pub fn parent(self) -> Option<EventType> {
        EVENT_TYPES.parent(self.0).map(EventType)
    }

    /// This type followed by its ancestors, most specific first.
    pub fn ancestors(self) -> Vec<EventType> {
        EVENT_TYPES.chain(self.0).into_iter().map(EventType).collect()
    }

    /// Whether `self` is `other` or one of its subtypes.
    pub fn is_subtype_of(self, other: EventType) -> bool {
        EVENT_TYPES.descends_from(self.0, other.0)
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventType({})", self.name())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier for a subscriber's concrete type, with the same inheritance
/// model as [`EventType`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberType(TypeToken);

impl SubscriberType {
    /// Defines a new root subscriber type.
    pub fn define(name: &'static str) -> Self {
        SubscriberType(SUBSCRIBER_TYPES.define(name, None))
    }

    /// Defines a new subscriber type as a subtype of `parent`.
    pub fn extend(name: &'static str, parent: SubscriberType) -> Self {
        SubscriberType(SUBSCRIBER_TYPES.define(name, Some(parent.0)))
    }

    /// Declares a handler for `event_type` on this subscriber type and
    /// returns the type for chaining.
    ///
    /// Must run before instances of the type register with a bus. Declaring
    /// a second handler for the same event type overwrites the first.
    pub fn on(self, event_type: EventType, handler: Handler) -> Self {
        subscription::declare(self, event_type, handler);
        self
    }

    /// The name this type was defined with.
    pub fn name(self) -> &'static str {
        SUBSCRIBER_TYPES.name(self.0)
    }

    /// The direct parent type, if any.
    pub fn parent(self) -> Option<SubscriberType> {
        SUBSCRIBER_TYPES.parent(self.0).map(SubscriberType)
    }

    /// This type followed by its ancestors, most specific first.
    pub fn ancestors(self) -> Vec<SubscriberType> {
        SUBSCRIBER_TYPES
            .chain(self.0)
            .into_iter()
            .map(SubscriberType)
            .collect()
    }

    /// Whether `self` is `other` or one of its subtypes.
    pub fn is_subtype_of(self, other: SubscriberType) -> bool {
        SUBSCRIBER_TYPES.descends_from(self.0, other.0)
    }
}

impl fmt::Debug for SubscriberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriberType({})", self.name())
    }
}

impl fmt::Display for SubscriberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
