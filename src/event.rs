use std::any::Any;

use crate::hierarchy::EventType;

/// A value that can be published on an [`EventBus`](crate::EventBus).
///
/// Implementors report the [`EventType`] they were defined under; the bus
/// uses that type's chain to find interested subscribers. [`as_any`] backs
/// [`downcast_ref`](dyn Event::downcast_ref) so handlers can recover the
/// concrete value.
///
/// [`as_any`]: Event::as_any
pub trait Event: Any + Send + Sync {
    /// The event type this instance belongs to.
    fn event_type(&self) -> EventType;

    /// The instance as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Event {
    /// Downcasts the event to a concrete type.
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether this instance's type is `event_type` or one of its subtypes.
    ///
    /// This is the matching rule sticky replay applies against history.
    pub fn is_instance_of(&self, event_type: EventType) -> bool {
        self.event_type().is_subtype_of(event_type)
    }
}
