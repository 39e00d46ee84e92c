use std::any::Any;

use crate::hierarchy::SubscriberType;

/// A subscriber instance that can be registered with an
/// [`EventBus`](crate::EventBus).
///
/// The reported [`SubscriberType`] links the instance to the handlers its
/// type declared; the bus walks that type's chain when resolving which
/// handler receives an event. Handlers take `&self` receivers, so state a
/// handler mutates lives behind interior mutability (an atomic, a `Mutex`).
pub trait Subscribe: Any + Send + Sync {
    /// The subscriber type this instance belongs to.
    fn subscriber_type(&self) -> SubscriberType;

    /// The instance as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Name used in logs. Defaults to the registered type name.
    fn name(&self) -> &'static str {
        self.subscriber_type().name()
    }
}

impl dyn Subscribe {
    /// Downcasts the subscriber to a concrete type.
    pub fn downcast_ref<T: Subscribe>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
