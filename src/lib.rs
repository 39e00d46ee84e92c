//! # stickybus
//!
//! An in-process publish/subscribe event bus: subscribers register interest
//! in event types (including supertypes, via a single-inheritance type
//! hierarchy), publishers emit instances, and the bus dispatches each event
//! to every interested subscriber synchronously. Event types marked
//! *sticky* have their published instances retained and replayed to
//! subscribers that register later.
//!
//! ## Model
//!
//! - [`EventType`] / [`SubscriberType`]: interned type tokens with
//!   single-parent inheritance, defined once at startup.
//! - [`SubscriberType::on`]: declares a [`Handler`] for one event type on
//!   one subscriber type, shared by every instance of that type.
//! - [`mark_sticky`]: marks an event type for retention and replay.
//! - [`EventBus`]: the dispatcher. Register instances in bulk (every
//!   declared event type) or targeted (one explicit event type), publish,
//!   unregister.
//!
//! Dispatch is strictly call/return on the publisher's thread. A handler
//! may re-enter the bus (publish, register, unregister); the bus never
//! holds a lock while a handler runs.
//!
//! ## Example
//!
//! ```
//! use std::any::Any;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::{Arc, LazyLock};
//!
//! use stickybus::{mark_sticky, Event, EventBus, EventType, Subscribe, SubscriberType};
//!
//! static PING: LazyLock<EventType> = LazyLock::new(|| EventType::define("Ping"));
//!
//! struct Ping {
//!     message: String,
//! }
//!
//! impl Event for Ping {
//!     fn event_type(&self) -> EventType {
//!         *PING
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! static PING_LISTENER: LazyLock<SubscriberType> =
//!     LazyLock::new(|| SubscriberType::define("PingListener").on(*PING, PingListener::on_ping));
//!
//! struct PingListener {
//!     received: AtomicBool,
//! }
//!
//! impl PingListener {
//!     fn on_ping(subscriber: &dyn Subscribe, event: &dyn Event) {
//!         if let (Some(listener), Some(ping)) = (
//!             subscriber.downcast_ref::<PingListener>(),
//!             event.downcast_ref::<Ping>(),
//!         ) {
//!             println!("ping: {}", ping.message);
//!             listener.received.store(true, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! impl Subscribe for PingListener {
//!     fn subscriber_type(&self) -> SubscriberType {
//!         *PING_LISTENER
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! fn main() -> Result<(), stickybus::BusError> {
//!     mark_sticky(*PING);
//!
//!     let bus = EventBus::new();
//!     bus.publish(Arc::new(Ping { message: "hi".into() }))?;
//!
//!     // Registering after the publish still delivers the sticky instance.
//!     let listener: Arc<dyn Subscribe> = Arc::new(PingListener {
//!         received: AtomicBool::new(false),
//!     });
//!     bus.register(&listener)?;
//!
//!     assert!(listener
//!         .downcast_ref::<PingListener>()
//!         .unwrap()
//!         .received
//!         .load(Ordering::SeqCst));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod event;
mod hierarchy;
mod subscriber;
mod subscription;

pub use bus::EventBus;
pub use error::BusError;
pub use event::Event;
pub use hierarchy::{EventType, SubscriberType};
pub use subscriber::Subscribe;
pub use subscription::{is_sticky, mark_sticky, Handler};
