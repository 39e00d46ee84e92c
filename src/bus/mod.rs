//! The dispatch engine.
//!
//! [`EventBus`] indexes subscriber instances per event type, fans published
//! events out along the event's type chain, and replays retained sticky
//! instances to late registrants. Dispatch is direct call/return on the
//! publisher's thread: no queue, no backpressure, no delivery guarantee
//! beyond the synchronous calls made before `publish` returns.

mod event_bus;

pub use event_bus::EventBus;
