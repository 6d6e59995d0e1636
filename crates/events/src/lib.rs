//! Change notifications for entity collections.
//!
//! Stores publish a [`CollectionChange`] on an [`EventBus`] after every successful
//! write; callers that need a live view of a collection subscribe to it instead of
//! polling.

pub mod bus;
pub mod change;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use change::CollectionChange;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
