//! Application events
//!
//! Side effects that must not block a request, such as sending emails, are
//! published on a bounded channel and handled by an [`EventWorker`] task.

mod bus;
mod types;
mod worker;

pub use bus::EventBus;
pub use types::AppEvent;
pub use worker::EventWorker;
