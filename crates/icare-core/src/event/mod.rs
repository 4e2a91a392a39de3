//! Abnormal event module.
//!
//! - `model`: events, sources and statuses
//! - `lifecycle`: event creation and the transition policy
//! - `views`: grouping and ordering for display

mod lifecycle;
mod model;
pub mod views;

pub use lifecycle::{DEFAULT_RESOLVE_NOTE, EventAction, EventLifecycle, TransitionPolicy};
pub use model::{AbnormalEvent, EventSource, EventStatus};
pub use views::EventGroups;
