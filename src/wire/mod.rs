//! JSON shapes exchanged with the Tracker service.
//!
//! Responses mark every field the service may leave out as optional;
//! [`crate::mapper`] turns them into domain entities. Requests skip unset
//! fields so the service keeps its own defaults for them.

mod membership;
mod project;
mod story;

pub use membership::*;
pub use project::*;
pub use story::*;
