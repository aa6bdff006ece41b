//! Domain entities for Pivotal Tracker resources.
//!
//! # Core Concepts
//!
//! - [`Project`]: Top-level container of stories, with its [`Membership`]s and
//!   [`Integration`]s.
//! - [`Story`]: A unit of work in a project, carrying its [`Label`]s,
//!   [`Note`]s, [`Attachment`]s and [`Task`]s.
//! - [`Membership`]: A [`Person`]'s role in a project.
//!
//! Entities are plain data. Identifiers are assigned by the server; an id of
//! `0` means the entity has not been created remotely. Nested collections are
//! never absent, only empty.
//!
//! [`ProjectDraft`] and [`StoryDraft`] hold the state of a resource being
//! built for creation, where every field may still be unset.

mod membership;
mod note;
mod project;
mod story;
mod task;

pub use membership::*;
pub use note::*;
pub use project::*;
pub use story::*;
pub use task::*;
