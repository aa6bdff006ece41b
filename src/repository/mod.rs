//! Resource-level operations composed from the dispatcher and the mapper.
//!
//! A repository owns its [`crate::dispatch::Dispatcher`] and is created for a single facade
//! call. Repositories know the service's URL templates; they never call back
//! into facades.

mod membership;
mod project;
mod story;

pub use membership::MembershipRepository;
pub use project::ProjectRepository;
pub use story::StoryRepository;
