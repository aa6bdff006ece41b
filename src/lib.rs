//! Fluent async client for the Pivotal Tracker REST API.
//!
//! Start from a [`Tracker`] root and navigate down:
//!
//! ```no_run
//! # async fn demo() -> pivotal_fluent::Result<()> {
//! use pivotal_fluent::{StoryType, Tracker};
//!
//! let tracker = Tracker::connect("token", pivotal_fluent::credential::DEFAULT_BASE_URL)?;
//! let story = tracker
//!     .projects()
//!     .get(42)
//!     .await?
//!     .stories()
//!     .create()
//!     .set_name("Write the release notes")
//!     .set_type(StoryType::Chore)
//!     .save()
//!     .await?;
//! story.update(|s| s.description = "Due Friday".into()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod wire;

pub use config::Config;
pub use credential::Credential;
pub use dispatch::{Dispatcher, Payload, RetryPolicy, Verb};
pub use error::{Error, Result};
pub use facade::{
    Child, MembershipsFacade, Node, ProjectCreateFacade, ProjectFacade, ProjectStoriesFacade,
    ProjectsFacade, StoriesFacade, StoryCreationFacade, StoryFacade, StoryParent, Tracker,
};
pub use models::*;
