//! Users domain module.
//!
//! The `User` entity, the events emitted over its lifecycle, and the service
//! implementing the `Users` contract.

pub mod event;
pub mod service;
pub mod user;

pub use event::{UserDeleted, UserEvent, UserRegistered};
pub use service::UserService;
pub use user::{User, UserConfig, UserId, with_email, with_first_name, with_last_name};
