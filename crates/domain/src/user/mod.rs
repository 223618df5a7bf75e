//! User record: an account inside a tenant.

mod aggregate;
mod events;
mod service;
mod value_objects;

pub use aggregate::User;
pub use events::UserEvent;
pub use service::{CreateUser, UserFieldUpdate, UserService};
pub use value_objects::{Email, PhoneNumber, UserStatus};
