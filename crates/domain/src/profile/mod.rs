//! User profile record: presentation and directory data for one user.
//!
//! A profile stream shares its identity with the user it describes, so the
//! profile of a known user can be loaded without a lookup table.

mod aggregate;
mod events;
mod service;
mod value_objects;

pub use aggregate::UserProfile;
pub use events::ProfileEvent;
pub use service::{CreateProfile, ProfileFieldUpdate, ProfileService};
pub use value_objects::{AvatarUrl, Biography, Department, DisplayName, JobTitle, Location};
