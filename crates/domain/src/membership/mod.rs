//! Membership record: one user's role inside one tenant.

mod aggregate;
mod events;
mod service;
mod value_objects;

pub use aggregate::Membership;
pub use events::MembershipEvent;
pub use service::{AddMember, MemberCount, MembershipService};
pub use value_objects::MemberRole;
