//! Authentication: the client session, the identity provider and Google sign-in.

pub mod google;
mod identity;
mod session;

pub use identity::{friendly_message, IdentityClient, IdentityProfile, IdentitySession};
pub use session::{Session, Teardown, Ticket};
