//! Who is using the client and which screen they are on

pub mod role;
pub mod router;

pub use role::{Action, Actor};
pub use router::{AppSession, View};
