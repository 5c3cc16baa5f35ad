//! Domain Policies
//!
//! Business rules that govern who may do what.
//! These are pure functions over identities and ownership.

mod authorization;

pub use authorization::{Action, AuthorizationPolicy};
