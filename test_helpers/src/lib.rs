//! Test helpers shared across crates in the discovery-bootstrap workspace.
//!
//! - [`jail`] wraps `figment::Jail` so fixtures run in an isolated working
//!   directory with scoped environment variables.
//! - [`properties`] renders and writes `.properties` fixtures.

pub mod jail;
pub mod properties;
