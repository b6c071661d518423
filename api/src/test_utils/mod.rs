//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The mocks implement the upstream ports in memory so services and
//! routers can be exercised without network access.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
