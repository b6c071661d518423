//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `registry`: The feed registry state machine

pub mod entities;
pub mod ports;
pub mod registry;

pub use registry::{filter_descriptors, FeedRegistry};
