//! Immutable state container and typed paths.
//!
//! [`Immutable`] is the snapshot type every component state is stored in.
//! [`Lens`] addresses a location inside a snapshot so it can be read,
//! replaced or updated without touching anything else.

mod error;
mod immutable;
mod lens;

pub use error::PathError;
pub use immutable::Immutable;
pub use lens::{Key, KeyPath, Lens};
