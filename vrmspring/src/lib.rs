//! Pure Rust spring-bone runtime for VRM avatar secondary animation
//! (unofficial).
//!
//! Animates dangling bone chains (hair, cloth, accessories) with a
//! damped rotational spring simulation plus sphere-collider resolution.
//! This crate is renderer-agnostic and owns no asset I/O beyond the
//! feature-gated helpers for pulling the spring-bone description out of a
//! glTF document.

#![forbid(unsafe_code)]

mod error;
mod model;
mod normalize;
mod registry;
mod runtime;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "glb")]
pub mod glb;

pub use error::*;
pub use model::*;
pub use normalize::*;
pub use registry::*;
pub use runtime::*;


#[cfg(test)]
mod registry_tests;
