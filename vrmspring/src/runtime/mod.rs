mod collider;
mod controller;
mod hierarchy;
mod spring;

pub use collider::*;
pub use controller::*;
pub use hierarchy::*;
pub use spring::*;

#[cfg(test)]
mod hierarchy_tests;

#[cfg(test)]
mod collider_tests;
