//! Flying entities
//!
//! Everything that crosses the screen in the shooter (enemy planes, debris,
//! pickups) is a [`Flyer`] built from a named template. The host loop keeps
//! them in a [`Fleet`] and ticks them once per frame.

pub mod animation;
pub mod bounds;
pub mod entity;
pub mod error;
pub mod fleet;
pub mod health;

pub use animation::Animation;
pub use bounds::{BoundaryState, BoundaryTracker, PlayArea};
pub use entity::{DeathHook, Flyer, Rotation, DEFAULT_ROTATION_SPEED};
pub use error::FlyerError;
pub use fleet::{Fleet, FleetReport};
pub use health::Health;
