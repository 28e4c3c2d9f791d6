//! Flying entities for a 2D arcade shooter.
//!
//! A [`Flyer`] is built from a named template in the [`Config`], draws itself
//! through a [`Scene`] every frame and expires once it has crossed the play
//! area. The macroquad backend lives in [`render`].

pub mod config;
pub mod flyer;
pub mod logging;
pub mod render;
pub mod scene;

pub use config::{AnimationDescriptor, Config, ConfigError, GameSettings, ImageKey, ModuleData};
pub use flyer::{DeathHook, Fleet, FleetReport, Flyer, FlyerError, PlayArea};
pub use logging::init as init_logging;
pub use render::{MacroquadScene, TextureCache};
pub use scene::{ImageResolver, ResolveError, RotatedDraw, Scene};
