//! The flying entity
//!
//! A [`Flyer`] starts out unloaded. [`Flyer::load`] takes a snapshot of a
//! named template, resolves its sprite or animation and sets its health.
//! From then on the host calls [`Flyer::update`] once per frame: a running
//! flyer draws itself, a destroyed one fires its death hook, and either way
//! the boundary tracker decides whether it has left the play area for good.

use log::debug;
use macroquad::math::{Rect, Vec2};
use rand::seq::SliceRandom;
use rand::Rng;

use super::animation::Animation;
use super::bounds::{BoundaryTracker, PlayArea};
use super::error::FlyerError;
use super::health::Health;
use crate::config::{Config, ImageKey, ModuleData};
use crate::scene::{ImageResolver, RotatedDraw, Scene};

/// Called when a flyer's health runs out
pub type DeathHook = Box<dyn FnOnce()>;

/// Rotation speed used when rotation is switched on without one
pub const DEFAULT_ROTATION_SPEED: f32 = 2.0;

/// Rotated-draw mode state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub enabled: bool,
    /// Degrees per frame
    pub speed: f32,
    /// Current angle in degrees, kept in `[0, 360)`
    pub angle: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: DEFAULT_ROTATION_SPEED,
            angle: 0.0,
        }
    }
}

impl Rotation {
    fn step(&mut self) -> f32 {
        self.angle = (self.angle + self.speed).rem_euclid(360.0);
        self.angle
    }
}

/// Everything that only exists once a template has been loaded
struct LoadedFlyer<I> {
    key: String,
    template: ModuleData,
    image: Option<I>,
    animation: Option<Animation<I>>,
    health: Health,
    area: PlayArea,
    bounds: BoundaryTracker,
}

enum FlyerState<I> {
    Unloaded,
    Loaded(Box<LoadedFlyer<I>>),
}

pub struct Flyer<I> {
    speed_factor: f32,
    running: bool,
    dead: bool,
    rotation: Rotation,
    on_death: Option<DeathHook>,
    state: FlyerState<I>,
}

impl<I: Clone> Flyer<I> {
    pub fn new() -> Self {
        Self {
            speed_factor: 1.0,
            running: true,
            dead: false,
            rotation: Rotation::default(),
            on_death: None,
            state: FlyerState::Unloaded,
        }
    }

    /// Load the template `key`, picking from image lists with the thread RNG
    pub fn load<R>(
        &mut self,
        config: &Config,
        resolver: &R,
        key: &str,
        on_death: Option<DeathHook>,
    ) -> Result<(), FlyerError>
    where
        R: ImageResolver<Image = I>,
    {
        self.load_with_rng(config, resolver, key, on_death, &mut rand::thread_rng())
    }

    /// Load the template `key`.
    ///
    /// On error the flyer is left as it was before the call.
    pub fn load_with_rng<R, G>(
        &mut self,
        config: &Config,
        resolver: &R,
        key: &str,
        on_death: Option<DeathHook>,
        rng: &mut G,
    ) -> Result<(), FlyerError>
    where
        R: ImageResolver<Image = I>,
        G: Rng + ?Sized,
    {
        let template = config
            .template(key)
            .cloned()
            .ok_or_else(|| FlyerError::TemplateNotFound { key: key.to_string() })?;

        let image = match &template.img {
            None => None,
            Some(ImageKey::Single(img)) => Some(resolver.resolve_image(img)?),
            Some(ImageKey::Choice(imgs)) => {
                let img = imgs
                    .choose(rng)
                    .ok_or_else(|| FlyerError::EmptyImageList { key: key.to_string() })?;
                Some(resolver.resolve_image(img)?)
            }
        };

        let animation = match (&template.animation, &image) {
            (None, _) => None,
            (Some(descriptor), Some(image)) => Some(Animation::new(descriptor, image.clone())),
            (Some(_), None) => {
                return Err(FlyerError::AnimationWithoutImage { key: key.to_string() });
            }
        };

        let health = match template.life {
            Some(life) if life <= 0 => {
                return Err(FlyerError::InvalidLife { key: key.to_string(), life });
            }
            Some(life) => Health::new(life),
            None => Health::default(),
        };

        let mut rotation = Rotation::default();
        if let Some(speed) = template.rotation_speed {
            rotation.enabled = true;
            rotation.speed = speed;
        }

        debug!(
            "loaded flyer '{}' at ({}, {}) life {}",
            key, template.x, template.y, health.life
        );

        self.running = true;
        self.dead = false;
        self.rotation = rotation;
        self.on_death = on_death;
        self.state = FlyerState::Loaded(Box::new(LoadedFlyer {
            key: key.to_string(),
            template,
            image,
            animation,
            health,
            area: config.play_area(),
            bounds: BoundaryTracker::new(),
        }));
        Ok(())
    }

    /// Per-frame tick: draw (or run death handling), then check the bounds
    pub fn update<S>(&mut self, scene: &mut S) -> Result<(), FlyerError>
    where
        S: Scene<Image = I>,
    {
        if self.dead {
            return Ok(());
        }
        if self.running {
            self.draw(scene)?;
        } else {
            self.die();
        }
        self.check_bounds()
    }

    /// Take damage. Zero counts as one point; at zero life the flyer stops.
    pub fn hurt(&mut self, damage: u32) -> Result<(), FlyerError> {
        let loaded = self.loaded_mut()?;
        if loaded.health.damage(damage) {
            self.running = false;
        }
        Ok(())
    }

    fn draw<S>(&mut self, scene: &mut S) -> Result<(), FlyerError>
    where
        S: Scene<Image = I>,
    {
        let FlyerState::Loaded(loaded) = &mut self.state else {
            return Err(FlyerError::Uninitialized);
        };
        let LoadedFlyer {
            template: t,
            image,
            animation,
            ..
        } = &mut **loaded;

        if self.rotation.enabled {
            let angle = self.rotation.step();
            if let Some(image) = image {
                scene.rotate_draw(RotatedDraw {
                    angle,
                    pivot: Vec2::new(t.x + t.w / 2.0, t.y + t.h / 2.0),
                    image,
                    dest: Rect::new(-t.w / 2.0, -t.h / 2.0, t.w, t.h),
                });
            }
        } else if let Some(animation) = animation {
            animation.play(scene, Rect::new(t.x, t.y, t.w, t.h));
        } else if let Some(image) = image {
            scene.draw(image, Rect::new(t.x, t.y, t.w, t.h));
        }
        Ok(())
    }

    fn die(&mut self) {
        if let Some(hook) = self.on_death.take() {
            debug!("flyer '{}' destroyed", self.key().unwrap_or("?"));
            hook();
        }
    }

    fn check_bounds(&mut self) -> Result<(), FlyerError> {
        let loaded = self.loaded_mut()?;
        let t = &loaded.template;
        if loaded.bounds.observe(&loaded.area, t.x, t.y, t.w, t.h) {
            debug!("flyer '{}' left the play area at ({}, {})", loaded.key, t.x, t.y);
            self.dead = true;
        }
        Ok(())
    }

    fn loaded(&self) -> Result<&LoadedFlyer<I>, FlyerError> {
        match &self.state {
            FlyerState::Loaded(loaded) => Ok(&**loaded),
            FlyerState::Unloaded => Err(FlyerError::Uninitialized),
        }
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedFlyer<I>, FlyerError> {
        match &mut self.state {
            FlyerState::Loaded(loaded) => Ok(&mut **loaded),
            FlyerState::Unloaded => Err(FlyerError::Uninitialized),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, FlyerState::Loaded(_))
    }

    /// Alive and active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Left the play area after having been inside it; the host should drop it
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn has_entered_bounds(&self) -> bool {
        self.loaded().map(|l| l.bounds.has_entered()).unwrap_or(false)
    }

    pub fn key(&self) -> Result<&str, FlyerError> {
        Ok(&self.loaded()?.key)
    }

    pub fn life(&self) -> Result<i32, FlyerError> {
        Ok(self.loaded()?.health.life)
    }

    pub fn max_life(&self) -> Result<i32, FlyerError> {
        Ok(self.loaded()?.health.max_life)
    }

    pub fn image(&self) -> Option<&I> {
        self.loaded().ok()?.image.as_ref()
    }

    pub fn animation(&self) -> Option<&Animation<I>> {
        self.loaded().ok()?.animation.as_ref()
    }

    pub fn template(&self) -> Result<&ModuleData, FlyerError> {
        Ok(&self.loaded()?.template)
    }

    pub fn template_mut(&mut self) -> Result<&mut ModuleData, FlyerError> {
        Ok(&mut self.loaded_mut()?.template)
    }

    pub fn position(&self) -> Result<Vec2, FlyerError> {
        let t = self.template()?;
        Ok(Vec2::new(t.x, t.y))
    }

    pub fn set_position(&mut self, x: f32, y: f32) -> Result<(), FlyerError> {
        let t = self.template_mut()?;
        t.x = x;
        t.y = y;
        Ok(())
    }

    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), FlyerError> {
        let t = self.template_mut()?;
        t.x += dx;
        t.y += dy;
        Ok(())
    }

    /// Motion multiplier; movers scale their steps by it
    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn set_speed_factor(&mut self, factor: f32) {
        self.speed_factor = factor;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn angle(&self) -> f32 {
        self.rotation.angle
    }

    pub fn set_rotation(&mut self, enabled: bool, speed: f32) {
        self.rotation.enabled = enabled;
        self.rotation.speed = speed;
    }

    /// Destination rectangle for a plain draw, or relative to the centre
    /// pivot when `rotated`
    pub fn draw_rect(&self, rotated: bool) -> Result<Rect, FlyerError> {
        let t = self.template()?;
        Ok(if rotated {
            Rect::new(-t.w / 2.0, -t.h / 2.0, t.w, t.h)
        } else {
            Rect::new(t.x, t.y, t.w, t.h)
        })
    }
}

impl<I: Clone> Default for Flyer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> std::fmt::Debug for Flyer<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match &self.state {
            FlyerState::Loaded(loaded) => Some(loaded.key.as_str()),
            FlyerState::Unloaded => None,
        };
        f.debug_struct("Flyer")
            .field("key", &key)
            .field("running", &self.running)
            .field("dead", &self.dead)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
