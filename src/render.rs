//! macroquad backend
//!
//! [`MacroquadScene`] maps the play area onto the window (letterboxed, aspect
//! preserved) and draws with `draw_texture_ex`. [`TextureCache`] owns every
//! loaded sprite; flyers only hold cheap `Texture2D` handles into it.

use std::collections::HashMap;

use log::{info, warn};
use macroquad::prelude::*;

use crate::flyer::PlayArea;
use crate::scene::{ImageResolver, ResolveError, RotatedDraw, Scene};

/// Size of the stand-in texture used when an image file fails to load
pub const PLACEHOLDER_SIZE: u16 = 32;

/// Play area -> screen mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen position of the play area's origin
    pub origin: Vec2,
    /// Screen pixels per play-area unit
    pub scale: f32,
}

impl Viewport {
    /// Largest aspect-correct fit of `area` centred in a `screen_w` x `screen_h` window
    pub fn fit(area: PlayArea, screen_w: f32, screen_h: f32) -> Self {
        if area.width <= 0.0 || area.height <= 0.0 {
            return Self { origin: Vec2::ZERO, scale: 1.0 };
        }
        let scale = (screen_w / area.width).min(screen_h / area.height);
        let origin = vec2(
            (screen_w - area.width * scale) * 0.5,
            (screen_h - area.height * scale) * 0.5,
        );
        Self { origin, scale }
    }

    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        self.origin + p * self.scale
    }

    pub fn rect_to_screen(&self, r: Rect) -> Rect {
        let p = self.to_screen(vec2(r.x, r.y));
        Rect::new(p.x, p.y, r.w * self.scale, r.h * self.scale)
    }
}

/// Draws into the current macroquad frame
pub struct MacroquadScene {
    area: PlayArea,
    viewport: Viewport,
    pub tint: Color,
}

impl MacroquadScene {
    pub fn new(area: PlayArea) -> Self {
        Self {
            area,
            viewport: Viewport::fit(area, screen_width(), screen_height()),
            tint: WHITE,
        }
    }

    /// Refit to the window and paint the background and letterbox bars
    pub fn begin_frame(&mut self, background: Color) {
        self.viewport = Viewport::fit(self.area, screen_width(), screen_height());
        clear_background(Color::from_rgba(10, 10, 12, 255));
        let bg = self
            .viewport
            .rect_to_screen(Rect::new(0.0, 0.0, self.area.width, self.area.height));
        draw_rectangle(bg.x, bg.y, bg.w, bg.h, background);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Scene for MacroquadScene {
    type Image = Texture2D;

    fn draw(&mut self, image: &Texture2D, dest: Rect) {
        let d = self.viewport.rect_to_screen(dest);
        draw_texture_ex(
            image,
            d.x,
            d.y,
            self.tint,
            DrawTextureParams {
                dest_size: Some(vec2(d.w, d.h)),
                ..Default::default()
            },
        );
    }

    fn draw_region(&mut self, image: &Texture2D, source: Rect, dest: Rect) {
        let d = self.viewport.rect_to_screen(dest);
        draw_texture_ex(
            image,
            d.x,
            d.y,
            self.tint,
            DrawTextureParams {
                dest_size: Some(vec2(d.w, d.h)),
                source: Some(source),
                ..Default::default()
            },
        );
    }

    fn rotate_draw(&mut self, draw: RotatedDraw<'_, Texture2D>) {
        let pivot = self.viewport.to_screen(draw.pivot);
        let s = self.viewport.scale;
        draw_texture_ex(
            draw.image,
            pivot.x + draw.dest.x * s,
            pivot.y + draw.dest.y * s,
            self.tint,
            DrawTextureParams {
                dest_size: Some(vec2(draw.dest.w * s, draw.dest.h * s)),
                rotation: draw.angle.to_radians(),
                pivot: Some(pivot),
                ..Default::default()
            },
        );
    }
}

/// Loaded sprites keyed by image key
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `key -> path` entry.
    ///
    /// A file that fails to load is replaced by a magenta placeholder so the
    /// key still resolves.
    pub async fn load_all(images: &HashMap<String, String>) -> Self {
        let mut cache = Self::new();
        let mut keys: Vec<&String> = images.keys().collect();
        keys.sort();

        for key in keys {
            let path = &images[key];
            let texture = match load_texture(path).await {
                Ok(tex) => tex,
                Err(e) => {
                    warn!("failed to load image '{}' from {}: {}, using placeholder", key, path, e);
                    placeholder_texture()
                }
            };
            texture.set_filter(FilterMode::Nearest);
            cache.insert(key.clone(), texture);
        }
        info!("loaded {} images", cache.len());
        cache
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.textures.insert(key.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl ImageResolver for TextureCache {
    type Image = Texture2D;

    fn resolve_image(&self, key: &str) -> Result<Texture2D, ResolveError> {
        self.textures
            .get(key)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownKey(key.to_string()))
    }
}

fn placeholder_texture() -> Texture2D {
    Texture2D::from_image(&Image::gen_image_color(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        MAGENTA,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_wide_window() {
        // 800x600 into 1600x900: height-limited, bars left and right
        let vp = Viewport::fit(PlayArea::new(800.0, 600.0), 1600.0, 900.0);
        assert_relative_eq!(vp.scale, 1.5);
        assert_relative_eq!(vp.origin.x, 200.0);
        assert_relative_eq!(vp.origin.y, 0.0);
    }

    #[test]
    fn test_fit_tall_window() {
        let vp = Viewport::fit(PlayArea::new(800.0, 600.0), 400.0, 600.0);
        assert_relative_eq!(vp.scale, 0.5);
        assert_relative_eq!(vp.origin.x, 0.0);
        assert_relative_eq!(vp.origin.y, 150.0);
    }

    #[test]
    fn test_fit_degenerate_area() {
        let vp = Viewport::fit(PlayArea::new(0.0, 600.0), 400.0, 600.0);
        assert_eq!(vp, Viewport { origin: Vec2::ZERO, scale: 1.0 });
    }

    #[test]
    fn test_rect_to_screen() {
        let vp = Viewport { origin: vec2(10.0, 20.0), scale: 2.0 };
        let r = vp.rect_to_screen(Rect::new(5.0, 5.0, 4.0, 3.0));
        assert_eq!(r, Rect::new(20.0, 30.0, 8.0, 6.0));
    }

    #[test]
    fn test_empty_cache_rejects_keys() {
        let cache = TextureCache::new();
        assert!(cache.is_empty());
        assert!(matches!(
            cache.resolve_image("plane"),
            Err(ResolveError::UnknownKey(key)) if key == "plane"
        ));
    }
}
