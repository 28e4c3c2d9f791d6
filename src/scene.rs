//! Draw surface and image lookup
//!
//! Flyers never talk to macroquad directly. They draw through a [`Scene`]
//! and get their sprites from an [`ImageResolver`], so game logic can be
//! exercised without a window. The macroquad implementations live in
//! `render`.

use macroquad::math::{Rect, Vec2};
use thiserror::Error;

/// A rotated blit around a pivot point
#[derive(Debug, Clone, Copy)]
pub struct RotatedDraw<'a, I> {
    /// Rotation in degrees
    pub angle: f32,
    /// Rotation centre in screen space
    pub pivot: Vec2,
    pub image: &'a I,
    /// Destination rectangle relative to the pivot
    pub dest: Rect,
}

/// Frame-buffer abstraction flyers draw into
pub trait Scene {
    type Image;

    /// Draw the whole image stretched to `dest`
    fn draw(&mut self, image: &Self::Image, dest: Rect);

    /// Draw the `source` region of the image stretched to `dest`
    fn draw_region(&mut self, image: &Self::Image, source: Rect, dest: Rect);

    fn rotate_draw(&mut self, draw: RotatedDraw<'_, Self::Image>);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown image key '{0}'")]
    UnknownKey(String),
}

/// Maps symbolic image keys to shared image handles
pub trait ImageResolver {
    type Image: Clone;

    fn resolve_image(&self, key: &str) -> Result<Self::Image, ResolveError>;
}

#[cfg(test)]
pub mod testing {
    //! Window-free doubles for the scene and resolver

    use super::*;
    use std::collections::HashMap;

    /// Image stand-in: just the key it was resolved from
    pub type TestImage = String;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Draw { image: TestImage, dest: Rect },
        Region { image: TestImage, source: Rect, dest: Rect },
        Rotated { image: TestImage, angle: f32, pivot: Vec2, dest: Rect },
    }

    /// Scene that records every call
    #[derive(Debug, Default)]
    pub struct RecordingScene {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingScene {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last(&self) -> Option<&DrawCall> {
            self.calls.last()
        }
    }

    impl Scene for RecordingScene {
        type Image = TestImage;

        fn draw(&mut self, image: &TestImage, dest: Rect) {
            self.calls.push(DrawCall::Draw { image: image.clone(), dest });
        }

        fn draw_region(&mut self, image: &TestImage, source: Rect, dest: Rect) {
            self.calls.push(DrawCall::Region { image: image.clone(), source, dest });
        }

        fn rotate_draw(&mut self, draw: RotatedDraw<'_, TestImage>) {
            self.calls.push(DrawCall::Rotated {
                image: draw.image.clone(),
                angle: draw.angle,
                pivot: draw.pivot,
                dest: draw.dest,
            });
        }
    }

    /// Resolver over a fixed set of keys; the handle is "img:<key>"
    #[derive(Debug, Default)]
    pub struct KeyResolver {
        known: HashMap<String, TestImage>,
    }

    impl KeyResolver {
        pub fn with_keys(keys: &[&str]) -> Self {
            Self {
                known: keys
                    .iter()
                    .map(|k| (k.to_string(), format!("img:{}", k)))
                    .collect(),
            }
        }
    }

    impl ImageResolver for KeyResolver {
        type Image = TestImage;

        fn resolve_image(&self, key: &str) -> Result<TestImage, ResolveError> {
            self.known
                .get(key)
                .cloned()
                .ok_or_else(|| ResolveError::UnknownKey(key.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_key_resolver() {
        let resolver = KeyResolver::with_keys(&["a"]);
        assert_eq!(resolver.resolve_image("a").unwrap(), "img:a");
        assert_eq!(
            resolver.resolve_image("b"),
            Err(ResolveError::UnknownKey("b".into()))
        );
    }

    #[test]
    fn test_recording_scene() {
        let mut scene = RecordingScene::new();
        let image = "img:a".to_string();
        scene.draw(&image, Rect::new(1.0, 2.0, 3.0, 4.0));
        scene.rotate_draw(RotatedDraw {
            angle: 90.0,
            pivot: Vec2::new(5.0, 5.0),
            image: &image,
            dest: Rect::new(-2.0, -2.0, 4.0, 4.0),
        });
        assert_eq!(scene.calls.len(), 2);
        assert!(matches!(scene.last(), Some(DrawCall::Rotated { angle, .. }) if *angle == 90.0));
    }
}
