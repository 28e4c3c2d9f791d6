//! Sprite-strip animation player
//!
//! Owns its own frame timing: the flyer only calls [`Animation::play`] once
//! per frame with the rectangle to draw into.

use macroquad::math::Rect;

use crate::config::AnimationDescriptor;
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct Animation<I> {
    image: I,
    frames: u32,
    frame_width: f32,
    frame_height: f32,
    ticks_per_frame: u32,
    looping: bool,
    /// Index of the frame drawn by the next `play`
    frame: u32,
    /// Ticks the current frame has already been shown
    ticks: u32,
}

impl<I> Animation<I> {
    pub fn new(descriptor: &AnimationDescriptor, image: I) -> Self {
        Self {
            image,
            frames: descriptor.frames.max(1),
            frame_width: descriptor.frame_width,
            frame_height: descriptor.frame_height,
            ticks_per_frame: descriptor.ticks_per_frame.max(1),
            looping: descriptor.looping,
            frame: 0,
            ticks: 0,
        }
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// A non-looping animation that is holding its last frame
    pub fn is_finished(&self) -> bool {
        !self.looping && self.frame == self.frames - 1 && self.ticks >= self.ticks_per_frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.ticks = 0;
    }

    /// Source rectangle of the current frame in the strip
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            self.frame as f32 * self.frame_width,
            0.0,
            self.frame_width,
            self.frame_height,
        )
    }

    /// Draw the current frame into `dest`, then advance
    pub fn play<S: Scene<Image = I>>(&mut self, scene: &mut S, dest: Rect) {
        scene.draw_region(&self.image, self.source_rect(), dest);
        self.advance();
    }

    fn advance(&mut self) {
        if self.is_finished() {
            return;
        }
        self.ticks += 1;
        if self.ticks < self.ticks_per_frame {
            return;
        }
        if self.frame + 1 < self.frames {
            self.frame += 1;
            self.ticks = 0;
        } else if self.looping {
            self.frame = 0;
            self.ticks = 0;
        }
        // Non-looping: stay on the last frame with ticks saturated
    }
}
