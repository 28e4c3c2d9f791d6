//! Game configuration
//!
//! Authored data for the shooter: play-area size, the image table the
//! texture cache loads from, and the named templates ("modules") every
//! flyer is built from. Stored as RON next to the other assets.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flyer::PlayArea;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "assets/skyraid.ron";

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Global game settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Play-area width in pixels
    pub width: f32,
    /// Play-area height in pixels
    pub height: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Sprite reference in a template: one key, or a list to pick from at random.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageKey {
    Single(String),
    Choice(Vec<String>),
}

fn default_ticks_per_frame() -> u32 {
    1
}

fn default_looping() -> bool {
    true
}

/// Sprite-strip animation parameters
///
/// Frames sit left to right in a single row of the template's image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    /// Number of frames in the strip
    pub frames: u32,
    /// Width of one frame in the source image
    pub frame_width: f32,
    /// Height of one frame in the source image
    pub frame_height: f32,
    /// How many `play` calls each frame stays on screen
    #[serde(default = "default_ticks_per_frame")]
    pub ticks_per_frame: u32,
    /// Restart after the last frame (otherwise hold it)
    #[serde(default = "default_looping")]
    pub looping: bool,
}

/// Template for one kind of flyer.
///
/// `x`/`y` is the live position once a flyer has taken its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleData {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub img: Option<ImageKey>,
    #[serde(default)]
    pub animation: Option<AnimationDescriptor>,
    #[serde(default)]
    pub life: Option<i32>,
    /// Enables rotated drawing at this many degrees per frame
    #[serde(default)]
    pub rotation_speed: Option<f32>,
}

impl ModuleData {
    /// Template with geometry only (no visuals, default life)
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            img: None,
            animation: None,
            life: None,
            rotation_speed: None,
        }
    }
}

/// The configuration registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameSettings,
    /// Image key -> file path, relative to the working directory
    #[serde(default)]
    pub images: HashMap<String, String>,
    /// Template key -> template
    #[serde(default)]
    pub modules: HashMap<String, ModuleData>,
}

impl Config {
    /// Load configuration from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(contents.parse()?)
    }

    /// Look up a template by key
    pub fn template(&self, key: &str) -> Option<&ModuleData> {
        self.modules.get(key)
    }

    /// Template keys in sorted order (HashMap order is unstable)
    pub fn template_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.game.width, self.game.height)
    }
}

impl FromStr for Config {
    type Err = ron::error::SpannedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"(
        game: (width: 640, height: 480),
        images: {
            "plane_a": "assets/images/plane_a.png",
            "plane_b": "assets/images/plane_b.png",
        },
        modules: {
            "scout": (x: 10, y: -40, w: 32, h: 32, img: Some("plane_a"), life: Some(3)),
            "mixed": (x: 0, y: 0, w: 16, h: 16, img: Some(["plane_a", "plane_b"])),
            "spinner": (
                x: 0, y: 0, w: 24, h: 24,
                img: Some("plane_b"),
                animation: Some((frames: 4, frame_width: 24, frame_height: 24)),
                rotation_speed: Some(5.0),
            ),
        },
    )"#;

    #[test]
    fn test_parse_sample() {
        let config: Config = SAMPLE.parse().unwrap();
        assert_eq!(config.game, GameSettings { width: 640.0, height: 480.0 });
        assert_eq!(config.images.len(), 2);

        let scout = config.template("scout").unwrap();
        assert_eq!(scout.img, Some(ImageKey::Single("plane_a".into())));
        assert_eq!(scout.life, Some(3));
        assert!(scout.animation.is_none());
        assert!(scout.rotation_speed.is_none());

        let mixed = config.template("mixed").unwrap();
        assert_eq!(
            mixed.img,
            Some(ImageKey::Choice(vec!["plane_a".into(), "plane_b".into()]))
        );
        assert_eq!(mixed.life, None);
    }

    #[test]
    fn test_animation_defaults() {
        let config: Config = SAMPLE.parse().unwrap();
        let anim = config.template("spinner").unwrap().animation.clone().unwrap();
        assert_eq!(anim.frames, 4);
        assert_eq!(anim.ticks_per_frame, 1);
        assert!(anim.looping);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = "()".parse().unwrap();
        assert_eq!(config.game, GameSettings::default());
        assert!(config.modules.is_empty());
        assert!(config.template("scout").is_none());
    }

    #[test]
    fn test_template_keys_sorted() {
        let config: Config = SAMPLE.parse().unwrap();
        assert_eq!(config.template_keys(), vec!["mixed", "scout", "spinner"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.play_area(), PlayArea::new(640.0, 480.0));
    }

    #[test]
    fn test_shipped_config() {
        let config: Config = include_str!("../assets/skyraid.ron").parse().unwrap();
        assert!(!config.modules.is_empty());
        for (key, module) in &config.modules {
            let images = match &module.img {
                Some(ImageKey::Single(img)) => vec![img.clone()],
                Some(ImageKey::Choice(imgs)) => imgs.clone(),
                None => Vec::new(),
            };
            for img in images {
                assert!(config.images.contains_key(&img), "{} uses unknown image {}", key, img);
            }
        }
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load(dir.path().join("nope.ron"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let bad = dir.path().join("bad.ron");
        fs::write(&bad, "(game: (width: ").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse(_))));
    }
}
