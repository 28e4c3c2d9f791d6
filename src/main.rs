//! SKYRAID: flying entities for a 2D arcade shooter
//!
//! Every enemy, bit of debris or pickup crossing the screen is a flyer built
//! from a named template in `assets/skyraid.ron`. This binary drives them:
//! it spawns flyers above the play area, drifts them down the screen and
//! lets the fleet reap the ones that fly off the bottom.
//!
//! Controls: Space damages every flyer on screen, Escape quits.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::{
    draw_text, is_key_pressed, next_frame, Color, Conf, KeyCode, Texture2D, WHITE,
};
use rand::Rng;

use skyraid::config::DEFAULT_CONFIG_PATH;
use skyraid::{init_logging, Config, Fleet, Flyer, MacroquadScene, TextureCache};

/// Frames between spawns
const SPAWN_INTERVAL: u32 = 45;

/// Downward drift in play-area units per frame, before the speed factor
const DRIFT_SPEED: f32 = 2.5;

/// Flying entities for a 2D arcade shooter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game configuration (RON)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SKYRAID v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let args = Args::parse();
    init_logging(args.verbose);

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}: {}", args.config.display(), e);
            return;
        }
    };
    let template_keys: Vec<String> = config.template_keys().into_iter().map(String::from).collect();
    if template_keys.is_empty() {
        error!("{}: no templates defined", args.config.display());
        return;
    }
    info!(
        "=== SKYRAID === {} templates, play area {}x{}",
        template_keys.len(),
        config.game.width,
        config.game.height
    );

    let textures = TextureCache::load_all(&config.images).await;
    let mut scene = MacroquadScene::new(config.play_area());
    let mut fleet: Fleet<Texture2D> = Fleet::new();
    let destroyed = Rc::new(Cell::new(0u32));
    let mut rng = rand::thread_rng();
    let mut frame: u32 = 0;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if frame % SPAWN_INTERVAL == 0 {
            let key = &template_keys[rng.gen_range(0..template_keys.len())];
            let counter = Rc::clone(&destroyed);
            let mut flyer = Flyer::new();
            match flyer.load(
                &config,
                &textures,
                key,
                Some(Box::new(move || counter.set(counter.get() + 1))),
            ) {
                Ok(()) => {
                    let w = flyer.template().map(|t| t.w).unwrap_or(0.0);
                    let h = flyer.template().map(|t| t.h).unwrap_or(0.0);
                    let x = rng.gen_range(w..(config.game.width - w).max(w + 1.0));
                    flyer.set_speed_factor(rng.gen_range(0.5..1.5));
                    if flyer.set_position(x, -2.0 * h).is_ok() {
                        fleet.spawn(flyer);
                    }
                }
                Err(e) => warn!("cannot spawn '{}': {}", key, e),
            }
        }

        let hit = is_key_pressed(KeyCode::Space);
        for flyer in fleet.iter_mut() {
            let step = DRIFT_SPEED * flyer.speed_factor();
            if let Err(e) = flyer.translate(0.0, step) {
                warn!("cannot move {:?}: {}", flyer, e);
            }
            if hit && flyer.has_entered_bounds() && flyer.is_running() {
                if let Err(e) = flyer.hurt(1) {
                    warn!("cannot damage {:?}: {}", flyer, e);
                }
            }
        }

        scene.begin_frame(Color::from_rgba(40, 60, 110, 255));
        fleet.update(&mut scene);

        let hud = format!("flyers: {}  destroyed: {}", fleet.len(), destroyed.get());
        draw_text(&hud, 10.0, 20.0, 20.0, WHITE);

        frame = frame.wrapping_add(1);
        next_frame().await;
    }
}
