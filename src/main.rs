//! Stagecraft demo.
//!
//! A side-scrolling yard: a character that walks and jumps, crates scattered
//! along the floor that hurt on contact, and a spark effect on every jump.
//! Sprites are in-memory placeholders, so no asset files are needed.
//!
//! # Running
//!
//! ```sh
//! cargo run --release                      # window
//! cargo run --release -- --headless -f 600 # no window, 600 frames
//! ```
//!
//! Arrows move, space jumps, escape quits.

use bevy_ecs::prelude::Entity;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;
use std::path::PathBuf;

use stagecraft::components::boxcollider::BoxCollider;
use stagecraft::components::progressbar::ProgressBar;
use stagecraft::objects::SceneObject;
use stagecraft::objects::character::Character;
use stagecraft::objects::effect::Effect;
use stagecraft::objects::prop::Prop;
use stagecraft::resources::animationstore::{AnimationFrameData, AnimationSequence, TextureType};
use stagecraft::resources::camera::SceneCamera;
use stagecraft::resources::gameconfig::GameConfig;
use stagecraft::resources::rendertarget::{GpuTextureCache, RaylibSurface, RecordingSurface};
use stagecraft::resources::texturestore::Texture;
use stagecraft::scene::Scene;

const FLOOR_HEIGHT: f32 = 40.0;
const CRATE_COUNT: usize = 8;
const HEADLESS_DT: f32 = 1.0 / 60.0;

/// Stagecraft demo scene
#[derive(Parser)]
#[command(version, about = "Game object core demo: walk, jump and bump into crates.")]
struct Cli {
    /// INI configuration file.
    #[arg(short, long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Run without a window, rendering into a command recorder.
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames (headless default: 600).
    #[arg(short, long)]
    frames: Option<u64>,

    /// Seed for crate placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if let Some(seed) = cli.seed {
        fastrand::seed(seed);
    }

    let (mut scene, hero) = match build_scene(&config) {
        Ok(built) => built,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if cli.headless {
        run_headless(&mut scene, hero, cli.frames.unwrap_or(600));
    } else {
        run_window(&mut scene, hero, &config, cli.frames);
    }
}

/// Populate a scene with the demo content. Returns the scene and the hero.
fn build_scene(config: &GameConfig) -> Result<(Scene, Entity), String> {
    let (render_w, render_h) = config.render_size();
    let (world_w, world_h) = config.world_size();
    let floor_y = world_h - FLOOR_HEIGHT;

    let mut scene = Scene::new(SceneCamera::new(render_w, render_h).with_world(world_w, world_h));

    {
        let mut resources = scene.resources_mut();
        resources.insert_texture(Texture::from_dimensions("ground", world_w as u32, FLOOR_HEIGHT as u32));
        resources.insert_texture(Texture::from_dimensions("crate", 24, 24));
        resources.insert_texture(Texture::from_dimensions("hero", 64, 32));
        resources.insert_texture(Texture::from_dimensions("spark", 64, 16));
        resources.insert_animation(
            AnimationSequence::new("hero_idle", "hero", TextureType::Atlas)
                .with_play_time(0.8)
                .with_frame(AnimationFrameData::new(0.0, 0.0, 16.0, 32.0))
                .with_frame(AnimationFrameData::new(16.0, 0.0, 16.0, 32.0)),
        );
        resources.insert_animation(
            AnimationSequence::new("hero_jump", "hero", TextureType::Atlas)
                .with_frame(AnimationFrameData::new(32.0, 0.0, 16.0, 32.0)),
        );
        resources.insert_animation(
            AnimationSequence::new("spark", "spark", TextureType::Atlas)
                .with_play_time(0.3)
                .with_frame(AnimationFrameData::new(0.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(16.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(32.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(48.0, 0.0, 16.0, 16.0)),
        );
    }

    let mut ground = Prop::new("ground");
    ground.base_mut().set_texture(scene.resources(), "ground");
    ground.base_mut().set_pos(0.0, floor_y);
    scene.spawn(ground);

    for i in 0..CRATE_COUNT {
        let mut crate_prop = Prop::new(format!("crate_{}", i));
        let base = crate_prop.base_mut();
        base.set_texture(scene.resources(), "crate");
        base.set_pivot(0.5, 1.0);
        base.set_pos(fastrand::f32() * (world_w - 100.0) + 100.0, floor_y);
        base.add_collider(Box::new(
            BoxCollider::new("box", 24.0, 24.0)
                .with_offset(Vector2::new(-12.0, -24.0))
                .with_visible(config.show_colliders),
        ));
        scene.spawn(crate_prop);
    }

    let mut character = Character::new("hero", floor_y)
        .with_hit_points(100.0)
        .with_contact_damage(10.0);
    {
        let resources = scene.resources();
        let base = character.base_mut();
        base.set_pivot(0.5, 1.0);
        base.set_pos(60.0, floor_y);
        base.set_jump_velocity(22.0);
        base.add_animation(resources, "hero_idle", true, None, 1.0, false);
        base.add_animation(resources, "hero_jump", true, None, 1.0, false);
        base.add_collider(Box::new(
            BoxCollider::new("body", 14.0, 30.0)
                .with_offset(Vector2::new(-7.0, -30.0))
                .with_visible(config.show_colliders),
        ));
        let mut health = ProgressBar::new(20.0, 3.0)
            .with_offset(Vector2::new(-10.0, -40.0))
            .with_drain_speed(0.5);
        health.fill_color = Color::LIME;
        base.add_widget(Box::new(health));
    }
    let hero_id = character.base().id();

    let hero = scene
        .spawn(character)
        .ok_or_else(|| "Failed to spawn the hero".to_string())?;
    scene.camera_mut().set_target(Some(hero_id));

    Ok((scene, hero))
}

/// Walk/jump input for one frame. `walk` is -1, 0 or 1.
fn drive_hero(scene: &mut Scene, hero: Entity, walk: f32, jump: bool, dt: f32) {
    let mut spark_at = None;

    if let Some(object) = scene.object_mut(hero) {
        let base = object.base_mut();
        if walk != 0.0 {
            base.move_by(Vector2::new(walk, 0.0), dt);
        }
        if jump && base.jump() {
            spark_at = Some(base.pos());
        }
        if base.kinematics().jumping {
            base.change_animation("hero_jump");
        } else {
            base.change_animation("hero_idle");
        }
    }

    if let Some(pos) = spark_at {
        let mut spark = Effect::with_sequence("spark", scene.resources(), "spark");
        spark.base_mut().set_pivot(0.5, 1.0);
        spark.base_mut().set_pos(pos.x, pos.y);
        scene.spawn(spark);
    }
}

fn run_headless(scene: &mut Scene, hero: Entity, frames: u64) {
    let mut surface = RecordingSurface::new();
    let mut draws = 0usize;

    for frame in 0..frames {
        let jump = frame % 90 == 0;
        drive_hero(scene, hero, 1.0, jump, HEADLESS_DT);
        scene.update(HEADLESS_DT);

        surface.clear();
        scene.render(&mut surface);
        draws += surface.commands.len();
    }

    let camera = scene.camera().pos;
    info!(
        "Headless run done: {} frames, {} objects alive, {} draw calls, camera at ({:.1}, {:.1})",
        frames,
        scene.object_count(),
        draws,
        camera.x,
        camera.y
    );
}

fn run_window(scene: &mut Scene, hero: Entity, config: &GameConfig, frames: Option<u64>) {
    let (window_w, window_h) = config.window_size();

    let mut builder = raylib::init();
    builder
        .size(window_w as i32, window_h as i32)
        .title("Stagecraft");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    let view = Camera2D {
        offset: Vector2::zero(),
        target: Vector2::zero(),
        rotation: 0.0,
        zoom: window_w as f32 / config.render_width as f32,
    };

    let mut gpu = GpuTextureCache::new();
    let mut frame: u64 = 0;

    while !rl.window_should_close() && frames.is_none_or(|limit| frame < limit) {
        let dt = rl.get_frame_time();

        let mut walk = 0.0;
        if rl.is_key_down(KeyboardKey::KEY_LEFT) {
            walk -= 1.0;
        }
        if rl.is_key_down(KeyboardKey::KEY_RIGHT) {
            walk += 1.0;
        }
        let jump = rl.is_key_pressed(KeyboardKey::KEY_SPACE);

        drive_hero(scene, hero, walk, jump, dt);
        scene.update(dt);

        gpu.sync(&mut rl, &thread, scene.resources());

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(30, 30, 46, 255));
        {
            let mut d2 = d.begin_mode2D(view);
            let mut surface = RaylibSurface::new(&mut d2, &gpu);
            scene.render(&mut surface);
        }
        d.draw_fps(10, 10);

        frame += 1;
    }

    info!("Window closed after {} frames", frame);
}
