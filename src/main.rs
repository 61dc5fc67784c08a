//! Magnet grid main entry point.
//!
//! A grid of rounded cells drawn with:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Cells near the pointer lean toward it and spring back when it moves away.
//! Releasing the mouse button over a cell throws every cell into the air,
//! staggered outward from the clicked one, then plays the flight backwards and
//! snaps the grid back into place.
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini` and the grid layout
//! 2. Initialize the raylib window and the ECS world
//! 3. Spawn the grid and register observers ([`magnetgrid::game::initialize`])
//! 4. Each frame: apply config, sample input, apply tween requests, advance
//!    timelines and tweens, render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --layout assets/layouts/rainbow.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use magnetgrid::components::gridlayout::GridLayoutData;
use magnetgrid::events::tweenrequest::TweenRequest;
use magnetgrid::game;
use magnetgrid::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use magnetgrid::resources::gridlayout::GridLayout;
use magnetgrid::resources::pointer::PointerState;
use magnetgrid::resources::tweenrng::TweenRng;
use magnetgrid::resources::windowsize::WindowSize;
use magnetgrid::resources::worldtime::WorldTime;
use magnetgrid::systems::gameconfig::apply_gameconfig_changes;
use magnetgrid::systems::input::update_input_state;
use magnetgrid::systems::render::render_system;
use magnetgrid::systems::time::update_world_time;
use magnetgrid::systems::tween::{
    apply_tween_requests, tween_offset_system, tween_physics_system, tween_timeline_system,
    update_tween_request_messages,
};

/// Magnet grid
#[derive(Parser)]
#[command(version, about = "A grid of cells pulled by the pointer that bursts apart on click.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// JSON grid layout. Without it the `[grid]` config section is used.
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// Seed for the explosion randomness.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn load_layout(path: Option<&PathBuf>, config: &GameConfig) -> Result<GridLayout, String> {
    let data = match path {
        Some(path) => GridLayoutData::load_from_file(&path.to_string_lossy())
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => config.default_layout(),
    };
    GridLayout::new(data).map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: write the config and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let layout = match load_layout(cli.layout.as_ref(), &config) {
        Ok(layout) => layout,
        Err(e) => {
            error!("Invalid grid layout: {}", e);
            std::process::exit(1);
        }
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Magnet Grid")
        .build();
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(PointerState::default());
    world.insert_resource(match cli.seed {
        Some(seed) => {
            info!("Explosion seed {}", seed);
            TweenRng::with_seed(seed)
        }
        None => TweenRng::default(),
    });
    world.init_resource::<Messages<TweenRequest>>();
    let tuning = config.interaction;
    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    game::initialize(&mut world, layout, tuning);

    let mut update = Schedule::default();
    update.add_systems(
        (
            apply_gameconfig_changes,
            update_input_state,
            apply_tween_requests,
            tween_timeline_system,
            tween_physics_system,
            tween_offset_system,
            render_system,
            update_tween_request_messages,
        )
            .chain(),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
    info!("Bye");
}
