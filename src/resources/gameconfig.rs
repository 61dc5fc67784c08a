//! Application configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 120
//!
//! [grid]
//! rows = 6
//! cols = 6
//! cell_size = 56
//! gap = 8
//!
//! [interaction]
//! pull_distance = 70
//! pull_duration = 0.2
//! return_duration = 1
//! elastic_amplitude = 1
//! elastic_period = 0.3
//! explosion_duration = 1.6
//! velocity_min = 400
//! velocity_max = 1000
//! angle_min = 250
//! angle_max = 290
//! gravity = 2000
//! stagger_amount = 0.3
//! reverse_time_scale = 1.3
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::gridlayout::GridLayoutData;
use crate::resources::interaction::InteractionTuning;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_GRID_ROWS: usize = 6;
const DEFAULT_GRID_COLS: usize = 6;
const DEFAULT_CELL_SIZE: f32 = 56.0;
const DEFAULT_CELL_GAP: f32 = 8.0;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Accepted range of a numeric `[interaction]` value.
#[derive(Clone, Copy, Debug)]
enum Bound {
    Finite,
    NonNegative,
    Positive,
}

impl Bound {
    fn accepts(self, value: f32) -> bool {
        value.is_finite()
            && match self {
                Bound::Finite => true,
                Bound::NonNegative => value >= 0.0,
                Bound::Positive => value > 0.0,
            }
    }

    fn describe(self) -> &'static str {
        match self {
            Bound::Finite => "a finite number",
            Bound::NonNegative => "zero or more",
            Bound::Positive => "greater than zero",
        }
    }
}

/// Application configuration resource.
///
/// Stores window settings, the default grid and the interaction tuning.
/// [`apply_gameconfig_changes`] pushes window-related changes to raylib.
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Rows of the default grid (used when no layout file is given).
    pub grid_rows: usize,
    /// Columns of the default grid.
    pub grid_cols: usize,
    /// Cell side in pixels.
    pub cell_size: f32,
    /// Space between cells in pixels.
    pub cell_gap: f32,
    /// Pull, return and explosion parameters.
    pub interaction: InteractionTuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
            interaction: InteractionTuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, grid {}x{}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.grid_rows,
            self.grid_cols
        );

        Ok(())
    }

    /// Load configuration from INI text. Same rules as [`load_from_file`](Self::load_from_file).
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [grid] section
        if let Some(rows) = config.getuint("grid", "rows").ok().flatten() {
            self.grid_rows = rows as usize;
        }
        if let Some(cols) = config.getuint("grid", "cols").ok().flatten() {
            self.grid_cols = cols as usize;
        }
        if let Some(size) = float("grid", "cell_size") {
            self.cell_size = size as f32;
        }
        if let Some(gap) = float("grid", "gap") {
            self.cell_gap = gap as f32;
        }

        // [interaction] section
        let t = &mut self.interaction;
        let scalars: [(&str, Bound, &mut f32); 9] = [
            ("pull_distance", Bound::Positive, &mut t.pull_distance),
            ("pull_duration", Bound::NonNegative, &mut t.pull_duration),
            ("return_duration", Bound::NonNegative, &mut t.return_duration),
            ("elastic_amplitude", Bound::Positive, &mut t.elastic_amplitude),
            ("elastic_period", Bound::Positive, &mut t.elastic_period),
            ("explosion_duration", Bound::NonNegative, &mut t.explosion_duration),
            ("gravity", Bound::Finite, &mut t.gravity),
            ("stagger_amount", Bound::NonNegative, &mut t.stagger_amount),
            ("reverse_time_scale", Bound::Positive, &mut t.reverse_time_scale),
        ];
        for (key, bound, slot) in scalars {
            let Some(value) = float("interaction", key) else {
                continue;
            };
            let value = value as f32;
            if bound.accepts(value) {
                *slot = value;
            } else {
                warn!(
                    "Ignoring interaction.{} = {}: must be {}; keeping {}",
                    key,
                    value,
                    bound.describe(),
                    slot
                );
            }
        }
        if let Some(v) = float("interaction", "velocity_min") {
            t.velocity.0 = v as f32;
        }
        if let Some(v) = float("interaction", "velocity_max") {
            t.velocity.1 = v as f32;
        }
        if let Some(v) = float("interaction", "angle_min") {
            t.angle.0 = v as f32;
        }
        if let Some(v) = float("interaction", "angle_max") {
            t.angle.1 = v as f32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [grid] section
        config.set("grid", "rows", Some(self.grid_rows.to_string()));
        config.set("grid", "cols", Some(self.grid_cols.to_string()));
        config.set("grid", "cell_size", Some(self.cell_size.to_string()));
        config.set("grid", "gap", Some(self.cell_gap.to_string()));

        // [interaction] section
        let t = &self.interaction;
        let values = [
            ("pull_distance", t.pull_distance),
            ("pull_duration", t.pull_duration),
            ("return_duration", t.return_duration),
            ("elastic_amplitude", t.elastic_amplitude),
            ("elastic_period", t.elastic_period),
            ("explosion_duration", t.explosion_duration),
            ("velocity_min", t.velocity.0),
            ("velocity_max", t.velocity.1),
            ("angle_min", t.angle.0),
            ("angle_max", t.angle.1),
            ("gravity", t.gravity),
            ("stagger_amount", t.stagger_amount),
            ("reverse_time_scale", t.reverse_time_scale),
        ];
        for (key, value) in values {
            config.set("interaction", key, Some(value.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// The checkerboard grid described by the `[grid]` section.
    pub fn default_layout(&self) -> GridLayoutData {
        GridLayoutData::checkerboard(self.grid_rows, self.grid_cols, self.cell_size, self.cell_gap)
    }
}
