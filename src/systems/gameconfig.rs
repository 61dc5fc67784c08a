//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies the window settings
//! (target FPS and vsync) to the running window.

use crate::resources::gameconfig::GameConfig;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::ffi;

/// System that applies game configuration changes.
///
/// Runs every frame and does nothing unless [`GameConfig`] was added or
/// modified since the last run.
///
/// # Resource Dependencies
/// - `GameConfig` (optional) - the configuration to monitor
/// - `RaylibHandle` (non-send, mutable) - for window operations
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
) {
    let Some(config) = maybe_config else {
        return;
    };

    if config.is_changed() || config.is_added() {
        // Apply vsync setting
        unsafe {
            if config.vsync {
                ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
                debug!("VSync enabled");
            } else {
                ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
                debug!("VSync disabled");
            }
        }

        rl.set_target_fps(config.target_fps);

        info!(
            "GameConfig applied: fps={}, vsync={}",
            config.target_fps, config.vsync
        );
    }
}
