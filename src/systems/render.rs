//! Rendering.
//!
//! [`render_system`] draws every cell as a rounded rectangle at its resting
//! centre plus animation offset, in index order so higher indices end up on
//! top (matching the hit test in [`pick_cell`](crate::components::cell::pick_cell)).
//! While [`DebugMode`] is present it also draws each measured centre with its
//! pull radius, and a status line with the interaction state and FPS.

use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::*;

use crate::components::cell::{Cell, CellOffset, CellShape};
use crate::components::mapposition::MapPosition;
use crate::components::tint::Tint;
use crate::resources::debugmode::DebugMode;
use crate::resources::interaction::InteractionController;

const BACKGROUND: Color = Color {
    r: 15,
    g: 23,
    b: 42,
    a: 255,
};
const CORNER_SEGMENTS: i32 = 8;

struct CellDraw {
    index: usize,
    rect: Rectangle,
    roundness: f32,
    color: Color,
}

fn collect_cells(world: &mut World) -> Vec<CellDraw> {
    let mut q = world.query::<(&Cell, &MapPosition, &CellOffset, &CellShape, &Tint)>();
    let mut cells: Vec<CellDraw> = q
        .iter(world)
        .map(|(cell, pos, off, shape, tint)| CellDraw {
            index: cell.index,
            rect: Rectangle {
                x: pos.pos.x + off.offset.x - shape.size.x * 0.5,
                y: pos.pos.y + off.offset.y - shape.size.y * 0.5,
                width: shape.size.x,
                height: shape.size.y,
            },
            roundness: shape.roundness,
            color: tint.color,
        })
        .collect();
    cells.sort_by_key(|c| c.index);
    cells
}

/// Draw the frame. Exclusive: borrows the raylib handle out of the world for
/// the duration of the drawing scope.
pub fn render_system(world: &mut World) {
    let cells = collect_cells(world);
    let debug = world.contains_resource::<DebugMode>();

    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        error!("RaylibHandle missing, skipping frame");
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        error!("RaylibThread missing, skipping frame");
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(BACKGROUND);

        for cell in &cells {
            d.draw_rectangle_rounded(cell.rect, cell.roundness, CORNER_SEGMENTS, cell.color);
        }

        if debug {
            render_debug_ui(world, &mut d);
        }
    }

    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}

fn render_debug_ui(world: &World, d: &mut RaylibDrawHandle) {
    let Some(controller) = world.get_resource::<InteractionController>() else {
        return;
    };
    let radius = controller.tuning().pull_distance;

    for cell in controller.cells() {
        let color = if cell.pulled { Color::ORANGE } else { Color::LIME };
        d.draw_circle_lines(cell.center.x as i32, cell.center.y as i32, radius, color);
        d.draw_line(
            cell.center.x as i32 - 5,
            cell.center.y as i32,
            cell.center.x as i32 + 5,
            cell.center.y as i32,
            color,
        );
        d.draw_line(
            cell.center.x as i32,
            cell.center.y as i32 - 5,
            cell.center.x as i32,
            cell.center.y as i32 + 5,
            color,
        );
    }

    let text = format!(
        "DEBUG MODE (press F11 to toggle) | FPS: {} | {:?}{}",
        d.get_fps(),
        controller.state(),
        if controller.pending_reset() {
            " (reset pending)"
        } else {
            ""
        }
    );
    d.draw_text(&text, 10, 10, 10, Color::RAYWHITE);

    let grid = controller.grid();
    let grid_text = format!("Grid: {}x{} ({} cells)", grid.rows, grid.cols, grid.len());
    d.draw_text(&grid_text, 10, 30, 10, Color::RAYWHITE);
}
