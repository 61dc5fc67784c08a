//! Grid layout spawning and measurement.
//!
//! [`spawn_grid_cells`] creates one entity per cell of the [`GridLayout`]
//! resource. Spawned entities receive [`Cell`], [`MapPosition`],
//! [`CellOffset`], [`CellShape`] and [`Tint`] components based on the layout
//! data and the current [`WindowSize`].
//!
//! [`measure_centers`] reads back what a cell currently looks like on screen:
//! resting centre plus animation offset.
//!
//! # Related
//!
//! - [`crate::components::gridlayout::GridLayoutData`] – the parsed JSON structure
//! - [`crate::resources::gridlayout::GridLayout`] – the validated layout

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Vector2;

use crate::components::cell::{Cell, CellOffset, CellShape};
use crate::components::mapposition::MapPosition;
use crate::resources::gridlayout::GridLayout;
use crate::resources::windowsize::WindowSize;

/// Spawn one entity per cell of the [`GridLayout`] resource, centred in the
/// window. Returns the number of cells spawned.
pub fn spawn_grid_cells(world: &mut World) -> usize {
    let layout = world.resource::<GridLayout>().clone();
    let window = world.resource::<WindowSize>().as_vector();
    let centers = layout.resting_centers(window);
    let shape = CellShape::square(layout.data.cell_size);

    for (index, center) in centers.iter().enumerate() {
        let (row, col) = layout.dims.coords(index);
        world.spawn((
            Cell::new(index, row, col),
            MapPosition::new(center.x, center.y),
            CellOffset::default(),
            shape,
            layout.data.tint_at(row, col),
        ));
    }

    info!(
        "Spawned {}x{} grid ({} cells)",
        layout.dims.rows,
        layout.dims.cols,
        centers.len()
    );
    centers.len()
}

/// Move every cell's resting centre to where the layout puts it in a window
/// of size `window`. Offsets are left untouched.
pub fn relayout_cells<'a>(
    layout: &GridLayout,
    window: Vector2,
    cells: impl IntoIterator<Item = (&'a Cell, Mut<'a, MapPosition>)>,
) {
    let centers = layout.resting_centers(window);
    for (cell, mut pos) in cells {
        if let Some(center) = centers.get(cell.index) {
            pos.pos = *center;
        }
    }
}

/// Displayed centre of every cell, indexed by [`Cell::index`].
///
/// Slots with no matching cell stay at the origin.
pub fn measure_centers<'a>(
    count: usize,
    cells: impl IntoIterator<Item = (&'a Cell, &'a MapPosition, &'a CellOffset)>,
) -> Vec<Vector2> {
    let mut centers = vec![Vector2 { x: 0.0, y: 0.0 }; count];
    for (cell, pos, off) in cells {
        if let Some(slot) = centers.get_mut(cell.index) {
            *slot = Vector2 {
                x: pos.pos.x + off.offset.x,
                y: pos.pos.y + off.offset.y,
            };
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gridlayout::GridLayoutData;
    use crate::components::tint::Tint;

    fn setup_world(rows: usize, cols: usize) -> World {
        let mut world = World::new();
        let layout = GridLayout::new(GridLayoutData::checkerboard(rows, cols, 10.0, 0.0)).unwrap();
        world.insert_resource(layout);
        world.insert_resource(WindowSize { w: 100, h: 100 });
        world
    }

    #[test]
    fn test_spawn_grid_cells_spawns_every_cell() {
        let mut world = setup_world(3, 4);
        assert_eq!(spawn_grid_cells(&mut world), 12);

        let mut q = world.query::<(&Cell, &MapPosition, &CellOffset, &Tint)>();
        let mut indices: Vec<usize> = q.iter(&world).map(|(c, _, _, _)| c.index).collect();
        indices.sort();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
        for (cell, _, off, _) in q.iter(&world) {
            assert_eq!(cell.row * 4 + cell.col, cell.index);
            assert_eq!((off.offset.x, off.offset.y), (0.0, 0.0));
        }
    }

    #[test]
    fn test_measure_centers_adds_offset() {
        let mut world = setup_world(1, 2);
        spawn_grid_cells(&mut world);

        let mut q = world.query::<(&Cell, &mut CellOffset)>();
        for (cell, mut off) in q.iter_mut(&mut world) {
            if cell.index == 1 {
                off.offset = Vector2 { x: 3.0, y: -4.0 };
            }
        }

        let mut q = world.query::<(&Cell, &MapPosition, &CellOffset)>();
        let centers = measure_centers(2, q.iter(&world));
        // 2 cells of 10px centred in 100px: lefts at 40 and 50
        assert_eq!((centers[0].x, centers[0].y), (45.0, 50.0));
        assert_eq!((centers[1].x, centers[1].y), (58.0, 46.0));
    }

    #[test]
    fn test_relayout_cells_follows_window() {
        let mut world = setup_world(1, 1);
        spawn_grid_cells(&mut world);
        let layout = world.resource::<GridLayout>().clone();

        let mut q = world.query::<(&Cell, &mut MapPosition)>();
        relayout_cells(&layout, Vector2 { x: 300.0, y: 200.0 }, q.iter_mut(&mut world));

        let mut q = world.query::<&MapPosition>();
        let pos = q.single(&world).unwrap();
        assert_eq!((pos.pos.x, pos.pos.y), (150.0, 100.0));
    }
}
