//! Active grid layout.
//!
//! Holds the validated [`GridLayoutData`] for the run so the layout can be
//! recomputed when the window is resized.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

use crate::components::gridlayout::{GridDims, GridLayoutData, LayoutError};

#[derive(Resource, Debug, Clone)]
pub struct GridLayout {
    pub data: GridLayoutData,
    pub dims: GridDims,
}

impl GridLayout {
    /// Validate `data` and keep it with its dimensions.
    pub fn new(data: GridLayoutData) -> Result<Self, LayoutError> {
        let dims = data.validate()?;
        Ok(Self { data, dims })
    }

    /// Resting centre of every cell, by index, for a window of size `window`.
    pub fn resting_centers(&self, window: Vector2) -> Vec<Vector2> {
        (0..self.dims.len())
            .map(|index| {
                let (row, col) = self.dims.coords(index);
                self.data.cell_center(self.dims, row, col, window)
            })
            .collect()
    }
}
