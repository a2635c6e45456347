mod cursor;
pub mod extent;
pub mod grid;
pub mod tiles;

pub use extent::{Extent, ExtentBounds, WEB_MERCATOR_EXTENT, WORLD_EXTENT};
pub use grid::{AreaTargetedGridIterator, GridConfig, UniformGridIterator};
pub use tiles::TileIndexIterator;
