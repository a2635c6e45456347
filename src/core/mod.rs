pub mod constants;
pub mod distance;
pub mod tile;

pub use constants::{
    DEFAULT_COLUMNS, DEFAULT_ROWS, EARTH_RADIUS_METERS, EPSG_WEB_MERCATOR, EPSG_WGS84,
    MAX_MERCATOR_LATITUDE, MAX_ZOOM_LEVEL, WEB_MERCATOR_BOUND,
};
pub use distance::haversine;
pub use tile::{TileIndex, TileRange, lonlat_to_tile, tile_to_lonlat};
