//! # geoiters-rs
//!
//! Splits a geographic extent into patches or map tiles so each piece can be
//! handed to its own worker. There are three entry points.
//!
//! ### 1. `UniformGridIterator` - Fixed Rows and Columns
//!
//! ```
//! use geoiters_rs::{Extent, UniformGridIterator};
//!
//! # fn main() -> Result<(), geoiters_rs::GeoItersError> {
//! let ext = Extent::with_crs(-74.0, 40.7, -73.9, 40.8, "EPSG:4326");
//! for patch in UniformGridIterator::new(ext, 4, 4)? {
//!     println!("{}", patch);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `AreaTargetedGridIterator` - Patches of a Target Area
//!
//! ```
//! use geoiters_rs::{Extent, GridConfig};
//!
//! # fn main() -> Result<(), geoiters_rs::GeoItersError> {
//! let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
//!
//! // Roughly 1 km² per patch
//! let grid = GridConfig::new().patch_max_area(1_000_000.0).build(ext)?;
//! println!("{} patches", grid.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `TileIndexIterator` - XYZ Map Tiles
//!
//! ```
//! use geoiters_rs::{Extent, TileIndexIterator};
//!
//! # fn main() -> Result<(), geoiters_rs::GeoItersError> {
//! let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
//! for (x, y, z) in TileIndexIterator::new(&ext, 13)? {
//!     let tile = Extent::from_tile_coordinates(x, y, z)?;
//!     println!("{}/{}/{} covers {:.0} m²", z, x, y, tile.area()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Extents in other coordinate systems are reprojected with PROJ where needed:
//!
//! ```
//! use geoiters_rs::{TileIndexIterator, WEB_MERCATOR_EXTENT};
//!
//! # fn main() -> Result<(), geoiters_rs::GeoItersError> {
//! let tiles = TileIndexIterator::new(&WEB_MERCATOR_EXTENT, 2)?;
//! assert_eq!(tiles.len(), 16);
//! # Ok(())
//! # }
//! ```
//!

pub mod api;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;

pub use api::{
    AreaTargetedGridIterator, Extent, ExtentBounds, GridConfig, TileIndexIterator,
    UniformGridIterator, WEB_MERCATOR_EXTENT, WORLD_EXTENT,
};
pub use coord::{ProjTransformer, Projector};
pub use crate::core::{
    EARTH_RADIUS_METERS, EPSG_WEB_MERCATOR, EPSG_WGS84, MAX_ZOOM_LEVEL, TileIndex, TileRange,
    WEB_MERCATOR_BOUND, haversine, lonlat_to_tile, tile_to_lonlat,
};
pub use error::{GeoItersError, Result};
pub use geom::Bounds;

pub use geo_types;
pub use geojson;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_end_to_end_patches() -> Result<()> {
        let ext: Extent = "-74.2,40.65,-73.7,40.85".parse()?;
        let ext = Extent { crs: Some(EPSG_WGS84.to_string()), ..ext };

        let patches: Vec<Extent> = UniformGridIterator::new(ext.copy(), 4, 4)?.collect();
        assert_eq!(patches.len(), 16);

        let total: f64 = patches.iter().map(Extent::area).sum::<Result<f64>>()?;
        assert!(total > 0.0);

        // Patches round-trip through their GeoJSON form
        for patch in &patches {
            assert_eq!(&Extent::from_feature(&patch.to_feature())?, patch);
        }
        Ok(())
    }

    #[test]
    fn test_end_to_end_tiles() -> Result<()> {
        let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, EPSG_WGS84);
        let iter = TileIndexIterator::new(&ext, 13)?;
        let expected = iter.len();

        let mut count = 0;
        for (x, y, z) in iter {
            let tile = Extent::from_tile_coordinates(x, y, z)?;
            let (lon, lat) = tile.center();
            assert_eq!(lonlat_to_tile(lon, lat, z)?.as_tuple(), (x, y, z));
            count += 1;
        }
        assert_eq!(count, expected);
        Ok(())
    }

    #[test]
    fn test_web_mercator_tiles_then_patches() -> Result<()> {
        let tiles: Vec<_> = TileIndexIterator::new(&WEB_MERCATOR_EXTENT, 2)?.collect();
        assert_eq!(tiles.len(), 16);
        assert_eq!(tiles[0], (0, 0, 2));
        assert_eq!(tiles[15], (3, 3, 2));

        let merc = Extent::from_tile_coordinates(1, 1, 2)?.transform_to(EPSG_WEB_MERCATOR)?;
        let patches = UniformGridIterator::new(merc, 2, 2)?;
        assert_abs_diff_eq!(patches.cell_width(), WEB_MERCATOR_BOUND / 4.0, epsilon = 1e-2);
        Ok(())
    }

    #[test]
    fn test_world_single_tile_at_zoom_zero() -> Result<()> {
        let tiles: Vec<_> = TileIndexIterator::new(&WORLD_EXTENT, 0)?.collect();
        assert_eq!(tiles, vec![(0, 0, 0)]);
        Ok(())
    }

    #[test]
    fn test_area_targeted_matches_haversine() -> Result<()> {
        let ext = Extent::with_crs(10.0, 45.0, 10.5, 45.2, EPSG_WGS84);
        let grid = AreaTargetedGridIterator::new(ext.clone(), 10, 10, Some(1_000_000.0))?;

        let width_m = haversine(10.0, 45.0, 10.5, 45.0);
        let height_m = haversine(10.0, 45.0, 10.0, 45.2);
        assert_eq!(grid.columns(), (width_m / 1000.0).ceil() as usize);
        assert_eq!(grid.rows(), (height_m / 1000.0).ceil() as usize);

        let patches: Vec<Extent> = grid.collect();
        let last = patches.last().map(Extent::as_list).unwrap_or_default();
        assert_abs_diff_eq!(last[2], ext.max_x, epsilon = 1e-9);
        assert_abs_diff_eq!(last[3], ext.max_y, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_argument_errors() {
        let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, EPSG_WGS84);

        assert!(matches!(
            UniformGridIterator::new(ext.clone(), 0, 4),
            Err(GeoItersError::InvalidArgument(_))
        ));
        assert!(matches!(
            AreaTargetedGridIterator::new(ext.clone(), 4, -1, None),
            Err(GeoItersError::InvalidArgument(_))
        ));
        assert!(matches!(
            TileIndexIterator::new(&ext, 25),
            Err(GeoItersError::InvalidArgument(_))
        ));
        assert!(matches!(
            Extent::from_string("-74,40,-73", None),
            Err(GeoItersError::FormatError(_))
        ));
    }

    #[test]
    fn test_extent_from_wkt_then_grid() -> Result<()> {
        let ext = Extent::from_geometry_str(
            "POLYGON((-74 40, -73 40, -73 41, -74 41, -74 40))",
            Some(EPSG_WGS84),
        )?;
        assert_eq!(ext.as_list(), [-74.0, 40.0, -73.0, 41.0]);

        let cells: Vec<Extent> = GridConfig::new().rows(2).columns(2).build(ext)?.collect();
        assert_eq!(cells[0].as_list(), [-74.0, 40.0, -73.5, 40.5]);
        assert_eq!(cells[3].as_list(), [-73.5, 40.5, -73.0, 41.0]);
        Ok(())
    }
}
