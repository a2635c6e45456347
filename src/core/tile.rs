use crate::core::constants::{MAX_MERCATOR_LATITUDE, MAX_ZOOM_LEVEL};
use crate::error::{GeoItersError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A slippy-map tile in the XYZ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self> {
        check_zoom(zoom)?;
        Ok(Self { x, y, zoom })
    }

    /// Returns the tile as an `(x, y, zoom)` triple.
    pub fn as_tuple(&self) -> (u32, u32, u8) {
        (self.x, self.y, self.zoom)
    }
}

impl From<TileIndex> for (u32, u32, u8) {
    fn from(tile: TileIndex) -> Self {
        tile.as_tuple()
    }
}

/// Inclusive rectangle of tile indices at one zoom level.
///
/// A range whose maximum lies below its minimum on either axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
    pub zoom: u8,
}

impl TileRange {
    pub fn width(&self) -> u32 {
        self.x_max.saturating_add(1).saturating_sub(self.x_min)
    }

    pub fn height(&self) -> u32 {
        self.y_max.saturating_add(1).saturating_sub(self.y_min)
    }

    /// Number of tiles in the range.
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, tile: &TileIndex) -> bool {
        tile.zoom == self.zoom
            && (self.x_min..=self.x_max).contains(&tile.x)
            && (self.y_min..=self.y_max).contains(&tile.y)
    }
}

pub(crate) fn check_zoom(zoom: u8) -> Result<()> {
    if zoom > MAX_ZOOM_LEVEL {
        return Err(GeoItersError::InvalidArgument(format!(
            "zoom_level must be between 0 and {}, got {}",
            MAX_ZOOM_LEVEL, zoom
        )));
    }
    Ok(())
}

fn tiles_per_axis(zoom: u8) -> f64 {
    (1u64 << zoom) as f64
}

/// Converts a lon/lat position (degrees) to the tile containing it.
///
/// Latitude is clamped to the Web-Mercator limit and the result to
/// `[0, 2^zoom - 1]`, so poles and the antimeridian map onto edge tiles.
pub fn lonlat_to_tile(lon: f64, lat: f64, zoom: u8) -> Result<TileIndex> {
    check_zoom(zoom)?;

    let n = tiles_per_axis(zoom);
    let lat_rad = lat
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();

    let x = ((lon + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

    let last = n - 1.0;
    Ok(TileIndex {
        x: x.clamp(0.0, last) as u32,
        y: y.clamp(0.0, last) as u32,
        zoom,
    })
}

/// Returns the lon/lat (degrees) of the north-west corner of a tile.
pub fn tile_to_lonlat(x: u32, y: u32, zoom: u8) -> Result<(f64, f64)> {
    check_zoom(zoom)?;

    let n = tiles_per_axis(zoom);
    let lon = x as f64 / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan().to_degrees();
    Ok((lon, lat))
}
