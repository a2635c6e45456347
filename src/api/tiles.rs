use crate::api::cursor::GridCursor;
use crate::api::extent::Extent;
use crate::coord::{ProjTransformer, Projector};
use crate::core::tile::{TileIndex, TileRange, check_zoom};
use crate::error::{GeoItersError, Result};
use log::debug;
use std::iter::FusedIterator;

/// Enumerates the XYZ tiles covering an extent at one zoom level.
///
/// The extent is reprojected to EPSG:4326 and the tile rectangle spanned by
/// its south-west and north-east corners is walked in row-major order
/// (increasing `ytile`, i.e. north to south, each row west to east).
/// Items are `(xtile, ytile, zoom)` triples.
///
/// # Example
///
/// ```
/// use geoiters_rs::{Extent, TileIndexIterator};
///
/// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
/// let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
/// for (x, y, z) in TileIndexIterator::new(&ext, 13)? {
///     let tile = Extent::from_tile_coordinates(x, y, z)?;
///     println!("{}/{}/{} {}", z, x, y, tile);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TileIndexIterator {
    range: TileRange,
    cursor: GridCursor,
}

impl TileIndexIterator {
    /// Fails with [`GeoItersError::InvalidArgument`] when `zoom_level` is above 24.
    pub fn new(extent: &Extent, zoom_level: u8) -> Result<Self> {
        Self::with_projector(extent, zoom_level, &ProjTransformer)
    }

    /// Same as [`TileIndexIterator::new`], reprojecting through `projector`.
    pub fn with_projector<P: Projector + ?Sized>(
        extent: &Extent,
        zoom_level: u8,
        projector: &P,
    ) -> Result<Self> {
        check_zoom(zoom_level)?;
        let range = extent.to_tile_range_with(projector, zoom_level)?;
        Self::from_range(range)
    }

    /// Walks an explicit tile range.
    pub fn from_range(range: TileRange) -> Result<Self> {
        let (width, height) = (range.width() as usize, range.height() as usize);

        debug!(
            "zoom {}: tiles x {}..={}, y {}..={} ({} x {})",
            range.zoom, range.x_min, range.x_max, range.y_min, range.y_max, width, height
        );

        Ok(Self {
            range,
            cursor: GridCursor::new(height, width)?,
        })
    }

    pub fn tile_range(&self) -> &TileRange {
        &self.range
    }

    pub fn zoom_level(&self) -> u8 {
        self.range.zoom
    }

    pub fn width_in_tiles(&self) -> usize {
        self.cursor.columns()
    }

    pub fn height_in_tiles(&self) -> usize {
        self.cursor.rows()
    }

    /// Yields [`TileIndex`] values instead of bare triples.
    pub fn tiles(self) -> impl Iterator<Item = TileIndex> {
        self.map(|(x, y, zoom)| TileIndex { x, y, zoom })
    }
}

impl Iterator for TileIndexIterator {
    type Item = (u32, u32, u8);

    fn next(&mut self) -> Option<Self::Item> {
        let (row, column) = self.cursor.advance()?;
        Some((
            self.range.x_min + column as u32,
            self.range.y_min + row as u32,
            self.range.zoom,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileIndexIterator {}

impl FusedIterator for TileIndexIterator {}

impl TileIndex {
    /// The EPSG:4326 extent of this tile.
    pub fn extent(&self) -> Result<Extent> {
        Extent::from_tile_coordinates(self.x, self.y, self.zoom)
    }
}

impl TryFrom<(u32, u32, u8)> for TileIndex {
    type Error = GeoItersError;

    fn try_from((x, y, zoom): (u32, u32, u8)) -> Result<Self> {
        TileIndex::new(x, y, zoom)
    }
}
