use crate::api::cursor::GridCursor;
use crate::api::extent::Extent;
use crate::coord::{ProjTransformer, Projector};
use crate::core::constants::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::error::{GeoItersError, Result};
use log::debug;
use std::iter::FusedIterator;

/// Splits an extent into `rows x columns` equally sized patches.
///
/// Patches are laid out in the extent's own coordinate units and yielded in
/// row-major order: row 0 left to right starting at `min_y`, then row 1, and
/// so on. Each patch carries the source CRS. No reprojection happens, so the
/// extent does not need a CRS.
///
/// # Example
///
/// ```
/// use geoiters_rs::{Extent, UniformGridIterator};
///
/// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
/// let ext = Extent::with_crs(-74.0, 40.7, -73.9, 40.8, "EPSG:4326");
/// let patches: Vec<Extent> = UniformGridIterator::new(ext, 10, 10)?.collect();
/// assert_eq!(patches.len(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UniformGridIterator {
    extent: Extent,
    cell_width: f64,
    cell_height: f64,
    cursor: GridCursor,
}

impl UniformGridIterator {
    /// Fails with [`GeoItersError::InvalidArgument`] unless both `rows` and
    /// `columns` are positive and `rows * columns` fits in a `usize`.
    pub fn new(extent: Extent, rows: i64, columns: i64) -> Result<Self> {
        let (rows, columns) = check_dimensions(rows, columns)?;
        Self::from_dimensions(extent, rows, columns)
    }

    pub(crate) fn from_dimensions(extent: Extent, rows: usize, columns: usize) -> Result<Self> {
        let cursor = GridCursor::new(rows, columns)?;
        let cell_width = extent.width() / columns as f64;
        let cell_height = extent.height() / rows as f64;

        debug!(
            "grid of {} rows x {} columns over {}, cells {} x {}",
            rows, columns, extent, cell_width, cell_height
        );

        Ok(Self {
            extent,
            cell_width,
            cell_height,
            cursor,
        })
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn rows(&self) -> usize {
        self.cursor.rows()
    }

    pub fn columns(&self) -> usize {
        self.cursor.columns()
    }

    /// Patch width in the extent's native units.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Patch height in the extent's native units.
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    fn cell(&self, row: usize, column: usize) -> Extent {
        let min_x = self.extent.min_x + column as f64 * self.cell_width;
        let min_y = self.extent.min_y + row as f64 * self.cell_height;

        Extent {
            min_x,
            min_y,
            max_x: min_x + self.cell_width,
            max_y: min_y + self.cell_height,
            crs: self.extent.crs.clone(),
        }
    }
}

impl Iterator for UniformGridIterator {
    type Item = Extent;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, column) = self.cursor.advance()?;
        Some(self.cell(row, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UniformGridIterator {}

impl FusedIterator for UniformGridIterator {}

fn check_dimensions(rows: i64, columns: i64) -> Result<(usize, usize)> {
    if rows <= 0 {
        return Err(GeoItersError::InvalidArgument(format!(
            "rows must be a positive integer larger than zero, got {}",
            rows
        )));
    }
    if columns <= 0 {
        return Err(GeoItersError::InvalidArgument(format!(
            "columns must be a positive integer larger than zero, got {}",
            columns
        )));
    }
    let rows = usize::try_from(rows).map_err(|_| {
        GeoItersError::InvalidArgument(format!("{} rows do not fit in usize", rows))
    })?;
    let columns = usize::try_from(columns).map_err(|_| {
        GeoItersError::InvalidArgument(format!("{} columns do not fit in usize", columns))
    })?;
    Ok((rows, columns))
}

/// Configuration for [`AreaTargetedGridIterator`].
///
/// `rows` and `columns` are only used when no `patch_max_area` is set.
///
/// # Example
/// ```
/// use geoiters_rs::{Extent, GridConfig};
///
/// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
/// let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
///
/// // Patches of at most 4 km²
/// let grid = GridConfig::new().patch_max_area(4_000_000.0).build(ext)?;
/// println!("{} x {}", grid.rows(), grid.columns());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub rows: i64,
    pub columns: i64,
    /// Target patch area in square meters
    pub patch_max_area: Option<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            patch_max_area: None,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: i64) -> Self {
        self.rows = rows;
        self
    }

    pub fn columns(mut self, columns: i64) -> Self {
        self.columns = columns;
        self
    }

    /// Size the grid from a target patch area (m²) instead of rows/columns.
    pub fn patch_max_area(mut self, area: f64) -> Self {
        self.patch_max_area = Some(area);
        self
    }

    pub fn build(&self, extent: Extent) -> Result<AreaTargetedGridIterator> {
        AreaTargetedGridIterator::from_config(extent, self)
    }
}

/// Grid iterator whose rows and columns can be derived from a target patch area.
///
/// With a `patch_max_area`, the extent is measured in meters (haversine, in
/// EPSG:4326) and split into roughly square patches of that area:
/// `columns = ceil(width_m / sqrt(area))`, `rows = ceil(height_m / sqrt(area))`.
/// The grid lines are still evenly spaced in the source CRS, so patches of a
/// non-equidistant CRS are not all the same size on the ground.
///
/// Without a `patch_max_area` it behaves exactly like [`UniformGridIterator`].
/// The extent must carry a CRS in both modes.
#[derive(Debug, Clone)]
pub struct AreaTargetedGridIterator {
    grid: UniformGridIterator,
    patch_max_area: Option<f64>,
}

impl AreaTargetedGridIterator {
    pub fn new(
        extent: Extent,
        rows: i64,
        columns: i64,
        patch_max_area: Option<f64>,
    ) -> Result<Self> {
        let config = GridConfig {
            rows,
            columns,
            patch_max_area,
        };
        Self::from_config(extent, &config)
    }

    pub fn from_config(extent: Extent, config: &GridConfig) -> Result<Self> {
        Self::with_projector(extent, config, &ProjTransformer)
    }

    /// Same as [`AreaTargetedGridIterator::from_config`], measuring through `projector`.
    pub fn with_projector<P: Projector + ?Sized>(
        extent: Extent,
        config: &GridConfig,
        projector: &P,
    ) -> Result<Self> {
        let (rows, columns) = check_dimensions(config.rows, config.columns)?;
        if extent.crs().is_none() {
            return Err(GeoItersError::InvalidState(
                "extent must have a defined CRS".to_string(),
            ));
        }

        let (rows, columns) = match config.patch_max_area {
            None => (rows, columns),
            Some(area) if area > 0.0 => {
                let (width_m, height_m) = extent.geographic_size_with(projector)?;
                let side = area.sqrt();
                let rows = patches_along(height_m, side);
                let columns = patches_along(width_m, side);

                debug!(
                    "{:.1} m x {:.1} m at {} m² per patch gives {} rows x {} columns",
                    width_m, height_m, area, rows, columns
                );
                (rows, columns)
            }
            Some(area) => {
                return Err(GeoItersError::InvalidArgument(format!(
                    "patch_max_area must be a positive number larger than zero, got {}",
                    area
                )));
            }
        };

        Ok(Self {
            grid: UniformGridIterator::from_dimensions(extent, rows, columns)?,
            patch_max_area: config.patch_max_area,
        })
    }

    pub fn extent(&self) -> &Extent {
        self.grid.extent()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn cell_width(&self) -> f64 {
        self.grid.cell_width()
    }

    pub fn cell_height(&self) -> f64 {
        self.grid.cell_height()
    }

    pub fn patch_max_area(&self) -> Option<f64> {
        self.patch_max_area
    }
}

// A zero-length side still gets one patch so step sizes stay finite.
// Counts beyond `usize` saturate and are rejected by the cursor.
fn patches_along(length_m: f64, side_m: f64) -> usize {
    ((length_m / side_m).ceil() as usize).max(1)
}

impl Iterator for AreaTargetedGridIterator {
    type Item = Extent;

    fn next(&mut self) -> Option<Self::Item> {
        self.grid.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.grid.size_hint()
    }
}

impl ExactSizeIterator for AreaTargetedGridIterator {}

impl FusedIterator for AreaTargetedGridIterator {}
