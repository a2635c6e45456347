use crate::coord::{ProjTransformer, Projector};
use crate::core::constants::{EPSG_WEB_MERCATOR, EPSG_WGS84, WEB_MERCATOR_BOUND};
use crate::core::distance::haversine;
use crate::core::tile::{TileRange, lonlat_to_tile, tile_to_lonlat};
use crate::error::{GeoItersError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// The full Web-Mercator plane (EPSG:3857).
pub static WEB_MERCATOR_EXTENT: LazyLock<Extent> = LazyLock::new(|| {
    Extent::with_crs(
        -WEB_MERCATOR_BOUND,
        -WEB_MERCATOR_BOUND,
        WEB_MERCATOR_BOUND,
        WEB_MERCATOR_BOUND,
        EPSG_WEB_MERCATOR,
    )
});

/// The whole world in geographic coordinates (EPSG:4326).
pub static WORLD_EXTENT: LazyLock<Extent> =
    LazyLock::new(|| Extent::with_crs(-180.0, -90.0, 180.0, 90.0, EPSG_WGS84));

/// An axis-aligned bounding box tagged with a coordinate reference system.
///
/// Bounds are stored as given: nothing enforces `min_x <= max_x` or
/// `min_y <= max_y`. Only [`Extent::transform_to`] reorders them, after
/// reprojecting. Use [`Extent::normalized`] to order them explicitly.
///
/// # Example
///
/// ```
/// use geoiters_rs::Extent;
///
/// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
/// let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
/// println!("{} covers {:.0} m²", ext, ext.area()?);
///
/// let parsed: Extent = "-74.2,40.65,-73.7,40.85".parse()?;
/// assert_eq!(parsed.as_list(), ext.as_list());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// CRS identifier such as `"EPSG:4326"`; `None` when unspecified
    pub crs: Option<String>,
}

/// Serialized `{left, bottom, right, top}` form of an [`Extent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtentBounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Extent {
    /// Creates an extent without a CRS.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: None,
        }
    }

    /// Creates an extent tagged with `crs`.
    pub fn with_crs(min_x: f64, min_y: f64, max_x: f64, max_y: f64, crs: impl Into<String>) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: Some(crs.into()),
        }
    }

    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    /// Returns an independent copy with identical fields.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Width in native CRS units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height in native CRS units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point in native CRS units.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn is_normalized(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Returns a copy with the bounds ordered on both axes.
    pub fn normalized(&self) -> Self {
        Self {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
            crs: self.crs.clone(),
        }
    }

    /// Approximate area in square meters.
    ///
    /// The extent is reprojected to EPSG:4326 and the haversine lengths of its
    /// bottom and left edges are multiplied. This ignores the convergence of
    /// meridians, so the estimate degrades for very large or near-polar extents.
    pub fn area(&self) -> Result<f64> {
        self.area_with(&ProjTransformer)
    }

    /// Same as [`Extent::area`], reprojecting through `projector`.
    pub fn area_with<P: Projector + ?Sized>(&self, projector: &P) -> Result<f64> {
        let (width, height) = self.geographic_size_with(projector)?;
        Ok(width * height)
    }

    /// Haversine width and height in meters of the extent's bottom and left edges.
    pub(crate) fn geographic_size_with<P: Projector + ?Sized>(
        &self,
        projector: &P,
    ) -> Result<(f64, f64)> {
        let geo = self.transform_with(projector, EPSG_WGS84)?;
        let width = haversine(geo.min_x, geo.min_y, geo.max_x, geo.min_y);
        let height = haversine(geo.min_x, geo.min_y, geo.min_x, geo.max_y);
        Ok((width, height))
    }

    /// Returns the closed five-point ring of the box, starting at `(min_x, min_y)`.
    pub fn to_box_coordinates(&self) -> [(f64, f64); 5] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
            (self.min_x, self.min_y),
        ]
    }

    /// Reprojects the extent into `target_crs` using PROJ.
    ///
    /// Equal source and target (including both unset) return the extent
    /// unchanged. The two corners are transformed and the result is reordered
    /// so that `min <= max` on both axes.
    ///
    /// # Example
    /// ```no_run
    /// use geoiters_rs::{Extent, WORLD_EXTENT};
    ///
    /// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
    /// let merc = WORLD_EXTENT.transform_to("EPSG:3857")?;
    /// assert_eq!(merc.crs(), Some("EPSG:3857"));
    ///
    /// let untagged = Extent::new(0.0, 0.0, 1.0, 1.0);
    /// assert!(untagged.transform_to("EPSG:3857").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn transform_to<'a>(&self, target_crs: impl Into<Option<&'a str>>) -> Result<Self> {
        self.transform_with(&ProjTransformer, target_crs)
    }

    /// Same as [`Extent::transform_to`], delegating point transforms to `projector`.
    pub fn transform_with<'a, P: Projector + ?Sized>(
        &self,
        projector: &P,
        target_crs: impl Into<Option<&'a str>>,
    ) -> Result<Self> {
        let target_crs = target_crs.into();
        if self.crs() == target_crs {
            return Ok(self.clone());
        }

        let source_crs = self.crs().ok_or_else(|| {
            GeoItersError::InvalidState("cannot transform without a source CRS".to_string())
        })?;
        let target_crs = target_crs.ok_or_else(|| {
            GeoItersError::InvalidArgument(
                "cannot transform to an unspecified CRS".to_string(),
            )
        })?;

        debug!("transforming {} from {} to {}", self, source_crs, target_crs);

        let mut corners = [(self.min_x, self.min_y), (self.max_x, self.max_y)];
        projector.convert_all(source_crs, target_crs, &mut corners)?;
        let [(x1, y1), (x2, y2)] = corners;

        Ok(Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
            crs: Some(target_crs.to_string()),
        })
    }

    /// Returns `[min_x, min_y, max_x, max_y]`.
    pub fn as_list(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Returns the bounds keyed as `left, bottom, right, top`.
    pub fn as_dict(&self) -> ExtentBounds {
        ExtentBounds {
            left: self.min_x,
            bottom: self.min_y,
            right: self.max_x,
            top: self.max_y,
        }
    }

    /// Builds the EPSG:4326 extent covering exactly one slippy-map tile.
    ///
    /// # Example
    /// ```
    /// use geoiters_rs::Extent;
    ///
    /// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
    /// let tile = Extent::from_tile_coordinates(1, 0, 1)?;
    /// assert_eq!(tile.min_x, 0.0);
    /// assert_eq!(tile.max_x, 180.0);
    /// assert_eq!(tile.min_y, 0.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_tile_coordinates(xtile: u32, ytile: u32, zoom: u8) -> Result<Self> {
        let (min_x, max_y) = tile_to_lonlat(xtile, ytile, zoom)?;
        let (max_x, min_y) = tile_to_lonlat(xtile.saturating_add(1), ytile.saturating_add(1), zoom)?;
        Ok(Self::with_crs(min_x, min_y, max_x, max_y, EPSG_WGS84))
    }

    /// Parses `"min_x,min_y,max_x,max_y"`.
    ///
    /// Anything other than exactly four comma-separated numbers is a
    /// [`GeoItersError::FormatError`].
    pub fn from_string(bounds: &str, crs: Option<&str>) -> Result<Self> {
        let parts: Vec<&str> = bounds.split(',').collect();
        if parts.len() != 4 {
            return Err(GeoItersError::FormatError(format!(
                "expected 4 comma-separated values, got {} in '{}'",
                parts.len(),
                bounds
            )));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            let part = part.trim();
            *value = part.parse().map_err(|_| {
                GeoItersError::FormatError(format!("invalid number '{}' in '{}'", part, bounds))
            })?;
        }

        let [min_x, min_y, max_x, max_y] = values;
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: crs.map(str::to_string),
        })
    }

    /// Range of tiles covering the extent at `zoom`, reprojecting with PROJ.
    pub fn to_tile_range(&self, zoom: u8) -> Result<TileRange> {
        self.to_tile_range_with(&ProjTransformer, zoom)
    }

    /// Same as [`Extent::to_tile_range`], reprojecting through `projector`.
    ///
    /// The south-west corner gives the minimum column and maximum row, the
    /// north-east corner the maximum column and minimum row. An extent whose
    /// bounds are unordered in EPSG:4326 gives an empty range.
    pub fn to_tile_range_with<P: Projector + ?Sized>(
        &self,
        projector: &P,
        zoom: u8,
    ) -> Result<TileRange> {
        let geo = self.transform_with(projector, EPSG_WGS84)?;
        let south_west = lonlat_to_tile(geo.min_x, geo.min_y, zoom)?;
        let north_east = lonlat_to_tile(geo.max_x, geo.max_y, zoom)?;

        Ok(TileRange {
            x_min: south_west.x,
            y_min: north_east.y,
            x_max: north_east.x,
            y_max: south_west.y,
            zoom,
        })
    }

    /// Serializes the extent to a JSON object.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GeoItersError::SerializationError(e.to_string()))
    }

    /// Deserializes an extent from the JSON produced by [`Extent::to_json`].
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| GeoItersError::SerializationError(e.to_string()))
    }
}

impl FromStr for Extent {
    type Err = GeoItersError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s, None)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extent(min_x={}, min_y={}, max_x={}, max_y={}, crs={})",
            self.min_x,
            self.min_y,
            self.max_x,
            self.max_y,
            self.crs().unwrap_or("None")
        )
    }
}

impl From<ExtentBounds> for Extent {
    fn from(bounds: ExtentBounds) -> Self {
        Self::new(bounds.left, bounds.bottom, bounds.right, bounds.top)
    }
}
