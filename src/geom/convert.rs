use crate::api::extent::Extent;
use crate::error::{GeoItersError, Result};
use geo::BoundingRect;
use geo_types::{Geometry, LineString, Polygon, Rect, coord};
use geojson::{Feature, JsonObject, JsonValue};
use wkt::ToWkt;

/// `(left, bottom, right, top)`, the order rasterio and most GIS tooling use.
pub type Bounds = (f64, f64, f64, f64);

impl Extent {
    /// Builds an extent from a `(left, bottom, right, top)` tuple.
    pub fn from_bounds(bounds: Bounds, crs: Option<&str>) -> Self {
        let (left, bottom, right, top) = bounds;
        Self {
            min_x: left,
            min_y: bottom,
            max_x: right,
            max_y: top,
            crs: crs.map(str::to_string),
        }
    }

    /// Returns the bounds as `(left, bottom, right, top)`.
    pub fn to_bounds(&self) -> Bounds {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn from_rect(rect: &Rect<f64>, crs: Option<&str>) -> Self {
        Self::from_bounds((rect.min().x, rect.min().y, rect.max().x, rect.max().y), crs)
    }

    /// Converts to a `geo_types::Rect`, which orders the corners.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
    }

    /// Converts to a polygon whose exterior is [`Extent::to_box_coordinates`].
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring: Vec<_> = self
            .to_box_coordinates()
            .iter()
            .map(|&(x, y)| coord! { x: x, y: y })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    /// Bounding extent of any geometry.
    ///
    /// Empty geometries have no bounds and are rejected.
    pub fn from_geometry(geometry: &Geometry<f64>, crs: Option<&str>) -> Result<Self> {
        let rect = geometry.bounding_rect().ok_or_else(|| {
            GeoItersError::InvalidArgument("geometry is empty and has no bounds".to_string())
        })?;
        Ok(Self::from_rect(&rect, crs))
    }

    /// Polygon of the extent as WKT.
    pub fn to_wkt(&self) -> String {
        self.to_polygon().wkt_string()
    }

    /// GeoJSON feature with the box polygon, a `bbox` member and the CRS
    /// under the `crs` property.
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(
            "crs".to_string(),
            self.crs()
                .map_or(JsonValue::Null, |crs| JsonValue::String(crs.to_string())),
        );

        Feature {
            bbox: Some(self.as_list().to_vec()),
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Reads an extent back from a GeoJSON feature.
    ///
    /// The `bbox` member is preferred; without one the bounds of the feature
    /// geometry are used. The CRS comes from a string `crs` property.
    pub fn from_feature(feature: &Feature) -> Result<Self> {
        let crs = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("crs"))
            .and_then(JsonValue::as_str);

        if let Some(bbox) = &feature.bbox {
            if let &[min_x, min_y, max_x, max_y] = bbox.as_slice() {
                return Ok(Self::from_bounds((min_x, min_y, max_x, max_y), crs));
            }
        }

        let geometry = feature.geometry.clone().ok_or_else(|| {
            GeoItersError::GeometryParseError("Feature has no bbox or geometry".to_string())
        })?;
        let geometry = Geometry::try_from(geometry)
            .map_err(|e| GeoItersError::GeometryParseError(e.to_string()))?;
        Self::from_geometry(&geometry, crs)
    }
}

impl From<&Extent> for Rect<f64> {
    fn from(extent: &Extent) -> Self {
        extent.to_rect()
    }
}

impl From<&Extent> for Polygon<f64> {
    fn from(extent: &Extent) -> Self {
        extent.to_polygon()
    }
}

impl From<&Extent> for Feature {
    fn from(extent: &Extent) -> Self {
        extent.to_feature()
    }
}
