use crate::api::extent::Extent;
use crate::error::{GeoItersError, Result};
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

impl Extent {
    /// Bounding extent of a WKT or GeoJSON string.
    ///
    /// GeoJSON is detected by a leading `{`, everything else is read as WKT.
    ///
    /// # Example
    /// ```
    /// use geoiters_rs::Extent;
    ///
    /// # fn main() -> Result<(), geoiters_rs::GeoItersError> {
    /// let ext = Extent::from_geometry_str("LINESTRING(-74 40, -73 41)", Some("EPSG:4326"))?;
    /// assert_eq!(ext.as_list(), [-74.0, 40.0, -73.0, 41.0]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_geometry_str(s: &str, crs: Option<&str>) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('{') {
            Self::from_geojson_str(trimmed, crs)
        } else {
            Self::from_wkt_str(trimmed, crs)
        }
    }

    /// Bounding extent of a WKT geometry.
    pub fn from_wkt_str(s: &str, crs: Option<&str>) -> Result<Self> {
        let wkt: Wkt<f64> =
            Wkt::from_str(s).map_err(|e| GeoItersError::GeometryParseError(e.to_string()))?;
        let geometry: Geometry<f64> = wkt.try_into().map_err(|_| {
            GeoItersError::GeometryParseError("WKT has no geo-types equivalent".to_string())
        })?;
        Self::from_geometry(&geometry, crs)
    }

    /// Bounding extent of a GeoJSON geometry, feature or feature collection.
    ///
    /// Features go through [`Extent::from_feature`], so a `bbox` member wins
    /// over the geometry and a `crs` property is used when `crs` is `None`.
    /// A collection yields the union of its features.
    pub fn from_geojson_str(s: &str, crs: Option<&str>) -> Result<Self> {
        let geojson: GeoJson = s
            .parse()
            .map_err(|e: geojson::Error| GeoItersError::GeometryParseError(e.to_string()))?;

        let extent = match geojson {
            GeoJson::Geometry(geom) => {
                let geometry = Geometry::try_from(geom)
                    .map_err(|e| GeoItersError::GeometryParseError(e.to_string()))?;
                return Self::from_geometry(&geometry, crs);
            }
            GeoJson::Feature(feature) => Self::from_feature(&feature)?,
            GeoJson::FeatureCollection(collection) => {
                let mut extents = collection.features.iter().map(Self::from_feature);
                let first = extents.next().ok_or_else(|| {
                    GeoItersError::InvalidArgument(
                        "FeatureCollection has no features to bound".to_string(),
                    )
                })??;
                extents.try_fold(first, |acc, next| Ok::<_, GeoItersError>(acc.union(&next?)))?
            }
        };

        Ok(match crs {
            Some(crs) => Self {
                crs: Some(crs.to_string()),
                ..extent
            },
            None => extent,
        })
    }

    // Keeps the CRS of `self`.
    fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            crs: self.crs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_point() -> Result<()> {
        let json = r#"{"type":"Point","coordinates":[-0.1,51.5]}"#;
        let ext = Extent::from_geometry_str(json, Some("EPSG:4326"))?;
        assert_eq!(ext.as_list(), [-0.1, 51.5, -0.1, 51.5]);
        assert_eq!(ext.crs(), Some("EPSG:4326"));
        Ok(())
    }

    #[test]
    fn test_geojson_feature_uses_crs_property() -> Result<()> {
        let json = r#"{"type":"Feature","properties":{"crs":"EPSG:3857"},"geometry":{"type":"LineString","coordinates":[[-10.0,5.0],[-20.0,6.0]]}}"#;

        let ext = Extent::from_geometry_str(json, None)?;
        assert_eq!(ext.as_list(), [-20.0, 5.0, -10.0, 6.0]);
        assert_eq!(ext.crs(), Some("EPSG:3857"));

        let ext = Extent::from_geometry_str(json, Some("EPSG:4326"))?;
        assert_eq!(ext.crs(), Some("EPSG:4326"));
        Ok(())
    }

    #[test]
    fn test_geojson_feature_prefers_bbox() -> Result<()> {
        let json = r#"{"type":"Feature","bbox":[0.0,0.0,4.0,4.0],"properties":null,"geometry":{"type":"Point","coordinates":[1.0,1.0]}}"#;
        let ext = Extent::from_geometry_str(json, None)?;
        assert_eq!(ext.as_list(), [0.0, 0.0, 4.0, 4.0]);
        Ok(())
    }

    #[test]
    fn test_feature_collection_union() -> Result<()> {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[-74.2,40.85]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[-73.7,40.65]}}
        ]}"#;
        let ext = Extent::from_geometry_str(json, Some("EPSG:4326"))?;
        assert_eq!(ext.as_list(), [-74.2, 40.65, -73.7, 40.85]);
        assert_eq!(ext.crs(), Some("EPSG:4326"));
        Ok(())
    }

    #[test]
    fn test_empty_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            Extent::from_geometry_str(json, None),
            Err(GeoItersError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_wkt_polygon() -> Result<()> {
        let wkt = "  POLYGON((-74 40, -73 40, -73 41, -74 41, -74 40)) ";
        let ext = Extent::from_geometry_str(wkt, None)?;
        assert_eq!(ext.as_list(), [-74.0, 40.0, -73.0, 41.0]);
        assert_eq!(ext.crs(), None);
        Ok(())
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            Extent::from_geometry_str("NOT A GEOMETRY", None),
            Err(GeoItersError::GeometryParseError(_))
        ));
        assert!(matches!(
            Extent::from_geometry_str("{\"type\":", None),
            Err(GeoItersError::GeometryParseError(_))
        ));
    }
}
