use crate::error::{GeoItersError, Result};
use log::trace;
use proj::Proj;

/// Transforms points between coordinate reference systems.
///
/// CRS identifiers are opaque strings such as `"EPSG:4326"`. Implementations
/// must at least handle geographic and Web-Mercator coordinates.
pub trait Projector {
    fn convert(&self, from_crs: &str, to_crs: &str, point: (f64, f64)) -> Result<(f64, f64)>;

    /// Transforms `points` in place.
    ///
    /// The default converts one point at a time; implementations with a
    /// costly setup per CRS pair should override it.
    fn convert_all(&self, from_crs: &str, to_crs: &str, points: &mut [(f64, f64)]) -> Result<()> {
        for point in points.iter_mut() {
            *point = self.convert(from_crs, to_crs, *point)?;
        }
        Ok(())
    }
}

/// [`Projector`] backed by the PROJ library.
///
/// Every call builds its own `Proj` for the CRS pair, so batch work should go
/// through [`Projector::convert_all`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjTransformer;

impl ProjTransformer {
    fn build(from_crs: &str, to_crs: &str) -> Result<Proj> {
        Proj::new_known_crs(from_crs, to_crs, None)
            .map_err(|e| GeoItersError::ProjectionError(e.to_string()))
    }
}

impl Projector for ProjTransformer {
    fn convert(&self, from_crs: &str, to_crs: &str, point: (f64, f64)) -> Result<(f64, f64)> {
        trace!("projecting {:?} from {} to {}", point, from_crs, to_crs);

        Self::build(from_crs, to_crs)?
            .convert(point)
            .map_err(|e| GeoItersError::ProjectionError(e.to_string()))
    }

    fn convert_all(&self, from_crs: &str, to_crs: &str, points: &mut [(f64, f64)]) -> Result<()> {
        trace!("projecting {} points from {} to {}", points.len(), from_crs, to_crs);

        Self::build(from_crs, to_crs)?
            .convert_array(points)
            .map_err(|e| GeoItersError::ProjectionError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{EPSG_WEB_MERCATOR, EPSG_WGS84, WEB_MERCATOR_BOUND};
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_to_web_mercator() -> Result<()> {
        let (x, y) = ProjTransformer.convert(EPSG_WGS84, EPSG_WEB_MERCATOR, (180.0, 0.0))?;

        assert_relative_eq!(x, WEB_MERCATOR_BOUND, epsilon = 1e-3);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<()> {
        let lon = -73.9857;
        let lat = 40.7484;

        let merc = ProjTransformer.convert(EPSG_WGS84, EPSG_WEB_MERCATOR, (lon, lat))?;
        let (back_lon, back_lat) = ProjTransformer.convert(EPSG_WEB_MERCATOR, EPSG_WGS84, merc)?;

        assert!((lon - back_lon).abs() < 0.0001);
        assert!((lat - back_lat).abs() < 0.0001);
        Ok(())
    }

    #[test]
    fn test_convert_all_matches_convert() -> Result<()> {
        let mut points = [(-74.2, 40.65), (-73.7, 40.85), (0.0, 0.0)];
        let expected: Vec<(f64, f64)> = points
            .iter()
            .map(|&p| ProjTransformer.convert(EPSG_WGS84, EPSG_WEB_MERCATOR, p))
            .collect::<Result<_>>()?;

        ProjTransformer.convert_all(EPSG_WGS84, EPSG_WEB_MERCATOR, &mut points)?;
        for ((x, y), (want_x, want_y)) in points.iter().zip(expected) {
            assert_relative_eq!(*x, want_x, epsilon = 1e-6);
            assert_relative_eq!(*y, want_y, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_crs() {
        let result = ProjTransformer.convert("EPSG:999999", EPSG_WGS84, (0.0, 0.0));
        assert!(matches!(result, Err(GeoItersError::ProjectionError(_))));

        let mut points = [(0.0, 0.0)];
        let result = ProjTransformer.convert_all("EPSG:999999", EPSG_WGS84, &mut points);
        assert!(matches!(result, Err(GeoItersError::ProjectionError(_))));
    }
}
