/// Mean Earth radius used by the haversine distance, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Half the width of the Web-Mercator plane, in meters
pub const WEB_MERCATOR_BOUND: f64 = 20037508.342789244;

/// Latitude at which the Web-Mercator square ends
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0511287798066;

/// Highest supported slippy-map zoom level
pub const MAX_ZOOM_LEVEL: u8 = 24;

/// Geographic coordinates (WGS84 lon/lat)
pub const EPSG_WGS84: &str = "EPSG:4326";

/// Web-Mercator coordinates
pub const EPSG_WEB_MERCATOR: &str = "EPSG:3857";

/// Default grid rows when no patch area is given
pub const DEFAULT_ROWS: i64 = 10;

/// Default grid columns when no patch area is given
pub const DEFAULT_COLUMNS: i64 = 10;
