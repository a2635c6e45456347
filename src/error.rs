use thiserror::Error;

/// Error type for geoiters-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoItersError {
    /// An argument is out of range (non-positive rows/columns/area, zoom above 24).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The extent is missing something the operation needs, usually a CRS.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// A bounds string could not be parsed.
    #[error("Format error: {0}")]
    FormatError(String),
    /// Coordinate projection failed.
    #[error("Projection error: {0}")]
    ProjectionError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, GeoItersError>;
