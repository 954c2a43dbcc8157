use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised while importing or triangulating vector data.
///
/// Degenerate or empty geometry is not an error: the normalizer and the
/// extruder fall back to neutral results instead.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("failed to read shape source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}
