//! Structured error types for sheetgrid.
//!
//! Only the data-store and identifier-parsing surfaces return these. The
//! interaction layer clamps or ignores bad input instead of failing.

/// All errors that can occur in sheetgrid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed cell identifier or A1 reference.
    #[error("Invalid cell identifier: {0}")]
    Parse(String),

    /// Coordinate outside the sheet extent.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} sheet")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = GridError::OutOfBounds {
            row: 120,
            col: 3,
            rows: 100,
            cols: 26,
        };
        assert_eq!(
            err.to_string(),
            "Cell (120, 3) is outside the 100x26 sheet"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: GridError = parse.unwrap_err().into();
        assert!(matches!(err, GridError::Json(_)));
    }
}
