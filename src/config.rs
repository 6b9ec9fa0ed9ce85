//! Grid configuration: cell metrics, header sizes, render buffer, autoscroll tuning.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{GridExtent, Size};

/// Configuration for the grid core.
///
/// Every field has a default, so hosts only pass what they want to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Width of every cell in pixels
    pub cell_width: f32,
    /// Height of every cell in pixels
    pub cell_height: f32,
    /// Whether row/column headers take up space inside the container
    pub show_headers: bool,
    /// Width of row headers in pixels
    pub row_header_width: f32,
    /// Height of column headers in pixels
    pub col_header_height: f32,
    /// Extra rows/cols rendered past the visible edge to avoid pop-in while scrolling
    pub buffer: u32,
    /// Distance from the container edge (pixels) where drag autoscroll kicks in
    pub autoscroll_threshold: f32,
    /// Scroll step (pixels per frame) when the pointer sits at the very edge
    pub autoscroll_max_step: f32,
    /// Rows in a freshly created sheet
    pub default_rows: u32,
    /// Columns in a freshly created sheet
    pub default_cols: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 128.0,
            cell_height: 32.0,
            show_headers: true,
            row_header_width: 48.0,
            col_header_height: 32.0,
            buffer: 5,
            autoscroll_threshold: 40.0,
            autoscroll_max_step: 20.0,
            default_rows: 100,
            default_cols: 26,
        }
    }
}

impl GridConfig {
    /// Parse a JSON options object and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes the viewport math cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("cellWidth", self.cell_width),
            ("cellHeight", self.cell_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        let non_negative = [
            ("rowHeaderWidth", self.row_header_width),
            ("colHeaderHeight", self.col_header_height),
            ("autoscrollThreshold", self.autoscroll_threshold),
            ("autoscrollMaxStep", self.autoscroll_max_step),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn cell_size(&self) -> Size {
        Size::new(self.cell_width, self.cell_height)
    }

    pub fn default_extent(&self) -> GridExtent {
        GridExtent::new(self.default_rows, self.default_cols)
    }

    /// Offset of the cell area inside the container (header band sizes).
    pub fn header_offset(&self) -> Size {
        if self.show_headers {
            Size::new(self.row_header_width, self.col_header_height)
        } else {
            Size::default()
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"cellHeight": 24, "buffer": 2}"#).unwrap();
        assert_eq!(config.cell_height, 24.0);
        assert_eq!(config.buffer, 2);
        assert_eq!(config.cell_width, 128.0);
        assert_eq!(config.default_extent(), GridExtent::new(100, 26));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let err = GridConfig::from_json(r#"{"cellWidth": 0}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = GridConfig {
            autoscroll_threshold: -1.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_header_offset_hidden() {
        let config = GridConfig {
            show_headers: false,
            ..GridConfig::default()
        };
        assert_eq!(config.header_offset(), Size::default());
    }
}
