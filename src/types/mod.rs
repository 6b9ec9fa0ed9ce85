//! Data types shared by the grid core.

mod geometry;
mod range;
mod value;

pub use geometry::*;
pub use range::*;
pub use value::*;
