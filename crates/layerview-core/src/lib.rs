//! # Layer View Core
//!
//! Per-layer toolpath model for the slicer's layer preview: layers,
//! typed line-strip polygons and the flat line-mesh buffers they expand into.
//!
//! Layers size themselves first and then write at caller-supplied offsets,
//! so the whole print can be flattened into pre-allocated buffers.

pub mod buffers;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod polygon;

pub use buffers::LineMeshBuffers;
pub use error::{LayerViewError, Result};
pub use geometry::{Color, Point3};
pub use layer::{Layer, LayerIndex};
pub use polygon::{ExtruderId, LayerPolygon, PolygonType};
