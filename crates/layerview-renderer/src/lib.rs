//! # Layer View Renderer
//!
//! Assembles per-layer toolpaths into the flat vertex, index and attribute
//! buffers consumed by the layer preview's line shader.
//!
//! A [`LayerDataBuilder`] collects polygons per layer, sizes every layer,
//! allocates the global buffers once and lets each layer fill its slice.
//! Material colors are then resolved per vertex and everything is packaged
//! into an immutable [`LayerData`].

pub mod builder;
pub mod colorize;
pub mod layer_data;
pub mod mesh_builder;
pub mod options;

pub use builder::LayerDataBuilder;
pub use layer_data::{AttributeData, AttributeType, LayerData, VertexAttribute};
pub use mesh_builder::MeshBuilder;
pub use options::BuildOptions;
