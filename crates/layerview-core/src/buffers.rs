use crate::geometry::Color;
use crate::polygon::{ExtruderId, PolygonType};

/// Largest vertex count a line mesh can index.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// The global line-mesh arrays written by every layer during a build.
///
/// All per-vertex arrays have the same length and the index array holds one
/// `[start, end]` pair per line segment. Buffers are sized once from a full
/// counting pass and are never grown while layers write into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMeshBuffers {
    pub vertices: Vec<[f32; 3]>,
    /// `[line width, layer thickness]` per vertex.
    pub line_dimensions: Vec<[f32; 2]>,
    /// Base color per vertex, derived from the polygon type.
    pub colors: Vec<Color>,
    pub extruders: Vec<ExtruderId>,
    pub line_types: Vec<PolygonType>,
    pub indices: Vec<[u32; 2]>,
}

impl LineMeshBuffers {
    /// Allocate buffers for exactly `vertex_count` vertices and
    /// `segment_count` line segments.
    ///
    /// Segment endpoints are `u32`, so at most [`MAX_VERTICES`] vertices
    /// can be addressed.
    pub fn with_counts(vertex_count: usize, segment_count: usize) -> Self {
        debug_assert!(
            vertex_count <= MAX_VERTICES,
            "{} vertices exceed the u32 index range",
            vertex_count
        );
        Self {
            vertices: vec![[0.0; 3]; vertex_count],
            line_dimensions: vec![[0.0; 2]; vertex_count],
            colors: vec![[0.0; 4]; vertex_count],
            extruders: vec![0; vertex_count],
            line_types: vec![PolygonType::None; vertex_count],
            indices: vec![[0; 2]; segment_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len()
    }

    /// Flatten the segment pairs into a sequential index list.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flat_map(|pair| pair.iter().copied()).collect()
    }
}
