use serde::{Deserialize, Serialize};

use crate::buffers::LineMeshBuffers;
use crate::polygon::LayerPolygon;

/// Index of a print layer. Raft layers below the model are negative.
pub type LayerIndex = i32;

/// One horizontal slice of the print and its toolpath polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerIndex,
    pub height: f32,
    pub thickness: f32,
    /// Polygons in render order.
    pub polygons: Vec<LayerPolygon>,
    /// Line segments written by the last build.
    element_count: usize,
}

impl Layer {
    pub fn new(id: LayerIndex) -> Self {
        Self {
            id,
            height: 0.0,
            thickness: 0.0,
            polygons: Vec::new(),
            element_count: 0,
        }
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    pub fn add_polygon(&mut self, polygon: LayerPolygon) {
        self.polygons.push(polygon);
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn line_mesh_vertex_count(&self) -> usize {
        self.polygons.iter().map(|p| p.line_mesh_vertex_count()).sum()
    }

    pub fn line_mesh_element_count(&self) -> usize {
        self.polygons.iter().map(|p| p.line_mesh_element_count()).sum()
    }

    /// Write every polygon into `buffers` starting at the given offsets and
    /// return the offsets just past this layer's data.
    pub fn build(
        &mut self,
        vertex_offset: usize,
        index_offset: usize,
        shade_factor: f32,
        buffers: &mut LineMeshBuffers,
    ) -> (usize, usize) {
        let mut next_vertex = vertex_offset;
        let mut next_index = index_offset;
        self.element_count = 0;

        for polygon in &self.polygons {
            polygon.build(next_vertex, next_index, self.thickness, shade_factor, buffers);
            next_vertex += polygon.line_mesh_vertex_count();
            next_index += polygon.line_mesh_element_count();
            self.element_count += polygon.line_mesh_element_count();
        }

        log::debug!(
            "Layer {}: {} polygons, {} vertices, {} segments",
            self.id,
            self.polygons.len(),
            next_vertex - vertex_offset,
            self.element_count
        );
        (next_vertex, next_index)
    }
}
