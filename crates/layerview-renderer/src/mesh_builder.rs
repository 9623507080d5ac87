use serde::{Deserialize, Serialize};

use layerview_core::Color;

/// Generic mesh buffers plus the provenance of the mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuilder {
    vertices: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    colors: Vec<Color>,
    uvs: Vec<[f32; 2]>,
    file_name: Option<String>,
    center_position: [f32; 3],
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertices(&mut self, vertices: &[[f32; 3]]) {
        self.vertices.extend_from_slice(vertices);
    }

    pub fn add_colors(&mut self, colors: &[Color]) {
        self.colors.extend_from_slice(colors);
    }

    pub fn add_indices(&mut self, indices: &[u32]) {
        self.indices.extend_from_slice(indices);
    }

    pub fn set_normals(&mut self, normals: Vec<[f32; 3]>) {
        self.normals = normals;
    }

    pub fn set_uv_coordinates(&mut self, uvs: Vec<[f32; 2]>) {
        self.uvs = uvs;
    }

    pub fn set_file_name(&mut self, file_name: &str) {
        self.file_name = Some(file_name.to_string());
    }

    pub fn set_center_position(&mut self, center: [f32; 3]) {
        self.center_position = center;
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn uv_coordinates(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn center_position(&self) -> [f32; 3] {
        self.center_position
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Drop vertex, color and index data, keeping normals, UVs and provenance.
    pub fn clear_geometry(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.indices.clear();
    }
}
