use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use layerview_core::{Color, Layer, LayerIndex, Result};

/// Shader-side type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Float,
    Vector2f,
    Vector4f,
}

impl AttributeType {
    /// Number of floats per vertex.
    pub fn components(&self) -> usize {
        match self {
            AttributeType::Float => 1,
            AttributeType::Vector2f => 2,
            AttributeType::Vector4f => 4,
        }
    }
}

/// Per-vertex values of an extension attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeData {
    Scalar(Vec<f32>),
    Vector2(Vec<[f32; 2]>),
    Vector4(Vec<[f32; 4]>),
}

impl AttributeData {
    pub fn len(&self) -> usize {
        match self {
            AttributeData::Scalar(v) => v.len(),
            AttributeData::Vector2(v) => v.len(),
            AttributeData::Vector4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeData::Scalar(_) => AttributeType::Float,
            AttributeData::Vector2(_) => AttributeType::Vector2f,
            AttributeData::Vector4(_) => AttributeType::Vector4f,
        }
    }

    /// Values as one contiguous float slice, ready for upload.
    pub fn as_flat(&self) -> &[f32] {
        match self {
            AttributeData::Scalar(v) => v.as_slice(),
            AttributeData::Vector2(v) => v.as_flattened(),
            AttributeData::Vector4(v) => v.as_flattened(),
        }
    }
}

/// A named vertex attribute and the shader input it binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub value: AttributeData,
    pub opengl_name: String,
    pub opengl_type: AttributeType,
}

impl VertexAttribute {
    pub fn new(value: AttributeData, opengl_name: &str) -> Self {
        let opengl_type = value.attribute_type();
        Self {
            value,
            opengl_name: opengl_name.to_string(),
            opengl_type,
        }
    }
}

/// Render-ready buffers for the whole print, produced by
/// [`LayerDataBuilder::build`](crate::LayerDataBuilder::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    vertices: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    /// Line segment endpoints, two entries per segment.
    indices: Vec<u32>,
    colors: Vec<Color>,
    uvs: Vec<[f32; 2]>,
    file_name: Option<String>,
    center_position: [f32; 3],
    layers: BTreeMap<LayerIndex, Layer>,
    element_counts: BTreeMap<LayerIndex, usize>,
    attributes: BTreeMap<String, VertexAttribute>,
}

/// Everything [`LayerData::new`] needs, grouped to keep the call readable.
#[derive(Debug, Default)]
pub struct LayerDataParts {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub colors: Vec<Color>,
    pub uvs: Vec<[f32; 2]>,
    pub file_name: Option<String>,
    pub center_position: [f32; 3],
    pub layers: BTreeMap<LayerIndex, Layer>,
    pub element_counts: BTreeMap<LayerIndex, usize>,
    pub attributes: BTreeMap<String, VertexAttribute>,
}

impl LayerData {
    pub fn new(parts: LayerDataParts) -> Self {
        for (name, attr) in &parts.attributes {
            debug_assert_eq!(
                attr.value.as_flat().len(),
                parts.vertices.len() * attr.opengl_type.components(),
                "attribute {} does not match the vertex count",
                name
            );
        }
        Self {
            vertices: parts.vertices,
            normals: parts.normals,
            indices: parts.indices,
            colors: parts.colors,
            uvs: parts.uvs,
            file_name: parts.file_name,
            center_position: parts.center_position,
            layers: parts.layers,
            element_counts: parts.element_counts,
            attributes: parts.attributes,
        }
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

    /// Per-type base colors. Material colors live in the `colors` attribute.
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

    pub fn layers(&self) -> &BTreeMap<LayerIndex, Layer> {
        &self.layers
    }

    pub fn layer(&self, index: LayerIndex) -> Option<&Layer> {
        self.layers.get(&index)
    }

    pub fn element_counts(&self) -> &BTreeMap<LayerIndex, usize> {
        &self.element_counts
    }

    pub fn attributes(&self) -> &BTreeMap<String, VertexAttribute> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.get(name)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of line segments.
    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Range of [`indices`](Self::indices) holding the segments of `layer`.
    ///
    /// Layers are laid out in ascending index order, so the range starts
    /// after every segment of the layers below.
    pub fn layer_index_range(&self, layer: LayerIndex) -> Option<Range<usize>> {
        let count = *self.element_counts.get(&layer)?;
        let before: usize = self.element_counts.range(..layer).map(|(_, c)| c).sum();
        Some(before * 2..(before + count) * 2)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_from_data() {
        let attr = VertexAttribute::new(AttributeData::Vector2(vec![[0.4, 0.2]]), "a_line_dim");
        assert_eq!(attr.opengl_type, AttributeType::Vector2f);
        assert_eq!(attr.opengl_type.components(), 2);
        assert_eq!(attr.value.as_flat(), &[0.4, 0.2]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not match the vertex count")]
    fn test_attribute_shape_mismatch() {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            "line_dimensions".to_string(),
            VertexAttribute::new(AttributeData::Vector2(vec![[0.4, 0.2]]), "a_line_dim"),
        );
        LayerData::new(LayerDataParts {
            vertices: vec![[0.0; 3]; 2],
            attributes,
            ..Default::default()
        });
    }

    #[test]
    fn test_attribute_type_serializes_lowercase() {
        let json = serde_json::to_string(&AttributeType::Vector4f).unwrap();
        assert_eq!(json, "\"vector4f\"");
    }

    #[test]
    fn test_layer_index_range() {
        let mut element_counts = BTreeMap::new();
        element_counts.insert(-1, 2);
        element_counts.insert(0, 3);
        element_counts.insert(4, 1);
        let data = LayerData::new(LayerDataParts {
            indices: vec![0; 12],
            element_counts,
            ..Default::default()
        });

        assert_eq!(data.line_count(), 6);
        assert_eq!(data.layer_index_range(-1), Some(0..4));
        assert_eq!(data.layer_index_range(0), Some(4..10));
        assert_eq!(data.layer_index_range(4), Some(10..12));
        assert_eq!(data.layer_index_range(2), None);
    }
}
