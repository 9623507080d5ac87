use std::collections::BTreeMap;

use layerview_core::{
    Color, ExtruderId, Layer, LayerIndex, LayerPolygon, LineMeshBuffers, Point3, PolygonType,
    Result,
};

use crate::colorize::{check_material_color_map, material_colors, uncolored_vertex_count};
use crate::layer_data::{AttributeData, LayerData, LayerDataParts, VertexAttribute};
use crate::mesh_builder::MeshBuilder;
use crate::options::BuildOptions;

/// Collects toolpath polygons per layer and flattens them into [`LayerData`].
#[derive(Debug, Default)]
pub struct LayerDataBuilder {
    mesh: MeshBuilder,
    layers: BTreeMap<LayerIndex, Layer>,
    element_counts: BTreeMap<LayerIndex, usize>,
    options: BuildOptions,
}

impl LayerDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Mesh provenance (file name, center position, normals, UVs).
    pub fn mesh(&self) -> &MeshBuilder {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut MeshBuilder {
        &mut self.mesh
    }

    // ── Layer store ──────────────────────────────────────────────────

    fn layer_entry(&mut self, index: LayerIndex) -> &mut Layer {
        self.layers.entry(index).or_insert_with(|| Layer::new(index))
    }

    pub fn add_layer(&mut self, index: LayerIndex) {
        self.layer_entry(index);
    }

    /// Append a polygon printed by extruder 0 with a uniform line width.
    pub fn add_polygon(
        &mut self,
        index: LayerIndex,
        polygon_type: PolygonType,
        data: Vec<Point3>,
        line_width: f32,
    ) {
        let polygon = LayerPolygon::new(index, polygon_type, data, line_width);
        self.layer_entry(index).add_polygon(polygon);
    }

    /// Append a polygon with an explicit extruder and one width per point.
    pub fn add_extruder_polygon(
        &mut self,
        index: LayerIndex,
        extruder: ExtruderId,
        polygon_type: PolygonType,
        data: Vec<Point3>,
        line_widths: Vec<f32>,
    ) -> Result<()> {
        let layer = self.layer_entry(index);
        let polygon =
            LayerPolygon::with_line_widths(index, extruder, polygon_type, data, line_widths)?;
        layer.add_polygon(polygon);
        Ok(())
    }

    pub fn get_layer(&self, index: LayerIndex) -> Option<&Layer> {
        self.layers.get(&index)
    }

    pub fn get_layers(&self) -> &BTreeMap<LayerIndex, Layer> {
        &self.layers
    }

    /// Segments per layer, as recorded by the last build.
    pub fn get_element_counts(&self) -> &BTreeMap<LayerIndex, usize> {
        &self.element_counts
    }

    pub fn set_layer_height(&mut self, index: LayerIndex, height: f32) {
        self.layer_entry(index).set_height(height);
    }

    pub fn set_layer_thickness(&mut self, index: LayerIndex, thickness: f32) {
        self.layer_entry(index).set_thickness(thickness);
    }

    // ── Build ────────────────────────────────────────────────────────

    /// Flatten every layer into render buffers.
    ///
    /// `material_color_map` holds one RGBA row per extruder. Vertices of
    /// extruders without a row are left transparent black; use
    /// [`build_checked`](Self::build_checked) to reject them instead.
    pub fn build(&mut self, material_color_map: &[Color]) -> LayerData {
        let buffers = self.build_line_mesh();
        self.assemble(buffers, material_color_map)
    }

    /// Like [`build`](Self::build), but fails if any vertex references an
    /// extruder missing from `material_color_map`.
    ///
    /// The check runs before any layer is built, so a failed call leaves the
    /// builder exactly as the previous build left it.
    pub fn build_checked(&mut self, material_color_map: &[Color]) -> Result<LayerData> {
        check_material_color_map(&self.used_extruders(), material_color_map)?;
        Ok(self.build(material_color_map))
    }

    /// Extruders of every polygon that contributes vertices.
    fn used_extruders(&self) -> Vec<ExtruderId> {
        self.layers
            .values()
            .flat_map(|layer| &layer.polygons)
            .filter(|p| p.line_mesh_vertex_count() > 0)
            .map(|p| p.extruder)
            .collect()
    }

    /// Size all layers, allocate once, then let each layer write at its offset.
    fn build_line_mesh(&mut self) -> LineMeshBuffers {
        let mut vertex_count = 0;
        let mut index_count = 0;
        for layer in self.layers.values() {
            vertex_count += layer.line_mesh_vertex_count();
            index_count += layer.line_mesh_element_count();
        }
        log::debug!(
            "Sized {} layers: {} vertices, {} segments",
            self.layers.len(),
            vertex_count,
            index_count
        );

        let mut buffers = LineMeshBuffers::with_counts(vertex_count, index_count);
        let shade_factor = self.options.shade_factor;
        let mut vertex_offset = 0;
        let mut index_offset = 0;
        self.element_counts.clear();
        for (index, layer) in self.layers.iter_mut() {
            let expected = (
                vertex_offset + layer.line_mesh_vertex_count(),
                index_offset + layer.line_mesh_element_count(),
            );
            (vertex_offset, index_offset) =
                layer.build(vertex_offset, index_offset, shade_factor, &mut buffers);
            debug_assert_eq!((vertex_offset, index_offset), expected);
            self.element_counts.insert(*index, layer.element_count());
        }
        debug_assert_eq!(vertex_offset, vertex_count);
        debug_assert_eq!(index_offset, index_count);

        buffers
    }

    fn assemble(&mut self, buffers: LineMeshBuffers, material_color_map: &[Color]) -> LayerData {
        self.mesh.clear_geometry();
        self.mesh.add_vertices(&buffers.vertices);
        self.mesh.add_colors(&buffers.colors);
        self.mesh.add_indices(&buffers.flat_indices());

        let uncolored =
            uncolored_vertex_count(&buffers.extruders, &buffers.line_types, material_color_map);
        if uncolored > 0 {
            log::warn!(
                "{} vertices reference extruders outside the {}-entry material color map",
                uncolored,
                material_color_map.len()
            );
        }
        let material = material_colors(
            &buffers.extruders,
            &buffers.line_types,
            material_color_map,
            self.options.travel_color,
        );

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "line_dimensions".to_string(),
            VertexAttribute::new(AttributeData::Vector2(buffers.line_dimensions), "a_line_dim"),
        );
        attributes.insert(
            "extruders".to_string(),
            VertexAttribute::new(
                AttributeData::Scalar(buffers.extruders.iter().map(|e| *e as f32).collect()),
                "a_extruder",
            ),
        );
        attributes.insert(
            "colors".to_string(),
            VertexAttribute::new(AttributeData::Vector4(material), "a_material_color"),
        );
        attributes.insert(
            "line_types".to_string(),
            VertexAttribute::new(
                AttributeData::Scalar(buffers.line_types.iter().map(|t| t.tag() as f32).collect()),
                "a_line_type",
            ),
        );

        let data = LayerData::new(LayerDataParts {
            vertices: self.mesh.vertices().to_vec(),
            normals: self.mesh.normals().to_vec(),
            indices: self.mesh.indices().to_vec(),
            colors: self.mesh.colors().to_vec(),
            uvs: self.mesh.uv_coordinates().to_vec(),
            file_name: self.mesh.file_name().map(str::to_string),
            center_position: self.mesh.center_position(),
            layers: self.layers.clone(),
            element_counts: self.element_counts.clone(),
            attributes,
        });
        log::info!(
            "Built layer data: {} layers, {} vertices, {} lines",
            data.layers().len(),
            data.vertex_count(),
            data.line_count()
        );
        data
    }
}
