use serde::{Deserialize, Serialize};

use crate::buffers::{LineMeshBuffers, MAX_VERTICES};
use crate::error::{LayerViewError, Result};
use crate::geometry::{shade, Color, Point3};
use crate::layer::LayerIndex;

/// Index of the extruder (material source) that prints a polygon.
pub type ExtruderId = u32;

/// Purpose of a toolpath line strip.
///
/// The discriminants are the numeric tags written to the `line_types`
/// vertex attribute and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum PolygonType {
    #[default]
    None = 0,
    Inset0 = 1,
    InsetX = 2,
    Skin = 3,
    Support = 4,
    Skirt = 5,
    Infill = 6,
    SupportInfill = 7,
    MoveCombing = 8,
    MoveRetraction = 9,
}

impl PolygonType {
    pub const ALL: [PolygonType; 10] = [
        PolygonType::None,
        PolygonType::Inset0,
        PolygonType::InsetX,
        PolygonType::Skin,
        PolygonType::Support,
        PolygonType::Skirt,
        PolygonType::Infill,
        PolygonType::SupportInfill,
        PolygonType::MoveCombing,
        PolygonType::MoveRetraction,
    ];

    pub fn tag(self) -> i32 {
        self as i32
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Non-printing nozzle motion.
    pub fn is_travel(self) -> bool {
        matches!(self, PolygonType::MoveCombing | PolygonType::MoveRetraction)
    }

    /// Base color used for the line-mesh color buffer.
    pub fn color(self) -> Color {
        match self {
            PolygonType::None => [1.0, 1.0, 1.0, 1.0],
            PolygonType::Inset0 => [1.0, 0.0, 0.0, 1.0],
            PolygonType::InsetX => [0.0, 1.0, 0.0, 1.0],
            PolygonType::Skin => [1.0, 1.0, 0.0, 1.0],
            PolygonType::Support | PolygonType::Skirt | PolygonType::SupportInfill => {
                [0.0, 1.0, 1.0, 1.0]
            }
            PolygonType::Infill => [1.0, 0.74, 0.0, 1.0],
            PolygonType::MoveCombing => [0.0, 0.0, 1.0, 1.0],
            PolygonType::MoveRetraction => [0.5, 0.5, 1.0, 1.0],
        }
    }
}

/// One typed line strip within a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPolygon {
    /// Index of the owning layer.
    pub layer: LayerIndex,
    pub polygon_type: PolygonType,
    pub extruder: ExtruderId,
    points: Vec<Point3>,
    line_widths: Vec<f32>,
}

impl LayerPolygon {
    /// Create a polygon printed by extruder 0 with one width for every point.
    pub fn new(
        layer: LayerIndex,
        polygon_type: PolygonType,
        points: Vec<Point3>,
        line_width: f32,
    ) -> Self {
        let line_widths = vec![line_width; points.len()];
        Self {
            layer,
            polygon_type,
            extruder: 0,
            points,
            line_widths,
        }
    }

    /// Create a polygon with an explicit extruder and one width per point.
    pub fn with_line_widths(
        layer: LayerIndex,
        extruder: ExtruderId,
        polygon_type: PolygonType,
        points: Vec<Point3>,
        line_widths: Vec<f32>,
    ) -> Result<Self> {
        if points.len() != line_widths.len() {
            return Err(LayerViewError::LineWidthMismatch {
                points: points.len(),
                widths: line_widths.len(),
            });
        }
        Ok(Self {
            layer,
            polygon_type,
            extruder,
            points,
            line_widths,
        })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn line_widths(&self) -> &[f32] {
        &self.line_widths
    }

    /// Number of vertices this polygon contributes to the line mesh.
    pub fn line_mesh_vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of line segments this polygon contributes to the line mesh.
    pub fn line_mesh_element_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Write this polygon into `buffers` starting at the given offsets.
    ///
    /// The caller must have sized `buffers` to hold at least
    /// `line_mesh_vertex_count()` vertices past `vertex_offset` and
    /// `line_mesh_element_count()` segments past `index_offset`.
    pub fn build(
        &self,
        vertex_offset: usize,
        index_offset: usize,
        thickness: f32,
        shade_factor: f32,
        buffers: &mut LineMeshBuffers,
    ) {
        let vertex_end = vertex_offset + self.line_mesh_vertex_count();
        let index_end = index_offset + self.line_mesh_element_count();
        let color = shade(self.polygon_type.color(), shade_factor);

        for (slot, point) in buffers.vertices[vertex_offset..vertex_end]
            .iter_mut()
            .zip(&self.points)
        {
            *slot = point.to_array();
        }
        for (slot, width) in buffers.line_dimensions[vertex_offset..vertex_end]
            .iter_mut()
            .zip(&self.line_widths)
        {
            *slot = [*width, thickness];
        }
        buffers.colors[vertex_offset..vertex_end].fill(color);
        buffers.extruders[vertex_offset..vertex_end].fill(self.extruder);
        buffers.line_types[vertex_offset..vertex_end].fill(self.polygon_type);

        for (k, pair) in buffers.indices[index_offset..index_end].iter_mut().enumerate() {
            let start = vertex_offset + k;
            debug_assert!(start < MAX_VERTICES, "vertex {} is not addressable", start);
            let start = u32::try_from(start).unwrap_or(u32::MAX);
            *pair = [start, start.saturating_add(1)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(n: usize) -> Vec<Point3> {
        (0..n).map(|i| Point3::new(i as f32, 0.0, 0.2)).collect()
    }

    #[test]
    fn test_counts() {
        let p = LayerPolygon::new(0, PolygonType::Inset0, strip(3), 0.4);
        assert_eq!(p.line_mesh_vertex_count(), 3);
        assert_eq!(p.line_mesh_element_count(), 2);

        let single = LayerPolygon::new(0, PolygonType::Inset0, strip(1), 0.4);
        assert_eq!(single.line_mesh_vertex_count(), 1);
        assert_eq!(single.line_mesh_element_count(), 0);

        let empty = LayerPolygon::new(0, PolygonType::Inset0, Vec::new(), 0.4);
        assert_eq!(empty.line_mesh_element_count(), 0);
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let err = LayerPolygon::with_line_widths(0, 1, PolygonType::Skin, strip(3), vec![0.4])
            .unwrap_err();
        assert!(matches!(
            err,
            LayerViewError::LineWidthMismatch { points: 3, widths: 1 }
        ));
    }

    #[test]
    fn test_build_at_offset() {
        let p = LayerPolygon::with_line_widths(
            2,
            1,
            PolygonType::Inset0,
            strip(3),
            vec![0.4, 0.5, 0.6],
        )
        .unwrap();
        let mut buffers = LineMeshBuffers::with_counts(5, 3);
        p.build(2, 1, 0.2, 0.5, &mut buffers);

        assert_eq!(buffers.vertices[2], [0.0, 0.0, 0.2]);
        assert_eq!(buffers.vertices[4], [2.0, 0.0, 0.2]);
        assert_eq!(buffers.line_dimensions[3], [0.5, 0.2]);
        assert_eq!(buffers.colors[2], [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(&buffers.extruders[2..], &[1, 1, 1]);
        assert_eq!(buffers.line_types[4], PolygonType::Inset0);
        assert_eq!(buffers.indices[0], [0, 0]);
        assert_eq!(&buffers.indices[1..], &[[2, 3], [3, 4]]);
    }

    #[test]
    fn test_type_tags_round_trip() {
        for t in PolygonType::ALL {
            assert_eq!(PolygonType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(PolygonType::from_tag(42), None);
        assert!(PolygonType::MoveCombing.is_travel());
        assert!(PolygonType::MoveRetraction.is_travel());
        assert!(!PolygonType::Infill.is_travel());
    }
}
