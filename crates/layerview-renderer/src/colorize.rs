//! Per-vertex material colors.
//!
//! Extruder colors are assigned first, one full pass per color map row in
//! index order. Travel moves are then overwritten with the travel color, so
//! they stay distinguishable regardless of material.

use layerview_core::{Color, ExtruderId, LayerViewError, PolygonType, Result};

/// Resolve the material color of every vertex.
///
/// Vertices whose extruder has no row in `material_color_map` stay
/// transparent black unless they are travel moves.
pub fn material_colors(
    extruders: &[ExtruderId],
    line_types: &[PolygonType],
    material_color_map: &[Color],
    travel_color: Color,
) -> Vec<Color> {
    let mut colors = vec![[0.0; 4]; extruders.len()];

    for (extruder_nr, material) in material_color_map.iter().enumerate() {
        let extruder_nr = extruder_nr as ExtruderId;
        for (color, extruder) in colors.iter_mut().zip(extruders) {
            if *extruder == extruder_nr {
                *color = *material;
            }
        }
    }

    for (color, line_type) in colors.iter_mut().zip(line_types) {
        if line_type.is_travel() {
            *color = travel_color;
        }
    }

    colors
}

/// Fail on the lowest extruder id that has no row in the color map.
pub fn check_material_color_map(
    extruders: &[ExtruderId],
    material_color_map: &[Color],
) -> Result<()> {
    let available = material_color_map.len();
    match extruders
        .iter()
        .copied()
        .filter(|e| *e as usize >= available)
        .min()
    {
        Some(extruder) => Err(LayerViewError::MissingExtruderColor { extruder, available }),
        None => Ok(()),
    }
}

/// Number of non-travel vertices left without a material color.
pub fn uncolored_vertex_count(
    extruders: &[ExtruderId],
    line_types: &[PolygonType],
    material_color_map: &[Color],
) -> usize {
    extruders
        .iter()
        .zip(line_types)
        .filter(|(e, t)| **e as usize >= material_color_map.len() && !t.is_travel())
        .count()
}
