use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`.
pub type Color = [f32; 4];

/// A toolpath point in printer coordinates (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(p: [f32; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

/// Scale the RGB channels of a color, leaving alpha untouched.
pub fn shade(color: Color, factor: f32) -> Color {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}
