use serde::{Deserialize, Serialize};

use layerview_core::{Color, LayerViewError, Result};

/// Color given to combing and retraction moves.
pub const DEFAULT_TRAVEL_COLOR: Color = [0.0, 0.0, 0.8, 1.0];

/// Tuning for how toolpath buffers are colored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Material color override for travel moves, applied after extruder colors.
    pub travel_color: Color,
    /// RGB multiplier applied to the per-type base colors.
    pub shade_factor: f32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            travel_color: DEFAULT_TRAVEL_COLOR,
            shade_factor: 0.5,
        }
    }
}

impl BuildOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.shade_factor) {
            return Err(LayerViewError::InvalidOptions(format!(
                "shade_factor {} is outside [0, 1]",
                self.shade_factor
            )));
        }
        if self.travel_color.iter().any(|c| !c.is_finite()) {
            return Err(LayerViewError::InvalidOptions(
                "travel_color must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.travel_color, [0.0, 0.0, 0.8, 1.0]);
        assert_eq!(options.shade_factor, 0.5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = BuildOptions::from_json(r#"{ "shade_factor": 1.0 }"#).unwrap();
        assert_eq!(options.shade_factor, 1.0);
        assert_eq!(options.travel_color, DEFAULT_TRAVEL_COLOR);
    }

    #[test]
    fn test_invalid_shade_rejected() {
        let err = BuildOptions::from_json(r#"{ "shade_factor": 2.0 }"#).unwrap_err();
        assert!(matches!(err, LayerViewError::InvalidOptions(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = BuildOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LayerViewError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let options = BuildOptions {
            travel_color: [0.2, 0.2, 0.2, 1.0],
            shade_factor: 0.75,
        };
        let json = options.to_json().unwrap();
        assert_eq!(BuildOptions::from_json(&json).unwrap(), options);
    }
}
