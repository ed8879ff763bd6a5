/*

    Appearance parameters of a bounding cage.

    Every field is optional in JSON, missing ones fall back to the
    defaults below (sizes are in scene units, 1 unit = 1 meter):

        "CageConfig": {
            "MarkerRadius": 0.01,
            "MarkerColor": "1 0 0",
            "LineColor": "0 0 0",
            "TextColor": "0 0 0",
            "TextDepth": 0.1
        }

    @date: 26 Oct, 2025
*/

use crate::json_parser::{deser_float, deser_vec3};
use crate::material::{colors, Color, Material};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)] // If any of the fields below is missing in the JSON, use default
pub struct CageConfig {
    /// Scale applied to the unit marker sphere (1cm)
    #[default = 0.01]
    #[serde(deserialize_with = "deser_float")]
    pub marker_radius: Float,

    #[default(colors::RED)]
    #[serde(deserialize_with = "deser_vec3")]
    pub marker_color: Color,

    #[default(colors::BLACK)]
    #[serde(deserialize_with = "deser_vec3")]
    pub line_color: Color,

    #[default(colors::BLACK)]
    #[serde(deserialize_with = "deser_vec3")]
    pub text_color: Color,

    /// Extrusion depth of label text (10cm)
    #[default = 0.1]
    #[serde(deserialize_with = "deser_float")]
    pub text_depth: Float,
}

impl CageConfig {
    pub fn marker_material(&self) -> Material {
        Material::constant(self.marker_color)
    }

    pub fn line_material(&self) -> Material {
        Material::constant(self.line_color)
    }

    pub fn text_material(&self) -> Material {
        Material::constant(self.text_color)
    }

    /// Out of range values are replaced by their defaults, with a warning
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            warn!("Marker radius {} is not a positive number, using {}", self.marker_radius, defaults.marker_radius);
            self.marker_radius = defaults.marker_radius;
        }
        if !(self.text_depth.is_finite() && self.text_depth >= 0.0) {
            warn!("Text depth {} is not a non-negative number, using {}", self.text_depth, defaults.text_depth);
            self.text_depth = defaults.text_depth;
        }
        self
    }
}
