/*

    Surface description attached to scene nodes.

    Colors are plain RGB triplets in [0, 1] stored as Vector3,
    the same way the rest of the crate stores any triplet.

    @date: Oct, 2025
*/

use crate::prelude::*;

pub type Color = Vector3;

pub mod colors {
    use super::Color;

    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingModel {
    /// Unshaded, the diffuse color is shown as is. Used for debug overlays.
    Constant,
    #[default]
    Lit,
}

#[derive(Debug, Clone, Copy, PartialEq, SmartDefault)]
pub struct Material {
    #[default(colors::WHITE)]
    pub diffuse: Color,
    pub lighting: LightingModel,
}

impl Material {
    pub fn new(diffuse: Color, lighting: LightingModel) -> Self {
        Self { diffuse, lighting }
    }

    /// Flat colored material that ignores scene lights
    pub fn constant(diffuse: Color) -> Self {
        Self::new(diffuse, LightingModel::Constant)
    }
}
