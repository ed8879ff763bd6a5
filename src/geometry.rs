/*

    Geometry primitives a scene node can carry.

    The cage only ever creates spheres (corner markers) and
    lines (edges); Model stands in for whatever loaded asset
    the host places in the scene, described by its bounds.

    @date: 9 Oct, 2025
*/

use crate::bbox::BoundingBox;
use crate::material::Material;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { radius: Float },
    Line { from: Vector3, to: Vector3 },
    Model { bounds: BoundingBox },
}

impl Shape {
    /// Bounds in the owning node's local frame (before the node transform)
    pub fn local_bounds(&self) -> BoundingBox {
        match self {
            Shape::Sphere { radius } => {
                let r = Vector3::splat(radius.abs());
                BoundingBox::from_points([-r, r]).unwrap_or(BoundingBox::point(Vector3::ZERO))
            }
            Shape::Line { from, to } => {
                BoundingBox::from_points([*from, *to]).unwrap_or(BoundingBox::point(*from))
            }
            Shape::Model { bounds } => *bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub shape: Shape,
    pub material: Material,
}

impl Geometry {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(radius: Float, material: Material) -> Self {
        Self::new(Shape::Sphere { radius }, material)
    }

    pub fn line(from: Vector3, to: Vector3, material: Material) -> Self {
        Self::new(Shape::Line { from, to }, material)
    }

    pub fn model(bounds: BoundingBox) -> Self {
        Self::new(Shape::Model { bounds }, Material::default())
    }

    pub fn local_bounds(&self) -> BoundingBox {
        self.shape.local_bounds()
    }
}
