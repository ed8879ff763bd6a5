/*

    Wireframe cage around a bounding box: 8 corner markers
    and the 12 edges between them, attached under an object
    node of the scene graph.

        (c7)---(c8)
        /      / |
       /      /  |
     (c5)---(c6)(c4)
      |      |  /
      |      | /
      |      |/
     (c1)---(c2)

    The bottom face (c1, c2, c4, c3) can be read back as a
    polygon in world space for placement tests.

    @date: 26 Oct, 2025
*/

use crate::bbox::BoundingBox;
use crate::config::CageConfig;
use crate::error::{CageError, Result};
use crate::geometry::Geometry;
use crate::polygon::{Line, Polygon};
use crate::scene::{Node, NodeId, SceneGraph, Transform};
use crate::prelude::*;

pub const NUM_CORNERS: usize = 8;
pub const NUM_EDGES: usize = 12;

/// Radius of the shared marker sphere before the marker scale is applied
pub const MARKER_SPHERE_RADIUS: Float = 0.5;

/// Corner label pairs, bottom face, vertical edges, then top face
pub const EDGES: [(usize, usize); NUM_EDGES] = [
    (1, 2), (1, 3), (2, 4), (4, 3),
    (1, 5), (2, 6), (3, 7), (4, 8),
    (5, 6), (5, 7), (6, 8), (7, 8),
];

/// Traversal of the bottom face used by polygon()
pub const BOTTOM_FACE_CYCLE: [usize; 4] = [1, 2, 4, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub node: NodeId,
}

#[derive(Debug, Clone)]
pub struct BoundingCage {
    root: NodeId,
    bbox: BoundingBox,
    config: CageConfig,
    corners: [NodeId; NUM_CORNERS],
    edges: Vec<Edge>,
}

impl BoundingCage {

    /// Attach a cage for `bbox` (given in the frame of `object`) under `object`.
    /// Nothing is added to the scene if this fails.
    pub fn new(scene: &mut SceneGraph, object: NodeId, bbox: BoundingBox, config: &CageConfig) -> Result<Self> {
        if !bbox.validate() {
            return Err(CageError::InvalidBounds { min: bbox.min(), max: bbox.max() });
        }
        let object_name = scene.try_node(object)?.name.clone();
        let config = config.sanitized();

        let root = scene.add_child(object, Node::new(format!("{object_name}Cage")).excluded_from_bounds())?;

        let marker_scale = Vector3::splat(config.marker_radius);
        let marker = Geometry::sphere(MARKER_SPHERE_RADIUS, config.marker_material());
        let mut corners = [root; NUM_CORNERS];
        for (i, position) in bbox.corners().into_iter().enumerate() {
            let node = Node::new(format!("c{}", i + 1))
                .with_geometry(marker.clone())
                .with_transform(Transform::from_translation(position).with_scale(marker_scale));
            corners[i] = scene.add_child(root, node)?;
        }

        let line = config.line_material();
        let mut edges = Vec::with_capacity(NUM_EDGES);
        for &(from, to) in EDGES.iter() {
            let geometry = Geometry::line(bbox.corner(from), bbox.corner(to), line);
            let node = scene.add_child(root, Node::new(format!("edge_c{from}_c{to}")).with_geometry(geometry))?;
            edges.push(Edge { from, to, node });
        }

        debug!("Attached cage {:?} to '{}' with bounds {}", root, object_name, bbox);
        Ok(Self { root, bbox, config, corners, edges })
    }

    /// Node holding all markers and edges
    pub fn node(&self) -> NodeId {
        self.root
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn config(&self) -> &CageConfig {
        &self.config
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Marker node of the corner with 1-based `label`
    ///
    /// # Panics
    /// If `label` is not in 1..=8, same for the other corner accessors.
    pub fn corner_node(&self, label: usize) -> NodeId {
        assert!((1..=NUM_CORNERS).contains(&label), "corner label must be in 1..=8, got {label}");
        self.corners[label - 1]
    }

    /// Corner position in the cage frame, fixed at construction
    pub fn local_corner(&self, label: usize) -> Vector3 {
        self.bbox.corner(label)
    }

    /// Corner position after the current world transform of the cage
    pub fn world_corner(&self, scene: &SceneGraph, label: usize) -> Result<Vector3> {
        scene.world_position(self.corner_node(label))
    }

    pub fn world_corners(&self, scene: &SceneGraph) -> Result<[Vector3; NUM_CORNERS]> {
        let mut out = [Vector3::ZERO; NUM_CORNERS];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.world_corner(scene, i + 1)?;
        }
        Ok(out)
    }

    /// Bottom face as a closed 4 line loop c1 -> c2 -> c4 -> c3 -> c1 in world space.
    /// Built from scratch on every call.
    pub fn polygon(&self, scene: &SceneGraph) -> Result<Polygon> {
        let mut points = [Vector3::ZERO; 4];
        for (slot, &label) in points.iter_mut().zip(BOTTOM_FACE_CYCLE.iter()) {
            *slot = self.world_corner(scene, label)?;
        }

        let lines: [Line; 4] = std::array::from_fn(|i| Line::new(points[i], points[(i + 1) % 4]));
        for (i, l) in lines.iter().enumerate() {
            debug!("Polygon line {}: {} -> {}", i + 1, l.start, l.end);
        }
        Ok(Polygon::from_lines(lines))
    }

    /// Detach the cage from its object, markers and edges go with it
    pub fn remove(self, scene: &mut SceneGraph) -> Result<usize> {
        scene.remove(self.root)
    }
}
