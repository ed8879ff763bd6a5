/*

    Declare the scene graph the cages are attached to.

    Nodes live in an arena owned by SceneGraph and refer to
    each other through NodeId handles, a parent owns its
    children and removing a node removes its whole subtree.
    Freed slots are reused, each reuse bumps the slot's
    generation so a stale NodeId keeps failing instead of
    pointing at the new node.

    World transform of a node is the product of the local
    transforms from its root down to the node itself.

    @date: 2 Oct, 2025
*/

use crate::bbox::BoundingBox;
use crate::error::{CageError, Result};
use crate::geometry::Geometry;
use crate::prelude::*;

/// Generational handle of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, SmartDefault)]
pub struct Transform {
    #[default(Vector3::ZERO)]
    pub translation: Vector3,
    #[default(Quaternion::IDENTITY)]
    pub rotation: Quaternion,
    #[default(Vector3::ONE)]
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vector3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Vector3::ONE,
    };

    pub fn from_translation(translation: Vector3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, rotation: Quaternion) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Scale first, then rotate, then translate
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    /// Helper overlays (e.g. cages) set this so they do not grow the bounds of their parent
    pub excluded_from_bounds: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            geometry: None,
            excluded_from_bounds: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn excluded_from_bounds(mut self) -> Self {
        self.excluded_from_bounds = true;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    roots: Vec<NodeId>,
}

impl SceneGraph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    /// Slots allocated so far, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn try_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(CageError::UnknownNode(id))
    }

    fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.node_mut(id).ok_or(CageError::UnknownNode(id))
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        node.parent = parent;
        node.children.clear();
        self.live += 1;

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.node = Some(node);
                NodeId { index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, node: Some(node) });
                NodeId { index: self.slots.len() - 1, generation: 0 }
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index).filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(CageError::UnknownNode(parent));
        }
        let id = self.insert(node, Some(parent));
        self.try_node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Remove the node together with its subtree, returns how many nodes were dropped
    pub fn remove(&mut self, id: NodeId) -> Result<usize> {
        let parent = self.try_node(id)?.parent;
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.node_mut(p) {
                    parent_node.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.release(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        debug!("Removed {} node(s) starting from {:?}", removed, id);
        Ok(removed)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<()> {
        self.try_node_mut(id)?.transform = transform;
        Ok(())
    }

    pub fn set_position(&mut self, id: NodeId, position: Vector3) -> Result<()> {
        self.try_node_mut(id)?.transform.translation = position;
        Ok(())
    }

    pub fn translate(&mut self, id: NodeId, offset: Vector3) -> Result<()> {
        self.try_node_mut(id)?.transform.translation += offset;
        Ok(())
    }

    pub fn local_matrix(&self, id: NodeId) -> Result<Matrix4> {
        Ok(self.try_node(id)?.transform.matrix())
    }

    /// Compose local transforms from the root down to `id`
    pub fn world_matrix(&self, id: NodeId) -> Result<Matrix4> {
        let mut mat = Matrix4::IDENTITY;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.try_node(node_id)?;
            mat = node.transform.matrix() * mat;
            current = node.parent;
        }
        Ok(mat)
    }

    /// Maps the local frame of `id` into the local frame of `ancestor`.
    /// Composed along the parent chain, so it holds even when the
    /// ancestor's own transform is singular.
    pub fn relative_matrix(&self, id: NodeId, ancestor: NodeId) -> Result<Matrix4> {
        self.try_node(ancestor)?;
        let mut mat = Matrix4::IDENTITY;
        let mut current = id;
        while current != ancestor {
            let node = self.try_node(current)?;
            mat = node.transform.matrix() * mat;
            current = node.parent.ok_or(CageError::NotDescendant { node: id, ancestor })?;
        }
        Ok(mat)
    }

    /// Position of the node's origin in world space, never cached
    pub fn world_position(&self, id: NodeId) -> Result<Vector3> {
        let mat = self.world_matrix(id)?;
        Ok(transform_point(&mat, &Vector3::ZERO))
    }

    /// Map a point given in the local frame of `id` into world space
    pub fn to_world(&self, id: NodeId, local: &Vector3) -> Result<Vector3> {
        let mat = self.world_matrix(id)?;
        Ok(transform_point(&mat, local))
    }

    /// Depth first search for a child named `name`. Only direct
    /// children are checked unless `recursive` is set.
    pub fn find_child_by_name(&self, id: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
        for &child in self.children(id) {
            let node = self.node(child)?;
            if node.name == name {
                return Some(child);
            }
            if recursive {
                if let Some(found) = self.find_child_by_name(child, name, true) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Bounds of the node's own geometry and its subtree, expressed in the
    /// node's local frame. Ok(None) if nothing below has any geometry.
    pub fn bounding_box(&self, id: NodeId) -> Result<Option<BoundingBox>> {
        let node = self.try_node(id)?;
        let mut bounds = node.geometry.as_ref().map(|g| g.local_bounds());

        for &child in node.children.iter() {
            let child_node = self.try_node(child)?;
            if child_node.excluded_from_bounds {
                continue;
            }
            if let Some(child_bounds) = self.bounding_box(child)? {
                let in_parent = child_bounds.transformed(&child_node.transform.matrix())?;
                bounds = Some(match bounds {
                    Some(b) => b.union(&in_parent),
                    None => in_parent,
                });
            }
        }
        Ok(bounds)
    }
}
