/*

    Tracked virtual objects placed in the scene and the rule
    deciding which bounding box their cage is built from.

    Most assets wrap their mesh into a sub-part named
    "<model name>Model" next to helper nodes, so by default the
    bounds come from that part. Assets whose whole subtree is
    the object (no helpers) use BoundsSource::Root instead.

    @date: 27 Oct, 2025
*/

use crate::bbox::BoundingBox;
use crate::cage::BoundingCage;
use crate::config::CageConfig;
use crate::error::{CageError, Result};
use crate::geometry::Geometry;
use crate::scene::{Node, NodeId, SceneGraph, Transform};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundsSource {
    /// Bounds of the object node and everything below it
    Root,
    /// Bounds of the first node with this name found below the object
    NamedPart(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDefinition {
    pub model_name: String,
    pub bounds_source: BoundsSource,
}

impl ObjectDefinition {
    /// Definition using the conventional "<model name>Model" part
    pub fn new(model_name: impl Into<String>) -> Self {
        let model_name = model_name.into();
        let bounds_source = BoundsSource::NamedPart(Self::model_part_name(&model_name));
        Self { model_name, bounds_source }
    }

    pub fn with_bounds_source(mut self, bounds_source: BoundsSource) -> Self {
        self.bounds_source = bounds_source;
        self
    }

    pub fn model_part_name(model_name: &str) -> String {
        format!("{model_name}Model")
    }
}

#[derive(Debug)]
pub struct VirtualObject {
    pub definition: ObjectDefinition,
    node: NodeId,
    cage: Option<BoundingCage>,
}

impl VirtualObject {

    /// Wrap an existing node of the scene as a tracked object
    pub fn new(definition: ObjectDefinition, node: NodeId) -> Self {
        Self { definition, node, cage: None }
    }

    /// Create the object node under `parent` (or as a root) with a
    /// "<model name>Model" child carrying `model_bounds`.
    pub fn spawn(
        scene: &mut SceneGraph,
        parent: Option<NodeId>,
        definition: ObjectDefinition,
        transform: Transform,
        model_bounds: BoundingBox,
    ) -> Result<Self> {
        let object = Node::new(definition.model_name.clone()).with_transform(transform);
        let node = match parent {
            Some(p) => scene.add_child(p, object)?,
            None => scene.add_root(object),
        };
        let part = Node::new(ObjectDefinition::model_part_name(&definition.model_name))
            .with_geometry(Geometry::model(model_bounds));
        scene.add_child(node, part)?;

        info!("Spawned '{}' as {:?}", definition.model_name, node);
        Ok(Self::new(definition, node))
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn cage(&self) -> Option<&BoundingCage> {
        self.cage.as_ref()
    }

    /// Bounding box the cage should wrap, in the frame of the object node
    pub fn resolve_bounds(&self, scene: &SceneGraph) -> Result<BoundingBox> {
        let name = &self.definition.model_name;
        match &self.definition.bounds_source {
            BoundsSource::Root => scene
                .bounding_box(self.node)?
                .ok_or_else(|| CageError::MissingBounds(name.clone())),
            BoundsSource::NamedPart(part_name) => {
                let part = scene
                    .find_child_by_name(self.node, part_name, true)
                    .ok_or_else(|| CageError::MissingPart { parent: name.clone(), name: part_name.clone() })?;
                let part_bounds = scene
                    .bounding_box(part)?
                    .ok_or_else(|| CageError::MissingBounds(part_name.clone()))?;

                // Part bounds are local to the part, bring them into the object frame
                part_bounds.transformed(&scene.relative_matrix(part, self.node)?)
            }
        }
    }

    /// Build the cage for this object. An already attached cage is replaced,
    /// it is kept if the new one cannot be built.
    pub fn attach_cage(&mut self, scene: &mut SceneGraph, config: &CageConfig) -> Result<&BoundingCage> {
        let bounds = self.resolve_bounds(scene)?;
        let cage = BoundingCage::new(scene, self.node, bounds, config)?;
        if let Err(e) = self.detach_cage(scene) {
            cage.remove(scene)?;
            return Err(e);
        }
        let cage = self.cage.insert(cage);
        Ok(&*cage)
    }

    /// Remove the attached cage, if any. A cage whose nodes were
    /// already removed through the scene graph counts as detached.
    pub fn detach_cage(&mut self, scene: &mut SceneGraph) -> Result<()> {
        let Some(cage) = self.cage.take() else { return Ok(()) };
        match cage.remove(scene) {
            Ok(_) => debug!("Detached cage of '{}'", self.definition.model_name),
            Err(CageError::UnknownNode(id)) => {
                warn!("Cage {:?} of '{}' was already gone from the scene", id, self.definition.model_name)
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Remove the object from the scene, its cage goes with it
    pub fn remove(self, scene: &mut SceneGraph) -> Result<usize> {
        info!("Removing '{}'", self.definition.model_name);
        scene.remove(self.node)
    }
}
