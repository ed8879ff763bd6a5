/*

    Declare data structs needed to parse scene JSON files.

    {
        "CageConfig": { ... },              (optional, see config.rs)
        "Objects": [                        (single object or array)
            {
                "ModelName": "chair",
                "BoundsSource": "part",     (optional, "part" or "root")
                "PartName": "chairModel",   (optional, defaults to <ModelName>Model)
                "BoundingBox": "-0.2 0 -0.2 0.2 0.9 0.2",
                "Position": "0 0 -1",       (optional)
                "Rotation": 45,             (optional, degrees about +y)
                "Scale": "1 1 1"            (optional)
            }
        ]
    }

    BoundingBox can also be given as {"Min": "x y z", "Max": "x y z"}.
    A box with max < min on any axis fails the whole file.

    @date: 13 Oct, 2025
*/

use serde::Deserialize;

use crate::bbox::BoundingBox;
use crate::config::CageConfig;
use crate::error::{CageError, Result};
use crate::json_parser::{deser_float, deser_string_or_struct, deser_vec3};
use crate::object::{BoundsSource, ObjectDefinition, VirtualObject};
use crate::scene::{Node, NodeId, SceneGraph, Transform};
use crate::prelude::*;


// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrVec<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            SingleOrVec::Empty => [].iter(),
            SingleOrVec::Single(t) => std::slice::from_ref(t).iter(),
            SingleOrVec::Multiple(vec) => vec.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}


#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SceneJSON {
    pub cage_config: CageConfig,
    pub objects: SingleOrVec<ObjectJSON>,
}

/// Scene graph built from a SceneJSON, objects hang under a single "world" root
#[derive(Debug)]
pub struct LoadedScene {
    pub scene: SceneGraph,
    pub world: NodeId,
    pub objects: Vec<VirtualObject>,
    /// Objects that could not be spawned or caged, with the reason
    pub failed: Vec<(String, CageError)>,
}

impl SceneJSON {
    /// Spawn every object and attach its cage. A failing object is
    /// reported in LoadedScene::failed and leaves nothing behind.
    pub fn setup(&self) -> LoadedScene {
        let mut scene = SceneGraph::new();
        let world = scene.add_root(Node::new("world"));
        let mut objects = Vec::with_capacity(self.objects.len());
        let mut failed = Vec::new();

        for entry in self.objects.iter() {
            match entry.spawn_with_cage(&mut scene, world, &self.cage_config) {
                Ok(obj) => objects.push(obj),
                Err(e) => {
                    error!("Skipping '{}': {}", entry.model_name, e);
                    failed.push((entry.model_name.clone(), e));
                }
            }
        }

        debug!("Scene is setup with {} object(s), {} failed", objects.len(), failed.len());
        LoadedScene { scene, world, objects, failed }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundsSourceKind {
    #[default]
    Part,
    Root,
}

fn default_scale() -> Vector3 {
    Vector3::ONE
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectJSON {
    pub model_name: String,

    #[serde(default)]
    pub bounds_source: BoundsSourceKind,

    #[serde(default)]
    pub part_name: Option<String>,

    #[serde(deserialize_with = "deser_string_or_struct")]
    pub bounding_box: BoundingBox,

    #[serde(default, deserialize_with = "deser_vec3")]
    pub position: Vector3,

    #[serde(default, deserialize_with = "deser_float")]
    pub rotation: Float,

    #[serde(default = "default_scale", deserialize_with = "deser_vec3")]
    pub scale: Vector3,
}

impl ObjectJSON {
    pub fn definition(&self) -> ObjectDefinition {
        let definition = ObjectDefinition::new(self.model_name.clone());
        match (self.bounds_source, &self.part_name) {
            (BoundsSourceKind::Root, part) => {
                if part.is_some() {
                    warn!("'{}' takes its bounds from the root, ignoring PartName", self.model_name);
                }
                definition.with_bounds_source(BoundsSource::Root)
            }
            (BoundsSourceKind::Part, Some(part)) => definition.with_bounds_source(BoundsSource::NamedPart(part.clone())),
            (BoundsSourceKind::Part, None) => definition,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
            .with_rotation(Quaternion::from_rotation_y(self.rotation.to_radians()))
            .with_scale(self.scale)
    }

    fn spawn_with_cage(&self, scene: &mut SceneGraph, parent: NodeId, config: &CageConfig) -> Result<VirtualObject> {
        let mut obj = VirtualObject::spawn(scene, Some(parent), self.definition(), self.transform(), self.bounding_box)?;
        if let Err(e) = obj.attach_cage(scene, config) {
            obj.remove(scene)?;
            return Err(e);
        }
        Ok(obj)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cage::{NUM_CORNERS, NUM_EDGES};

    #[test]
    fn test_single_object_and_defaults() {
        let scene: SceneJSON = serde_json::from_str(r#"{
            "Objects": { "ModelName": "chair", "BoundingBox": "0 0 0 1 2 1" }
        }"#).unwrap();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.cage_config, CageConfig::default());

        let obj = scene.objects.iter().next().unwrap();
        assert_eq!(obj.definition(), ObjectDefinition::new("chair"));
        assert_eq!(obj.transform(), Transform::IDENTITY);
        assert_eq!(obj.bounding_box.max(), Vector3::new(1., 2., 1.));
    }

    #[test]
    fn test_object_array_with_all_fields() {
        let scene: SceneJSON = serde_json::from_str(r#"{
            "CageConfig": { "MarkerRadius": 0.02 },
            "Objects": [
                { "ModelName": "sofa", "BoundsSource": "root",
                  "BoundingBox": { "Min": "0 0 0", "Max": [2, 1, 1] },
                  "Position": "1 0 -2", "Rotation": "90", "Scale": "2 2 2" },
                { "ModelName": "cup", "PartName": "cupMesh", "BoundingBox": "0 0 0 0.1 0.1 0.1" }
            ]
        }"#).unwrap();
        assert_eq!(scene.cage_config.marker_radius, 0.02);

        let objs: Vec<&ObjectJSON> = scene.objects.iter().collect();
        assert_eq!(objs[0].definition().bounds_source, BoundsSource::Root);
        assert_eq!(objs[1].definition().bounds_source, BoundsSource::NamedPart("cupMesh".to_string()));

        let t = objs[0].transform();
        assert_eq!(t.translation, Vector3::new(1., 0., -2.));
        assert_eq!(t.scale, Vector3::splat(2.));
    }

    #[test]
    fn test_bad_bounding_box_rejected() {
        let inverted = serde_json::from_str::<ObjectJSON>(r#"{ "ModelName": "bad", "BoundingBox": "1 1 1 0 0 0" }"#);
        assert!(inverted.unwrap_err().to_string().contains("max < min"));

        let map = serde_json::from_str::<ObjectJSON>(r#"{ "ModelName": "bad", "BoundingBox": { "Min": "1 1 1", "Max": "0 0 0" } }"#);
        assert!(map.unwrap_err().to_string().contains("max < min"));

        let short = serde_json::from_str::<ObjectJSON>(r#"{ "ModelName": "bad", "BoundingBox": "1 1 1" }"#);
        assert!(short.unwrap_err().to_string().contains("expected 6 numbers"));
    }

    #[test]
    fn test_setup_skips_broken_objects() {
        let scene_json: SceneJSON = serde_json::from_str(r#"{
            "Objects": [
                { "ModelName": "chair", "BoundingBox": "0 0 0 1 1 1" },
                { "ModelName": "table", "PartName": "nope", "BoundingBox": "0 0 0 1 1 1" }
            ]
        }"#).unwrap();
        let loaded = scene_json.setup();

        assert_eq!(loaded.objects.len(), 1);
        let names: Vec<&str> = loaded.failed.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["table"]);
        assert!(matches!(loaded.failed[0].1, CageError::MissingPart { .. }));

        // world + chair + chairModel + cage, nothing left from the failed ones
        assert_eq!(loaded.scene.len(), 3 + 1 + NUM_CORNERS + NUM_EDGES);
        assert_eq!(loaded.scene.children(loaded.world), &[loaded.objects[0].node()]);
    }
}
