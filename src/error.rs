/*

    Errors surfaced by the cage library.

    Degenerate geometry is never reported here, only
    inputs the cage cannot be built from at all.

*/

use thiserror::Error;

use crate::bbox::BoundingBox;
use crate::numeric::Vector3;
use crate::scene::NodeId;

#[derive(Debug, Error)]
pub enum CageError {
    #[error("invalid bounding box, found max < min (min: {min}, max: {max})")]
    InvalidBounds { min: Vector3, max: Vector3 },

    #[error("cannot read bounding box from '{input}': {reason}")]
    BoundsFormat { input: String, reason: String },

    #[error("transform does not map the box {0} to finite coordinates")]
    NonFiniteBounds(BoundingBox),

    #[error("node {0:?} does not exist in the scene graph")]
    UnknownNode(NodeId),

    #[error("node {node:?} is not below {ancestor:?}")]
    NotDescendant { node: NodeId, ancestor: NodeId },

    #[error("no node named '{name}' found under '{parent}'")]
    MissingPart { parent: String, name: String },

    #[error("node '{0}' has no geometry to take a bounding box from")]
    MissingBounds(String),

    #[error("polygon needs exactly 4 lines, got {0}")]
    PolygonSides(usize),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CageError>;
