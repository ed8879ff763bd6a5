pub mod bbox;
pub mod cage;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interval;
pub mod json_parser;
pub mod json_structs;
pub mod material;
pub mod numeric;
pub mod object;
pub mod polygon;
pub mod scene;

pub mod prelude;

pub use bbox::BoundingBox;
pub use cage::BoundingCage;
pub use config::CageConfig;
pub use error::CageError;
pub use polygon::{Line, Polygon, Winding};
pub use scene::{Node, NodeId, SceneGraph, Transform};
