// MODEL: world state and geometry
pub mod aabb;
pub mod camera;
pub mod entity;
pub mod mesh;
pub mod scene;
pub mod world;

pub use aabb::{overlaps, would_overlap, Aabb};
pub use camera::Camera;
pub use entity::{Entity, EntityId, MeshRef, Visual};
pub use mesh::{Mesh, Vertex};
pub use scene::{EntityDesc, SceneDescription};
pub use world::WorldRegistry;
