use glam::{Mat4, Vec3};

use super::aabb::Aabb;
use super::mesh::Mesh;

pub type EntityId = i32;

/// Path of a mesh asset the renderer loads itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshRef(pub String);

/// How an entity is drawn. The hitbox is always the entity's box; only the
/// visual differs.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Cuboid generated from the entity size, in entity-local space.
    Generated(Mesh),
    /// Externally supplied mesh; the generated hitbox is not drawn.
    External(MeshRef),
}

/// A box-shaped world object. `position` is the left/bottom/front corner.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    position: Vec3,
    size: Vec3,
    material: String,
    visual: Visual,
}

impl Entity {
    pub fn new_box(id: EntityId, position: Vec3, size: Vec3, material: impl Into<String>) -> Self {
        Self {
            id,
            position,
            size,
            material: material.into(),
            visual: Visual::Generated(Mesh::cuboid(size)),
        }
    }

    pub fn with_mesh(
        id: EntityId,
        position: Vec3,
        size: Vec3,
        material: impl Into<String>,
        mesh: MeshRef,
    ) -> Self {
        Self {
            id,
            position,
            size,
            material: material.into(),
            visual: Visual::External(mesh),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn is_degenerate(&self) -> bool {
        self.aabb().is_degenerate()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Local-to-world transform; `facing` spins the box about its own
    /// vertical center line.
    pub fn model_matrix(&self, facing: f32) -> Mat4 {
        if facing == 0.0 {
            return Mat4::from_translation(self.position);
        }
        let pivot = Vec3::new(self.size.x * 0.5, 0.0, self.size.z * 0.5);
        Mat4::from_translation(self.position + pivot)
            * Mat4::from_rotation_y(facing)
            * Mat4::from_translation(-pivot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_entity_generates_matching_mesh() {
        let e = Entity::new_box(3, Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0), "rock");
        match e.visual() {
            Visual::Generated(mesh) => {
                assert_eq!(mesh.bounds(), Some((Vec3::ZERO, Vec3::new(4.0, 5.0, 6.0))));
            }
            other => panic!("expected generated mesh, got {:?}", other),
        }
        assert_eq!(e.material(), "rock");
        assert_eq!(e.aabb().max(), Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_external_mesh_entity_keeps_hitbox() {
        let e = Entity::with_mesh(
            7,
            Vec3::ZERO,
            Vec3::splat(2.0),
            "wood",
            MeshRef("models/suzanne.obj".into()),
        );
        assert_eq!(e.visual(), &Visual::External(MeshRef("models/suzanne.obj".into())));
        assert_eq!(e.aabb().size, Vec3::splat(2.0));
    }

    #[test]
    fn test_model_matrix_rotates_about_footprint_center() {
        let e = Entity::new_box(0, Vec3::new(10.0, 0.0, 10.0), Vec3::new(2.0, 1.0, 2.0), "orange");
        let m = e.model_matrix(std::f32::consts::PI);
        // the footprint center stays put under any yaw
        let center = m.transform_point3(Vec3::new(1.0, 0.0, 1.0));
        assert!((center - Vec3::new(11.0, 0.0, 11.0)).length() < 1e-5);
        // the local origin swaps to the opposite corner after a half turn
        let corner = m.transform_point3(Vec3::ZERO);
        assert!((corner - Vec3::new(12.0, 0.0, 12.0)).length() < 1e-5);
        assert_eq!(e.model_matrix(0.0), Mat4::from_translation(Vec3::new(10.0, 0.0, 10.0)));
    }
}
