//! World construction: turns a RON scene description into the entity
//! registry and the starting camera.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::camera::Camera;
use super::entity::{Entity, EntityId, MeshRef};
use super::world::WorldRegistry;
use crate::config::CameraConfig;
use crate::error::{GameError, Result};

/// Reject anything that would poison collision math.
const MAX_COORD: f32 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDesc {
    pub id: EntityId,
    pub position: [f32; 3],
    pub size: [f32; 3],
    #[serde(default)]
    pub material: String,
    /// External mesh asset; when absent a box mesh is generated from `size`.
    #[serde(default)]
    pub mesh: Option<String>,
}

impl EntityDesc {
    fn validate(&self) -> Result<()> {
        let valid = self
            .position
            .iter()
            .chain(self.size.iter())
            .all(|v| v.is_finite() && v.abs() <= MAX_COORD);
        if !valid {
            return Err(GameError::InvalidScene(format!(
                "entity {} has a non-finite or out-of-range coordinate",
                self.id
            )));
        }
        Ok(())
    }

    pub fn to_entity(&self) -> Entity {
        let position = Vec3::from_array(self.position);
        let size = Vec3::from_array(self.size);
        match &self.mesh {
            Some(path) => Entity::with_mesh(self.id, position, size, self.material.clone(), MeshRef(path.clone())),
            None => Entity::new_box(self.id, position, size, self.material.clone()),
        }
    }
}

fn default_camera_offset() -> [f32; 3] {
    [1.5, 15.0, 13.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub player: EntityDesc,
    #[serde(default)]
    pub objects: Vec<EntityDesc>,
    /// Camera position relative to the player's corner at spawn.
    #[serde(default = "default_camera_offset")]
    pub camera_offset: [f32; 3],
}

impl SceneDescription {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::error::read_ron(path)
    }

    /// The built-in course: a floor slab, a pillar, a ring of walls and one
    /// externally meshed prop.
    pub fn demo() -> Self {
        let obj = |id: EntityId, position: [f32; 3], size: [f32; 3], material: &str| EntityDesc {
            id,
            position,
            size,
            material: material.to_string(),
            mesh: None,
        };
        Self {
            player: obj(0, [-5.0, 11.0, -5.0], [3.0, 10.0, 3.0], "orange"),
            objects: vec![
                obj(1, [-30.0, 0.0, -30.0], [70.0, 10.0, 70.0], "wood"),
                obj(2, [20.0, -30.0, 20.0], [10.0, 70.0, 30.0], "rock"),
                obj(10, [0.0, 10.0, 0.0], [52.0, 20.0, 4.0], "rock"),
                obj(11, [48.0, 10.0, 5.0], [4.0, 20.0, 28.0], "rock"),
                obj(12, [10.0, 10.0, 19.0], [38.0, 20.0, 4.0], "rock"),
                obj(13, [5.0, 10.0, 10.0], [38.0, 20.0, 4.0], "rock"),
                obj(14, [0.0, 10.0, 5.0], [5.0, 20.0, 47.0], "rock"),
                obj(15, [10.0, 10.0, 25.0], [5.0, 20.0, 20.0], "rock"),
                EntityDesc {
                    mesh: Some("models/suzanne.obj".to_string()),
                    ..obj(20, [-20.0, 10.0, -20.0], [2.0, 2.0, 2.0], "wood")
                },
            ],
            camera_offset: default_camera_offset(),
        }
    }

    /// Build the registry (player first) and a camera looking at the player.
    pub fn build(&self, camera_cfg: &CameraConfig) -> Result<(WorldRegistry, Camera)> {
        self.player.validate()?;
        for desc in &self.objects {
            desc.validate()?;
        }
        let offset = Vec3::from_array(self.camera_offset);
        if !offset.is_finite() {
            return Err(GameError::InvalidScene("camera offset is not finite".into()));
        }

        let player = self.player.to_entity();
        let eye = player.position() + offset;
        let look_at = player.aabb().center();
        let mut world = WorldRegistry::new(player);
        for desc in &self.objects {
            world.insert(desc.to_entity())?;
        }

        let view = if (look_at - eye).length_squared() > f32::EPSILON {
            look_at - eye
        } else {
            Vec3::NEG_Z
        };
        let camera = Camera::look_from(eye, view, Vec3::Y, camera_cfg.speed_multiplier).with_projection(
            camera_cfg.fov_y_degrees.to_radians(),
            camera_cfg.z_near,
            camera_cfg.z_far,
        );

        info!(entities = world.len(), player = world.player_id(), "world built");
        Ok((world, camera))
    }
}
