//! Renderer boundary. The simulation hands over a camera transform and a
//! list of world-space boxes; drawing them is the renderer's business.

use glam::{Mat4, Vec3};
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Camera, EntityId, Visual, WorldRegistry};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Look-at triple derived from the camera basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl ViewTransform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            eye: camera.position(),
            target: camera.target(),
            up: camera.up(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawBox {
    pub id: EntityId,
    pub position: Vec3,
    pub size: Vec3,
    /// Yaw about the box's vertical center line; only the player spins.
    pub facing: f32,
    pub material: String,
    pub visual: Visual,
    pub model: Mat4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub frame: u64,
    pub view: ViewTransform,
    pub view_proj: Mat4,
    pub boxes: Vec<DrawBox>,
}

impl RenderFrame {
    pub fn build(frame: u64, world: &WorldRegistry, camera: &Camera, player_facing: f32) -> Self {
        let player_id = world.player_id();
        let boxes = world
            .iter()
            .map(|e| {
                let facing = if e.id() == player_id { player_facing } else { 0.0 };
                DrawBox {
                    id: e.id(),
                    position: e.position(),
                    size: e.size(),
                    facing,
                    material: e.material().to_string(),
                    visual: e.visual().clone(),
                    model: e.model_matrix(facing),
                }
            })
            .collect();
        Self {
            frame,
            view: ViewTransform::from_camera(camera),
            view_proj: camera.view_proj(),
            boxes,
        }
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj.to_cols_array_2d(),
        }
    }
}

pub trait Renderer {
    fn draw_frame(&mut self, frame: &RenderFrame) -> Result<()>;
}

/// Headless renderer: logs a summary of every `sample_every`-th frame.
pub struct TraceRenderer {
    sample_every: u64,
    frames_drawn: u64,
}

impl TraceRenderer {
    pub fn new(sample_every: u64) -> Self {
        Self {
            sample_every: sample_every.max(1),
            frames_drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl Default for TraceRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for TraceRenderer {
    fn draw_frame(&mut self, frame: &RenderFrame) -> Result<()> {
        self.frames_drawn += 1;
        if frame.frame % self.sample_every != 0 {
            return Ok(());
        }
        let external = frame
            .boxes
            .iter()
            .filter(|b| matches!(b.visual, Visual::External(_)))
            .count();
        info!(
            frame = frame.frame,
            eye = ?frame.view.eye,
            target = ?frame.view.target,
            boxes = frame.boxes.len(),
            external,
            "frame"
        );
        if let Some(first) = frame.boxes.first() {
            debug!(id = first.id, position = ?first.position, facing = first.facing, "player box");
        }
        Ok(())
    }
}
