// VIEW: renderer boundary
pub mod render;

pub use render::{CameraUniform, DrawBox, RenderFrame, Renderer, TraceRenderer, ViewTransform};
