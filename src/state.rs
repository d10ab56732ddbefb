use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline, Surface, SurfaceConfiguration};

use crate::canvas::{CanvasTransform, Uniforms};
use crate::shape::ShapeId;

/// Pointer state machine of the board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UserInputState {
    #[default]
    Idle,
    /// A shape is held. `offset` runs from the shape's anchor to the cursor
    /// at the moment it was grabbed and stays fixed for the whole drag.
    Dragging { shape: ShapeId, offset: [f32; 2] },
}

pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub render_pipeline: RenderPipeline,
    pub ui_render_pipeline: RenderPipeline,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiScreenUniforms {
    pub screen_size: [f32; 2],
    pub _padding: [f32; 2], // Padding to make it 16-byte aligned
}

pub struct UiScreenBuffers {
    pub uniform: Buffer,
    pub bind_group: BindGroup,
}

pub struct Canvas {
    pub transform: CanvasTransform,
    pub uniform: Uniforms,
    pub uniform_buffer: Buffer,
    pub uniform_bind_group: BindGroup,
}

pub struct GeometryBuffers {
    pub vertex: Option<Buffer>,
    pub index: Option<Buffer>,
    pub count: u32,
}

impl GeometryBuffers {
    pub fn empty() -> Self {
        Self {
            vertex: None,
            index: None,
            count: 0,
        }
    }
}
