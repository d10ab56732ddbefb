use crate::math::{Mat4, ortho};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new() -> Self {
        Self {
            transform: Mat4::identity().into(),
        }
    }

    /// Board geometry arrives in physical pixels with y pointing down; map it
    /// onto clip space for a surface of `surface_size` pixels.
    pub fn update_projection(&mut self, surface_size: (f32, f32)) {
        let proj = ortho(0.0, surface_size.0, surface_size.1, 0.0, -1.0, 1.0);

        self.transform = proj.into();
    }
}
