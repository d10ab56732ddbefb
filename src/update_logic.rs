use crate::app_state::State;
use crate::state::GeometryBuffers;
use crate::vertex::Vertex;
use wgpu::util::DeviceExt;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

fn upload(
    device: &wgpu::Device,
    label: &str,
    vertices: &[Vertex],
    indices: &[u32],
) -> GeometryBuffers {
    if vertices.is_empty() || indices.is_empty() {
        return GeometryBuffers::empty();
    }

    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Vertex Buffer")),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Index Buffer")),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    GeometryBuffers {
        vertex: Some(vertex),
        index: Some(index),
        count: indices.len() as u32,
    }
}

impl State {
    /// Runs once per animation frame, before rendering.
    pub fn update(&mut self) {
        let label_changed = self.frame_rate.measure(Instant::now());
        if label_changed || self.ui_geo.count == 0 {
            let (ui_vertices, ui_indices) = self
                .ui_renderer
                .generate_ui_vertices(&self.frame_rate.label(), self.window.scale_factor() as f32);
            self.ui_geo = upload(&self.gpu.device, "UI", &ui_vertices, &ui_indices);
        }

        if self.surface.take_dirty() {
            self.geometry = upload(
                &self.gpu.device,
                "Board",
                self.surface.vertices(),
                self.surface.indices(),
            );
        }
    }
}
