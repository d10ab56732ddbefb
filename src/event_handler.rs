use crate::app_state::State;
use crate::canvas::CanvasTransform;

use winit::event::*;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

impl State {
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu.config.width = new_size.width;
            self.gpu.config.height = new_size.height;
            self.gpu
                .surface
                .configure(&self.gpu.device, &self.gpu.config);

            self.canvas
                .uniform
                .update_projection((new_size.width as f32, new_size.height as f32));
            self.gpu.queue.write_buffer(
                &self.canvas.uniform_buffer,
                0,
                bytemuck::cast_slice(&[self.canvas.uniform]),
            );

            let ui_screen_uniforms = crate::state::UiScreenUniforms {
                screen_size: [new_size.width as f32, new_size.height as f32],
                _padding: [0.0, 0.0],
            };
            self.gpu.queue.write_buffer(
                &self.ui_screen.uniform,
                0,
                bytemuck::cast_slice(&[ui_screen_uniforms]),
            );

            let device_pixel_ratio = self.window.scale_factor() as f32;
            self.canvas.transform = CanvasTransform::from_device_pixel_ratio(device_pixel_ratio);
            let client_size = [
                new_size.width as f32 / device_pixel_ratio,
                new_size.height as f32 / device_pixel_ratio,
            ];
            self.surface.set_extent(client_size);
            self.controller
                .resize(client_size, device_pixel_ratio, &mut self.surface);
            // the first real size places the initial shapes
            self.controller.init(&mut self.surface);
        }
    }

    /// Feeds a window event to the board. Returns `true` when it was consumed.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        let consumed = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = self
                    .canvas
                    .transform
                    .screen_to_canvas([position.x as f32, position.y as f32]);
                self.controller.pointer_move(self.mouse_pos, &mut self.surface);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.controller.pointer_left();
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        self.clicks.press(Instant::now(), self.mouse_pos);
                        self.controller.pointer_down(self.mouse_pos, &mut self.surface);
                    }
                    ElementState::Released => {
                        self.controller.pointer_up();
                        if self.clicks.release(Instant::now(), self.mouse_pos) {
                            self.controller.double_click(&mut self.surface);
                        }
                    }
                }
                true
            }
            _ => false,
        };

        if consumed {
            self.window.set_cursor(self.controller.cursor_icon());
        }
        consumed
    }
}
