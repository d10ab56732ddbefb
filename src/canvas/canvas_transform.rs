/// Affine map from logical canvas coordinates to physical surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub offset: [f32; 2],
    pub scale: f32,
}

impl CanvasTransform {
    pub fn new() -> Self {
        Self {
            offset: [0.0, 0.0],
            scale: 1.0,
        }
    }

    /// The transform that compensates for the device pixel ratio, so shapes
    /// keep their logical size on high-density displays.
    pub fn from_device_pixel_ratio(device_pixel_ratio: f32) -> Self {
        Self {
            offset: [0.0, 0.0],
            scale: device_pixel_ratio,
        }
    }

    pub fn screen_to_canvas(&self, screen_pos: [f32; 2]) -> [f32; 2] {
        [
            (screen_pos[0] - self.offset[0]) / self.scale,
            (screen_pos[1] - self.offset[1]) / self.scale,
        ]
    }

    pub fn canvas_to_screen(&self, canvas_pos: [f32; 2]) -> [f32; 2] {
        [
            canvas_pos[0] * self.scale + self.offset[0],
            canvas_pos[1] * self.scale + self.offset[1],
        ]
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pixel_ratio_scales_both_ways() {
        let transform = CanvasTransform::from_device_pixel_ratio(2.0);

        assert_eq!(transform.canvas_to_screen([30.0, 40.0]), [60.0, 80.0]);
        assert_eq!(transform.screen_to_canvas([60.0, 80.0]), [30.0, 40.0]);
    }
}
