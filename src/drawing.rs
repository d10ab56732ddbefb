use crate::canvas::CanvasTransform;
use crate::vertex::Vertex;

const CIRCLE_SEGMENTS: u32 = 48;

/// The primitives shapes paint through. Coordinates are logical canvas pixels;
/// the transform set with [`DrawSurface::set_transform`] maps them onto the
/// backing buffer.
pub trait DrawSurface {
    fn set_transform(&mut self, transform: CanvasTransform);
    fn clear_rect(&mut self, origin: [f32; 2], size: [f32; 2]);
    fn fill_rect(&mut self, origin: [f32; 2], size: [f32; 2], color: [f32; 4]);
    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: [f32; 4]);
}

/// A drawing surface that tessellates everything painted onto it into one
/// triangle list, ready to upload as vertex and index buffers.
pub struct MeshSurface {
    transform: CanvasTransform,
    extent: [f32; 2],
    background: [f32; 4],
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    dirty: bool,
}

impl MeshSurface {
    pub fn new(background: [f32; 4]) -> Self {
        Self {
            transform: CanvasTransform::new(),
            extent: [0.0, 0.0],
            background,
            vertices: Vec::new(),
            indices: Vec::new(),
            dirty: true,
        }
    }

    /// Logical size of the area the surface covers. A clear over the whole
    /// extent discards all geometry instead of painting over it.
    pub fn set_extent(&mut self, extent: [f32; 2]) {
        self.extent = extent;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns whether the geometry changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn push_quad(&mut self, corners: [[f32; 2]; 4], color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices.push(Vertex {
                position: self.transform.canvas_to_screen(corner),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.dirty = true;
    }
}

impl DrawSurface for MeshSurface {
    fn set_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    fn clear_rect(&mut self, origin: [f32; 2], size: [f32; 2]) {
        let covers_extent = origin[0] <= 0.0
            && origin[1] <= 0.0
            && origin[0] + size[0] >= self.extent[0]
            && origin[1] + size[1] >= self.extent[1];

        if covers_extent {
            self.vertices.clear();
            self.indices.clear();
            self.dirty = true;
        } else {
            let background = self.background;
            self.fill_rect(origin, size, background);
        }
    }

    fn fill_rect(&mut self, origin: [f32; 2], size: [f32; 2], color: [f32; 4]) {
        self.push_quad(
            [
                origin,
                [origin[0] + size[0], origin[1]],
                [origin[0] + size[0], origin[1] + size[1]],
                [origin[0], origin[1] + size[1]],
            ],
            color,
        );
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: [f32; 4]) {
        let center_index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: self.transform.canvas_to_screen(center),
            color,
        });

        for i in 0..CIRCLE_SEGMENTS {
            let angle = (i as f32 * std::f32::consts::TAU) / CIRCLE_SEGMENTS as f32;
            self.vertices.push(Vertex {
                position: self.transform.canvas_to_screen([
                    center[0] + angle.cos() * radius,
                    center[1] + angle.sin() * radius,
                ]),
                color,
            });
        }

        for i in 0..CIRCLE_SEGMENTS {
            self.indices.extend_from_slice(&[
                center_index,
                center_index + 1 + i,
                center_index + 1 + (i + 1) % CIRCLE_SEGMENTS,
            ]);
        }
        self.dirty = true;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn rect_is_two_triangles_in_physical_pixels() {
        let mut surface = MeshSurface::new([1.0; 4]);
        surface.set_transform(CanvasTransform::from_device_pixel_ratio(2.0));
        surface.fill_rect([10.0, 20.0], [30.0, 40.0], RED);

        assert_eq!(surface.vertices().len(), 4);
        assert_eq!(surface.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(surface.vertices()[0].position, [20.0, 40.0]);
        assert_eq!(surface.vertices()[2].position, [80.0, 120.0]);
    }

    #[test]
    fn circle_is_a_closed_fan() {
        let mut surface = MeshSurface::new([1.0; 4]);
        surface.fill_circle([100.0, 100.0], 50.0, RED);

        assert_eq!(surface.vertices().len(), CIRCLE_SEGMENTS as usize + 1);
        assert_eq!(surface.indices().len(), CIRCLE_SEGMENTS as usize * 3);
        // last triangle wraps back to the first rim vertex
        let last = &surface.indices()[surface.indices().len() - 3..];
        assert_eq!(last, &[0, CIRCLE_SEGMENTS, 1]);

        for vertex in &surface.vertices()[1..] {
            let dx = vertex.position[0] - 100.0;
            let dy = vertex.position[1] - 100.0;
            assert!(((dx * dx + dy * dy).sqrt() - 50.0).abs() < 0.01);
        }
    }

    #[test]
    fn full_clear_drops_geometry_and_partial_clear_paints_background() {
        let background = [1.0, 1.0, 1.0, 1.0];
        let mut surface = MeshSurface::new(background);
        surface.set_extent([800.0, 600.0]);
        surface.fill_rect([0.0, 0.0], [50.0, 50.0], RED);

        surface.clear_rect([10.0, 10.0], [20.0, 20.0]);
        assert_eq!(surface.vertices().len(), 8);
        assert_eq!(surface.vertices()[4].color, background);

        surface.clear_rect([0.0, 0.0], [800.0, 600.0]);
        assert!(surface.vertices().is_empty());
        assert!(surface.indices().is_empty());
    }

    #[test]
    fn dirty_flag_tracks_changes() {
        let mut surface = MeshSurface::new([1.0; 4]);
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());

        surface.fill_rect([0.0, 0.0], [1.0, 1.0], RED);
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());
    }
}
