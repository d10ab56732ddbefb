use crate::Vertex;

// Seven-segment bits: a (top), b (upper right), c (lower right), d (bottom),
// e (lower left), f (upper left), g (middle).
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

enum Glyph {
    Segments(u8),
    Colon,
    Dot,
    Blank,
}

fn glyph_for(ch: char) -> Option<Glyph> {
    let segments = match ch {
        '0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
        '4' => SEG_B | SEG_C | SEG_F | SEG_G,
        '5' | 'S' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        'F' => SEG_A | SEG_E | SEG_F | SEG_G,
        'P' => SEG_A | SEG_B | SEG_E | SEG_F | SEG_G,
        ':' => return Some(Glyph::Colon),
        '.' => return Some(Glyph::Dot),
        ' ' => return Some(Glyph::Blank),
        _ => return None,
    };
    Some(Glyph::Segments(segments))
}

/// Draws the frame-rate label in the top-left corner of the screen, in
/// physical pixels, independent of the board transform.
pub struct UiRenderer {
    position: [f32; 2],
    glyph_size: [f32; 2],
    thickness: f32,
    spacing: f32,
    padding: f32,
    color: [f32; 4],
    backdrop: [f32; 4],
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            position: [6.0, 6.0],
            glyph_size: [9.0, 16.0],
            thickness: 2.0,
            spacing: 4.0,
            padding: 4.0,
            color: [1.0, 1.0, 1.0, 1.0],
            backdrop: [0.0, 0.0, 0.0, 0.6],
        }
    }

    pub fn generate_ui_vertices(&self, label: &str, scale: f32) -> (Vec<Vertex>, Vec<u32>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let [glyph_w, glyph_h] = [self.glyph_size[0] * scale, self.glyph_size[1] * scale];
        let t = self.thickness * scale;
        let padding = self.padding * scale;
        let origin = [self.position[0] * scale, self.position[1] * scale];

        let glyphs: Vec<Glyph> = label.chars().filter_map(glyph_for).collect();
        if glyphs.is_empty() {
            return (vertices, indices);
        }

        let mut width = 0.0;
        for glyph in &glyphs {
            width += self.advance(glyph, glyph_w, t) + self.spacing * scale;
        }
        width -= self.spacing * scale;

        self.add_rect(
            &mut vertices,
            &mut indices,
            origin,
            [width + padding * 2.0, glyph_h + padding * 2.0],
            self.backdrop,
        );

        let mut pen = [origin[0] + padding, origin[1] + padding];
        for glyph in &glyphs {
            match glyph {
                Glyph::Segments(mask) => self.add_segments(
                    &mut vertices,
                    &mut indices,
                    pen,
                    *mask,
                    [glyph_w, glyph_h],
                    t,
                ),
                Glyph::Colon => {
                    for y in [glyph_h * 0.25, glyph_h * 0.75 - t] {
                        let dot = [pen[0], pen[1] + y];
                        self.add_rect(&mut vertices, &mut indices, dot, [t, t], self.color);
                    }
                }
                Glyph::Dot => {
                    let dot = [pen[0], pen[1] + glyph_h - t];
                    self.add_rect(&mut vertices, &mut indices, dot, [t, t], self.color);
                }
                Glyph::Blank => {}
            }
            pen[0] += self.advance(glyph, glyph_w, t) + self.spacing * scale;
        }

        (vertices, indices)
    }

    fn advance(&self, glyph: &Glyph, glyph_w: f32, t: f32) -> f32 {
        match glyph {
            Glyph::Segments(_) => glyph_w,
            Glyph::Colon | Glyph::Dot => t,
            Glyph::Blank => glyph_w * 0.5,
        }
    }

    fn add_segments(
        &self,
        vertices: &mut Vec<Vertex>,
        indices: &mut Vec<u32>,
        pen: [f32; 2],
        mask: u8,
        size: [f32; 2],
        t: f32,
    ) {
        let [w, h] = size;
        let half = h * 0.5;
        let segments = [
            (SEG_A, [0.0, 0.0], [w, t]),
            (SEG_B, [w - t, 0.0], [t, half]),
            (SEG_C, [w - t, half], [t, half]),
            (SEG_D, [0.0, h - t], [w, t]),
            (SEG_E, [0.0, half], [t, half]),
            (SEG_F, [0.0, 0.0], [t, half]),
            (SEG_G, [0.0, half - t * 0.5], [w, t]),
        ];

        for (bit, offset, extent) in segments {
            if mask & bit != 0 {
                let origin = [pen[0] + offset[0], pen[1] + offset[1]];
                self.add_rect(vertices, indices, origin, extent, self.color);
            }
        }
    }

    fn add_rect(
        &self,
        vertices: &mut Vec<Vertex>,
        indices: &mut Vec<u32>,
        origin: [f32; 2],
        size: [f32; 2],
        color: [f32; 4],
    ) {
        let base = vertices.len() as u32;
        vertices.extend_from_slice(&[
            Vertex { position: origin, color },
            Vertex { position: [origin[0] + size[0], origin[1]], color },
            Vertex { position: [origin[0] + size[0], origin[1] + size[1]], color },
            Vertex { position: [origin[0], origin[1] + size[1]], color },
        ]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quads(label: &str) -> usize {
        let (vertices, indices) = UiRenderer::new().generate_ui_vertices(label, 1.0);
        assert_eq!(vertices.len() % 4, 0);
        assert_eq!(indices.len(), vertices.len() / 4 * 6);
        vertices.len() / 4
    }

    #[test]
    fn eight_lights_every_segment() {
        // backdrop + 7 segments
        assert_eq!(quads("8"), 8);
        assert_eq!(quads("1"), 3);
    }

    #[test]
    fn fps_label_is_fully_renderable() {
        // F=4 P=5 S=5 :=2 6=6 0=6 .=1 0=6 0=6, plus the backdrop
        assert_eq!(quads("FPS: 60.00"), 1 + 4 + 5 + 5 + 2 + 6 + 6 + 1 + 6 + 6);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        assert_eq!(quads("x"), 0);
        assert_eq!(quads("1x1"), quads("11"));
    }

    #[test]
    fn scale_grows_the_label() {
        let renderer = UiRenderer::new();
        let (small, _) = renderer.generate_ui_vertices("8", 1.0);
        let (large, _) = renderer.generate_ui_vertices("8", 2.0);

        // backdrop bottom-right corner
        assert_eq!(large[2].position[0], small[2].position[0] * 2.0);
        assert_eq!(large[2].position[1], small[2].position[1] * 2.0);
    }
}
