use crate::drawing::DrawSurface;
use rand::Rng;
use uuid::Uuid;

/// Stable identity of a shape on the board, independent of its z-order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// A filled figure on the board. `position` is the anchor: the top-left corner
/// of a rectangle, the center of a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    position: [f32; 2],
    color: [f32; 4],
    kind: ShapeKind,
}

impl Shape {
    pub fn rectangle(position: [f32; 2], width: f32, height: f32, color: [f32; 4]) -> Self {
        debug_assert!(width > 0.0 && height > 0.0);
        Self {
            id: ShapeId::new(),
            position,
            color,
            kind: ShapeKind::Rectangle { width, height },
        }
    }

    pub fn circle(center: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            id: ShapeId::new(),
            position: center,
            color,
            kind: ShapeKind::Circle { radius },
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Boundary points count as inside for both kinds.
    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                point[0] >= self.position[0]
                    && point[0] <= self.position[0] + width
                    && point[1] >= self.position[1]
                    && point[1] <= self.position[1] + height
            }
            ShapeKind::Circle { radius } => {
                let dx = point[0] - self.position[0];
                let dy = point[1] - self.position[1];
                (dx * dx + dy * dy).sqrt() <= radius
            }
        }
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                surface.fill_rect(self.position, [width, height], self.color)
            }
            ShapeKind::Circle { radius } => surface.fill_circle(self.position, radius, self.color),
        }
    }

    /// Places the anchor at `cursor - offset`. Absolute, so repeating a call
    /// with the same arguments leaves the shape where it is.
    pub fn move_to(&mut self, cursor: [f32; 2], offset: [f32; 2]) {
        self.position = [cursor[0] - offset[0], cursor[1] - offset[1]];
    }
}

pub fn random_color<R: Rng>(rng: &mut R) -> [f32; 4] {
    let [r, g, b] = rng.random::<[u8; 3]>();
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}
