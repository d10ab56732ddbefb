use crate::config::BoardConfig;
use crate::drawing::DrawSurface;
use crate::shape::{Shape, ShapeId, random_color};
use crate::state::UserInputState;
use rand::Rng;

/// Where a freshly spawned shape is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Anywhere inside the canvas, whole-pixel coordinates.
    Random,
    At([f32; 2]),
}

/// The shapes on the board in paint order, plus pointer and drag state.
///
/// The last shape is painted on top and wins hit tests.
#[derive(Debug, Default)]
pub struct BoardState {
    shapes: Vec<Shape>,
    cursor: [f32; 2],
    input: UserInputState,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn cursor(&self) -> [f32; 2] {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: [f32; 2]) {
        self.cursor = cursor;
    }

    pub fn input(&self) -> UserInputState {
        self.input
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.input, UserInputState::Dragging { .. })
    }

    /// Appends a shape on top of the others.
    pub fn push(&mut self, shape: Shape) -> &Shape {
        debug_assert!(self.shape(shape.id()).is_none());
        let index = self.shapes.len();
        self.shapes.push(shape);
        &self.shapes[index]
    }

    /// Spawns a rectangle or a circle with equal odds, a random size and a
    /// random color. `bounds` is the logical canvas size used by
    /// [`Placement::Random`].
    pub fn spawn_random<R: Rng>(
        &mut self,
        rng: &mut R,
        placement: Placement,
        bounds: [f32; 2],
        config: &BoardConfig,
    ) -> &Shape {
        let position = match placement {
            Placement::Random => [
                (rng.random::<f32>() * bounds[0]).floor(),
                (rng.random::<f32>() * bounds[1]).floor(),
            ],
            Placement::At(position) => position,
        };
        let color = random_color(rng);

        let shape = if rng.random_bool(0.5) {
            let width = rng.random_range(config.rect_side.clone()) as f32;
            let height = rng.random_range(config.rect_side.clone()) as f32;
            Shape::rectangle(position, width, height, color)
        } else {
            let radius = rng.random_range(config.circle_radius.clone()) as f32;
            Shape::circle(position, radius, color)
        };

        log::debug!("Spawned {:?} at {:?}", shape.kind(), shape.position());
        self.push(shape)
    }

    /// Scans from the top of the stack down, so the shape drawn last wins.
    pub fn find_topmost_hit(&self, point: [f32; 2]) -> Option<&Shape> {
        self.shapes.iter().rev().find(|shape| shape.contains_point(point))
    }

    pub fn is_over_any_shape(&self, point: [f32; 2]) -> bool {
        self.shapes.iter().any(|shape| shape.contains_point(point))
    }

    /// Moves the shape to the end of the paint order. Unknown ids are ignored.
    pub fn bring_to_front(&mut self, id: ShapeId) {
        if let Some(index) = self.shapes.iter().position(|shape| shape.id() == id) {
            let shape = self.shapes.remove(index);
            self.shapes.push(shape);
        }
    }

    /// Enters the dragging state for a shape that is on the board.
    pub fn begin_drag(&mut self, id: ShapeId, offset: [f32; 2]) -> bool {
        if self.shape(id).is_none() {
            log::warn!("Refusing to drag a shape that is not on the board");
            return false;
        }
        self.input = UserInputState::Dragging { shape: id, offset };
        true
    }

    pub fn end_drag(&mut self) {
        self.input = UserInputState::Idle;
    }

    /// Moves the dragged shape so it keeps its grab offset under `cursor`.
    /// Returns `false` when nothing is being dragged.
    pub fn drag_to(&mut self, cursor: [f32; 2]) -> bool {
        let UserInputState::Dragging { shape: id, offset } = self.input else {
            return false;
        };
        match self.shapes.iter_mut().find(|shape| shape.id() == id) {
            Some(shape) => {
                shape.move_to(cursor, offset);
                true
            }
            None => {
                self.input = UserInputState::Idle;
                false
            }
        }
    }

    pub fn draw_all<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for shape in &self.shapes {
            shape.draw(surface);
        }
    }
}
