use crate::board::{BoardState, Placement};
use crate::canvas::CanvasTransform;
use crate::config::BoardConfig;
use crate::drawing::DrawSurface;
use crate::math::clamp;
use crate::state::UserInputState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::window::CursorIcon;

/// Placement and density of the canvas within its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner of the canvas in client coordinates.
    pub origin: [f32; 2],
    /// Canvas size in logical pixels.
    pub client_size: [f32; 2],
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(client_size: [f32; 2], device_pixel_ratio: f32) -> Self {
        Self {
            origin: [0.0, 0.0],
            client_size,
            device_pixel_ratio,
        }
    }

    /// Size of the backing pixel buffer, never smaller than 1x1.
    pub fn buffer_size(&self) -> [u32; 2] {
        [
            ((self.client_size[0] * self.device_pixel_ratio).floor() as u32).max(1),
            ((self.client_size[1] * self.device_pixel_ratio).floor() as u32).max(1),
        ]
    }

    /// Converts a client position into canvas-local coordinates, clamped to the canvas.
    pub fn to_canvas(&self, client_pos: [f32; 2]) -> [f32; 2] {
        [
            clamp(client_pos[0] - self.origin[0], 0.0, self.client_size[0]),
            clamp(client_pos[1] - self.origin[1], 0.0, self.client_size[1]),
        ]
    }

    pub fn transform(&self) -> CanvasTransform {
        CanvasTransform::from_device_pixel_ratio(self.device_pixel_ratio)
    }
}

/// Turns pointer and window events into board mutations and repaints.
///
/// Every handler that changes what is visible paints the result onto the
/// surface it is given before returning; nothing is deferred.
pub struct BoardController {
    config: BoardConfig,
    board: BoardState,
    viewport: Viewport,
    rng: StdRng,
    cursor_icon: CursorIcon,
    pointer_on_canvas: bool,
    initialized: bool,
}

impl BoardController {
    pub fn new(config: BoardConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, StdRng::from_os_rng())
    }

    pub fn with_rng(config: BoardConfig, viewport: Viewport, rng: StdRng) -> Self {
        Self {
            config,
            board: BoardState::new(),
            viewport,
            rng,
            cursor_icon: CursorIcon::Default,
            pointer_on_canvas: false,
            initialized: false,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        self.cursor_icon
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Sets up the drawing transform and paints the initial random shapes.
    /// Only the first call has an effect.
    pub fn init<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        surface.set_transform(self.viewport.transform());
        surface.clear_rect([0.0, 0.0], self.viewport.client_size);

        for _ in 0..self.config.initial_shape_count {
            let shape = self.board.spawn_random(
                &mut self.rng,
                Placement::Random,
                self.viewport.client_size,
                &self.config,
            );
            shape.draw(surface);
        }

        log::info!(
            "Board initialized with {} shapes on a {}x{} canvas",
            self.board.shapes().len(),
            self.viewport.client_size[0],
            self.viewport.client_size[1]
        );
    }

    pub fn pointer_move<S: DrawSurface + ?Sized>(&mut self, client_pos: [f32; 2], surface: &mut S) {
        self.pointer_on_canvas = true;
        let cursor = self.viewport.to_canvas(client_pos);
        self.board.set_cursor(cursor);

        if self.board.drag_to(cursor) {
            self.repaint(surface);
        }

        self.update_cursor_icon();
    }

    pub fn pointer_down<S: DrawSurface + ?Sized>(&mut self, client_pos: [f32; 2], surface: &mut S) {
        self.pointer_on_canvas = true;
        let cursor = self.viewport.to_canvas(client_pos);
        self.board.set_cursor(cursor);

        if self.board.is_dragging() {
            // a second button went down mid-drag; keep the current grab
            return;
        }

        let hit = self.board.find_topmost_hit(cursor).map(|shape| {
            let position = shape.position();
            (shape.id(), [cursor[0] - position[0], cursor[1] - position[1]])
        });

        if let Some((id, offset)) = hit {
            self.board.bring_to_front(id);
            if self.board.begin_drag(id, offset) {
                log::debug!("Started dragging shape with offset {:?}", offset);
            }
            self.repaint(surface);
        }

        self.update_cursor_icon();
    }

    pub fn pointer_up(&mut self) {
        if self.board.is_dragging() {
            log::debug!("Dropped shape at {:?}", self.board.cursor());
        }
        self.board.end_drag();
        self.update_cursor_icon();
    }

    pub fn pointer_left(&mut self) {
        self.pointer_on_canvas = false;
        self.update_cursor_icon();
    }

    /// Spawns a random shape anchored at the cursor and paints it on top.
    pub fn double_click<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.board.is_dragging() {
            log::warn!("Ignoring double click while a shape is being dragged");
            return;
        }

        let cursor = self.board.cursor();
        let shape = self.board.spawn_random(
            &mut self.rng,
            Placement::At(cursor),
            self.viewport.client_size,
            &self.config,
        );
        shape.draw(surface);
        self.update_cursor_icon();
    }

    /// Adopts a new canvas size or pixel density. Shapes keep their logical
    /// coordinates; only the backing buffer and the drawing transform change.
    pub fn resize<S: DrawSurface + ?Sized>(
        &mut self,
        client_size: [f32; 2],
        device_pixel_ratio: f32,
        surface: &mut S,
    ) {
        self.viewport.client_size = client_size;
        self.viewport.device_pixel_ratio = device_pixel_ratio;

        let cursor = self.viewport.to_canvas(self.board.cursor());
        self.board.set_cursor(cursor);

        let [width, height] = self.viewport.buffer_size();
        log::info!(
            "Canvas resized to {}x{} (client {}x{}, DPR {})",
            width,
            height,
            client_size[0],
            client_size[1],
            device_pixel_ratio
        );

        surface.set_transform(self.viewport.transform());
        self.repaint(surface);
    }

    /// Clears the canvas and paints every shape in z-order.
    pub fn repaint<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect([0.0, 0.0], self.viewport.client_size);
        self.board.draw_all(surface);
    }

    fn update_cursor_icon(&mut self) {
        self.cursor_icon = match self.board.input() {
            UserInputState::Dragging { .. } => CursorIcon::Grabbing,
            UserInputState::Idle
                if self.pointer_on_canvas && self.board.is_over_any_shape(self.board.cursor()) =>
            {
                CursorIcon::Pointer
            }
            UserInputState::Idle => CursorIcon::Default,
        };
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::recording::{DrawOp, RecordingSurface};
    use crate::shape::{Shape, ShapeId};

    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    fn controller() -> BoardController {
        BoardController::with_rng(
            BoardConfig::default(),
            Viewport::new([800.0, 600.0], 1.0),
            StdRng::seed_from_u64(42),
        )
    }

    fn position_of(controller: &BoardController, id: ShapeId) -> Option<[f32; 2]> {
        controller.board().shape(id).map(Shape::position)
    }

    #[test]
    fn viewport_clamps_to_the_canvas() {
        let mut viewport = Viewport::new([800.0, 600.0], 2.0);
        viewport.origin = [10.0, 20.0];

        assert_eq!(viewport.to_canvas([110.0, 120.0]), [100.0, 100.0]);
        assert_eq!(viewport.to_canvas([0.0, 0.0]), [0.0, 0.0]);
        assert_eq!(viewport.to_canvas([2000.0, 2000.0]), [800.0, 600.0]);
        assert_eq!(viewport.buffer_size(), [1600, 1200]);
    }

    #[test]
    fn buffer_size_never_collapses_to_zero() {
        let viewport = Viewport::new([0.0, 0.3], 1.5);
        assert_eq!(viewport.buffer_size(), [1, 1]);
    }

    #[test]
    fn init_paints_the_initial_population_once() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();

        controller.init(&mut surface);
        controller.init(&mut surface);

        assert_eq!(controller.board().shapes().len(), 5);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.ops[0], DrawOp::SetTransform(CanvasTransform::new()));
        assert_eq!(surface.since_last_clear().len(), 5);
    }

    #[test]
    fn drag_follows_the_cursor_and_stops_on_release() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        let id = controller
            .board_mut()
            .push(Shape::rectangle([50.0, 50.0], 100.0, 100.0, GREEN))
            .id();

        controller.pointer_down([60.0, 60.0], &mut surface);
        assert_eq!(
            controller.board().input(),
            UserInputState::Dragging { shape: id, offset: [10.0, 10.0] }
        );
        assert_eq!(controller.cursor_icon(), CursorIcon::Grabbing);

        controller.pointer_move([100.0, 120.0], &mut surface);
        assert_eq!(position_of(&controller, id), Some([90.0, 110.0]));

        controller.pointer_up();
        assert_eq!(controller.board().input(), UserInputState::Idle);

        controller.pointer_move([400.0, 400.0], &mut surface);
        assert_eq!(position_of(&controller, id), Some([90.0, 110.0]));
        assert_eq!(controller.cursor_icon(), CursorIcon::Default);
    }

    #[test]
    fn each_drag_move_is_one_full_repaint() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::circle([100.0, 100.0], 50.0, GREEN));
        controller
            .board_mut()
            .push(Shape::rectangle([300.0, 300.0], 60.0, 60.0, GREEN));

        controller.pointer_down([100.0, 100.0], &mut surface);
        let after_grab = surface.clear_count();

        for step in 0..3 {
            controller.pointer_move([110.0 + step as f32, 100.0], &mut surface);
        }

        assert_eq!(surface.clear_count(), after_grab + 3);
        assert_eq!(surface.since_last_clear().len(), 2);
    }

    #[test]
    fn grabbed_shape_is_painted_last() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::circle([100.0, 100.0], 50.0, GREEN));
        controller
            .board_mut()
            .push(Shape::rectangle([300.0, 300.0], 60.0, 60.0, GREEN));

        controller.pointer_down([100.0, 100.0], &mut surface);
        controller.pointer_move([150.0, 150.0], &mut surface);

        let last = surface.since_last_clear().last().cloned();
        assert_eq!(
            last,
            Some(DrawOp::Circle { center: [150.0, 150.0], radius: 50.0, color: GREEN })
        );
    }

    #[test]
    fn pointer_down_picks_the_topmost_of_overlapping_shapes() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        let below = controller
            .board_mut()
            .push(Shape::rectangle([0.0, 0.0], 100.0, 100.0, GREEN))
            .id();
        let above = controller
            .board_mut()
            .push(Shape::rectangle([50.0, 50.0], 100.0, 100.0, GREEN))
            .id();

        controller.pointer_down([75.0, 75.0], &mut surface);
        controller.pointer_move([85.0, 85.0], &mut surface);
        controller.pointer_up();

        assert_eq!(position_of(&controller, above), Some([60.0, 60.0]));
        assert_eq!(position_of(&controller, below), Some([0.0, 0.0]));
    }

    #[test]
    fn pointer_down_on_empty_canvas_stays_idle() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::circle([100.0, 100.0], 20.0, GREEN));

        controller.pointer_down([500.0, 500.0], &mut surface);

        assert_eq!(controller.board().input(), UserInputState::Idle);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn cursor_icon_reflects_hover() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::circle([100.0, 100.0], 20.0, GREEN));

        controller.pointer_move([100.0, 110.0], &mut surface);
        assert_eq!(controller.cursor_icon(), CursorIcon::Pointer);

        controller.pointer_move([300.0, 300.0], &mut surface);
        assert_eq!(controller.cursor_icon(), CursorIcon::Default);

        controller.pointer_move([100.0, 110.0], &mut surface);
        controller.pointer_left();
        assert_eq!(controller.cursor_icon(), CursorIcon::Default);
    }

    #[test]
    fn resize_keeps_logical_positions() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        let id = controller
            .board_mut()
            .push(Shape::rectangle([30.0, 30.0], 50.0, 50.0, GREEN))
            .id();
        let before = controller.viewport().buffer_size();

        controller.resize([1024.0, 768.0], 2.0, &mut surface);

        assert_eq!(position_of(&controller, id), Some([30.0, 30.0]));
        assert_ne!(controller.viewport().buffer_size(), before);
        assert_eq!(controller.viewport().buffer_size(), [2048, 1536]);
        assert_eq!(
            surface.ops,
            vec![
                DrawOp::SetTransform(CanvasTransform::from_device_pixel_ratio(2.0)),
                DrawOp::Clear,
                DrawOp::Rect { origin: [30.0, 30.0], size: [50.0, 50.0], color: GREEN },
            ]
        );
    }

    #[test]
    fn resize_mid_drag_keeps_the_grab() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::rectangle([50.0, 50.0], 100.0, 100.0, GREEN));

        controller.pointer_down([60.0, 60.0], &mut surface);
        controller.resize([400.0, 300.0], 1.0, &mut surface);

        assert!(controller.board().is_dragging());
    }

    #[test]
    fn double_click_spawns_at_the_cursor_without_clearing() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();

        controller.pointer_move([200.0, 150.0], &mut surface);
        controller.double_click(&mut surface);

        let shapes = controller.board().shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].position(), [200.0, 150.0]);
        assert_eq!(surface.clear_count(), 0);
        assert_eq!(surface.ops.len(), 1);
        // the new shape is under the pointer
        assert_eq!(controller.cursor_icon(), CursorIcon::Pointer);
    }

    #[test]
    fn double_click_is_ignored_while_dragging() {
        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        controller
            .board_mut()
            .push(Shape::circle([100.0, 100.0], 40.0, GREEN));

        controller.pointer_down([100.0, 100.0], &mut surface);
        controller.double_click(&mut surface);

        assert_eq!(controller.board().shapes().len(), 1);
    }

    #[test]
    fn init_after_resize_places_shapes_on_the_resized_canvas() {
        let mut controller = BoardController::with_rng(
            BoardConfig::default(),
            Viewport::new([1920.0, 1080.0], 1.0),
            StdRng::seed_from_u64(3),
        );
        let mut surface = RecordingSurface::default();

        controller.resize([300.0, 200.0], 2.0, &mut surface);
        controller.init(&mut surface);

        let shapes = controller.board().shapes();
        assert_eq!(shapes.len(), 5);
        for shape in shapes {
            let [x, y] = shape.position();
            assert!((0.0..300.0).contains(&x) && (0.0..200.0).contains(&y));
        }
    }

    #[test]
    fn dropping_a_shape_then_clicking_once_spawns_nothing() {
        use crate::click::ClickTracker;
        use std::time::{Duration, Instant};

        let mut controller = controller();
        let mut surface = RecordingSurface::default();
        let mut clicks = ClickTracker::new(Duration::from_millis(500), 4.0);
        controller
            .board_mut()
            .push(Shape::rectangle([0.0, 0.0], 50.0, 50.0, GREEN));
        let t0 = Instant::now();
        let at = |ms: u64| t0 + Duration::from_millis(ms);

        controller.pointer_down([20.0, 20.0], &mut surface);
        clicks.press(at(0), [20.0, 20.0]);
        controller.pointer_move([400.0, 400.0], &mut surface);
        controller.pointer_up();
        if clicks.release(at(200), [400.0, 400.0]) {
            controller.double_click(&mut surface);
        }

        controller.pointer_down([400.0, 400.0], &mut surface);
        clicks.press(at(300), [400.0, 400.0]);
        controller.pointer_up();
        if clicks.release(at(350), [400.0, 400.0]) {
            controller.double_click(&mut surface);
        }

        assert_eq!(controller.board().shapes().len(), 1);
    }
}
