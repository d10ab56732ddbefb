use std::ops::Range;
use std::time::Duration;

/// Tunables for the board. There is no config file; hosts construct this
/// directly or take the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Id of the `<div>` the canvas is mounted into on the web.
    pub root_element_id: String,
    pub window_title: String,
    /// Number of random shapes spawned when the board starts.
    pub initial_shape_count: usize,
    /// Rectangle width and height are drawn independently from this range.
    pub rect_side: Range<u32>,
    pub circle_radius: Range<u32>,
    /// Two clicks closer together than this (in time and logical px) form a double click.
    pub double_click_interval: Duration,
    pub double_click_distance: f32,
    /// How often the FPS label is refreshed.
    pub fps_refresh_interval: Duration,
    pub background_color: [f32; 4],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            root_element_id: "app".to_string(),
            window_title: "shapeboard".to_string(),
            initial_shape_count: 5,
            rect_side: 50..200,
            circle_radius: 50..150,
            double_click_interval: Duration::from_millis(500),
            double_click_distance: 4.0,
            fps_refresh_interval: Duration::from_millis(250),
            background_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
