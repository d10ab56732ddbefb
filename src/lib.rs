mod app;
mod app_state;
mod canvas;
mod click;
mod event_handler;
mod frame_rate;
mod math;
mod renderer;
mod state;
mod ui;
mod update_logic;
mod vertex;

pub mod board;
pub mod config;
pub mod controller;
pub mod drawing;
pub mod error;
pub mod mount;
pub mod shape;

// Re-export the main public interface
#[cfg(not(target_arch = "wasm32"))]
pub use app::run;
#[cfg(target_arch = "wasm32")]
pub use app::start;

pub use board::{BoardState, Placement};
pub use canvas::CanvasTransform;
pub use config::BoardConfig;
pub use controller::{BoardController, Viewport};
pub use drawing::{DrawSurface, MeshSurface};
pub use error::BoardError;
pub use shape::{Shape, ShapeId, ShapeKind};
pub use state::UserInputState;
pub use vertex::Vertex;
