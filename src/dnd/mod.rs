pub mod engine;
pub mod geometry;

pub use engine::{DropId, move_task, resolve_target};
pub use geometry::{Point, Rect};
