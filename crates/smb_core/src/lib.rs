pub mod animation;
pub mod geometry;
pub mod input;
pub mod time;

pub use geometry::Rect;
pub use input::{InputSnapshot, InputState, Key, MouseBtn};
