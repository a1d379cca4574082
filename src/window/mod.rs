pub mod geometry;
pub mod id;
pub mod snapshot;

pub use geometry::{Rect, ScreenSize};
pub use id::WindowId;
pub use snapshot::{ListedWindow, WindowSnapshot};
