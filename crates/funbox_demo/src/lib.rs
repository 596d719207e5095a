mod app;
mod gradient;

pub use app::DemoApp;
pub use gradient::{draw_gradient, gradient_pixel};

/// Cursor edge length in buffer pixels.
pub const CURSOR_SIZE: u32 = 4;
/// Cursor speed in buffer pixels per second.
pub const CURSOR_SPEED: f32 = 60.0;
