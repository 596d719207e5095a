use crate::button::ButtonMask;
use crate::framebuffer::FrameBuffer;

/// The per-frame simulation callback.
///
/// Implementations must assign every pixel of `frame` on every call; the loop
/// never clears it between frames. Returning `true` asks the loop to stop once
/// the current frame has been presented.
pub trait SimulationStep {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool;
}

impl<T: SimulationStep + ?Sized> SimulationStep for Box<T> {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool {
        (**self).tick(buttons, frame, elapsed_ms)
    }
}

impl<T: SimulationStep + ?Sized> SimulationStep for &mut T {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool {
        (**self).tick(buttons, frame, elapsed_ms)
    }
}
